use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::errors::InternalError;
use crate::types::db::calendar_entry::{self, Entity as CalendarEntry};

pub struct CalendarEntryStore {
    db: DatabaseConnection,
}

impl CalendarEntryStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn insert(
        &self,
        entry: calendar_entry::ActiveModel,
    ) -> Result<calendar_entry::Model, InternalError> {
        entry
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("insert_calendar_entry", e))
    }

    pub async fn find_by_id(
        &self,
        id: &str,
    ) -> Result<Option<calendar_entry::Model>, InternalError> {
        CalendarEntry::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_calendar_entry_by_id", e))
    }

    /// Uniqueness probe for the (user, event) invariant.
    pub async fn find_by_user_and_event(
        &self,
        created_by: &str,
        event_id: &str,
    ) -> Result<Option<calendar_entry::Model>, InternalError> {
        CalendarEntry::find()
            .filter(calendar_entry::Column::CreatedBy.eq(created_by))
            .filter(calendar_entry::Column::EventId.eq(event_id))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_calendar_entry_by_user_and_event", e))
    }

    pub async fn list(
        &self,
        event_id: Option<String>,
        created_by: Option<String>,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<calendar_entry::Model>, u64), InternalError> {
        let mut condition = Condition::all();
        if let Some(event_id) = &event_id {
            condition = condition.add(calendar_entry::Column::EventId.eq(event_id));
        }
        if let Some(created_by) = &created_by {
            condition = condition.add(calendar_entry::Column::CreatedBy.eq(created_by));
        }

        let total = CalendarEntry::find()
            .filter(condition.clone())
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_calendar_entries", e))?;

        let entries = CalendarEntry::find()
            .filter(condition)
            .order_by_desc(calendar_entry::Column::CreatedAt)
            .offset((page - 1) * limit)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_calendar_entries", e))?;

        Ok((entries, total))
    }

    pub async fn update(
        &self,
        entry: calendar_entry::ActiveModel,
    ) -> Result<calendar_entry::Model, InternalError> {
        entry
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_calendar_entry", e))
    }

    pub async fn delete(&self, id: &str) -> Result<(), InternalError> {
        CalendarEntry::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_calendar_entry", e))?;
        Ok(())
    }
}
