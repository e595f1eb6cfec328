use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::errors::InternalError;
use crate::types::db::school_event::{self, Entity as SchoolEvent};

/// Date-window selector for the event list: upcoming clamps the range to
/// dates from now on (soonest first), past to dates before now (latest
/// first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventWindow {
    #[default]
    All,
    Upcoming,
    Past,
}

#[derive(Debug, Default)]
pub struct SchoolEventFilter {
    pub venue: Option<String>,
    pub organized_by: Option<String>,
    pub date_from: Option<i64>,
    pub date_to: Option<i64>,
    pub window: EventWindow,
}

pub struct SchoolEventStore {
    db: DatabaseConnection,
}

impl SchoolEventStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn insert(
        &self,
        event: school_event::ActiveModel,
    ) -> Result<school_event::Model, InternalError> {
        event
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("insert_school_event", e))
    }

    pub async fn find_by_id(
        &self,
        id: &str,
    ) -> Result<Option<school_event::Model>, InternalError> {
        SchoolEvent::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_school_event_by_id", e))
    }

    pub async fn list(
        &self,
        filter: SchoolEventFilter,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<school_event::Model>, u64), InternalError> {
        let now = Utc::now().timestamp();

        let mut date_from = filter.date_from;
        let mut date_to = filter.date_to;
        match filter.window {
            EventWindow::Upcoming => {
                date_from = Some(date_from.map_or(now, |from| from.max(now)));
            }
            EventWindow::Past => {
                date_to = Some(date_to.map_or(now, |to| to.min(now)));
            }
            EventWindow::All => {}
        }

        let mut condition = Condition::all();
        if let Some(venue) = &filter.venue {
            condition = condition.add(school_event::Column::Venue.contains(venue));
        }
        if let Some(organized_by) = &filter.organized_by {
            condition = condition.add(school_event::Column::OrganizedBy.eq(organized_by));
        }
        if let Some(from) = date_from {
            condition = condition.add(school_event::Column::Date.gte(from));
        }
        if let Some(to) = date_to {
            condition = condition.add(school_event::Column::Date.lt(to));
        }

        let total = SchoolEvent::find()
            .filter(condition.clone())
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_school_events", e))?;

        let query = SchoolEvent::find().filter(condition);
        let query = match filter.window {
            EventWindow::Past => query.order_by_desc(school_event::Column::Date),
            _ => query.order_by_asc(school_event::Column::Date),
        };

        let events = query
            .offset((page - 1) * limit)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_school_events", e))?;

        Ok((events, total))
    }

    /// Events between two dates inclusive, soonest first.
    pub async fn find_by_date_range(
        &self,
        start_date: i64,
        end_date: i64,
    ) -> Result<Vec<school_event::Model>, InternalError> {
        SchoolEvent::find()
            .filter(school_event::Column::Date.gte(start_date))
            .filter(school_event::Column::Date.lte(end_date))
            .order_by_asc(school_event::Column::Date)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("find_school_events_by_date_range", e))
    }

    pub async fn update(
        &self,
        event: school_event::ActiveModel,
    ) -> Result<school_event::Model, InternalError> {
        event
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_school_event", e))
    }

    pub async fn delete(&self, id: &str) -> Result<(), InternalError> {
        SchoolEvent::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_school_event", e))?;
        Ok(())
    }
}
