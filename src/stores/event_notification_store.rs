use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::errors::InternalError;
use crate::types::db::event_notification::{self, Entity as EventNotification};

/// Whitelisted sort keys for the notification list endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationSortKey {
    SentAt,
    CreatedAt,
    UpdatedAt,
    Status,
}

impl NotificationSortKey {
    fn column(self) -> event_notification::Column {
        match self {
            NotificationSortKey::SentAt => event_notification::Column::SentAt,
            NotificationSortKey::CreatedAt => event_notification::Column::CreatedAt,
            NotificationSortKey::UpdatedAt => event_notification::Column::UpdatedAt,
            NotificationSortKey::Status => event_notification::Column::Status,
        }
    }
}

pub struct EventNotificationStore {
    db: DatabaseConnection,
}

impl EventNotificationStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn insert(
        &self,
        notification: event_notification::ActiveModel,
    ) -> Result<event_notification::Model, InternalError> {
        notification
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("insert_event_notification", e))
    }

    pub async fn find_by_id(
        &self,
        id: &str,
    ) -> Result<Option<event_notification::Model>, InternalError> {
        EventNotification::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_event_notification_by_id", e))
    }

    pub async fn find_by_event(
        &self,
        event_id: &str,
    ) -> Result<Vec<event_notification::Model>, InternalError> {
        EventNotification::find()
            .filter(event_notification::Column::EventId.eq(event_id))
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("find_event_notifications_by_event", e))
    }

    pub async fn list(
        &self,
        event_id: Option<String>,
        recipient_id: Option<String>,
        status: Option<String>,
        sort_key: NotificationSortKey,
        ascending: bool,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<event_notification::Model>, u64), InternalError> {
        let mut condition = Condition::all();
        if let Some(event_id) = &event_id {
            condition = condition.add(event_notification::Column::EventId.eq(event_id));
        }
        if let Some(recipient_id) = &recipient_id {
            condition = condition.add(event_notification::Column::RecipientId.eq(recipient_id));
        }
        if let Some(status) = &status {
            condition = condition.add(event_notification::Column::Status.eq(status));
        }

        let total = EventNotification::find()
            .filter(condition.clone())
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_event_notifications", e))?;

        let order = if ascending { Order::Asc } else { Order::Desc };
        let notifications = EventNotification::find()
            .filter(condition)
            .order_by(sort_key.column(), order)
            .offset((page - 1) * limit)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_event_notifications", e))?;

        Ok((notifications, total))
    }

    pub async fn update(
        &self,
        notification: event_notification::ActiveModel,
    ) -> Result<event_notification::Model, InternalError> {
        notification
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_event_notification", e))
    }

    /// Record the delivery outcome after the SMS attempt.
    pub async fn update_status(
        &self,
        id: &str,
        status: &str,
        updated_at: i64,
    ) -> Result<(), InternalError> {
        let notification = event_notification::ActiveModel {
            id: Set(id.to_string()),
            status: Set(status.to_string()),
            updated_at: Set(updated_at),
            ..Default::default()
        };
        notification
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_event_notification_status", e))?;
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<(), InternalError> {
        EventNotification::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_event_notification", e))?;
        Ok(())
    }
}
