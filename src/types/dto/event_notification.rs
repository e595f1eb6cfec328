use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::event_notification;
use crate::types::dto::common::PageMeta;

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateEventNotificationRequest {
    pub event_id: String,
    pub recipient_id: String,
    /// SMS body, up to 2000 characters
    pub message: String,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct BulkCreateEventNotificationRequest {
    pub event_id: String,
    pub recipient_ids: Vec<String>,
    pub message: String,
}

/// At least one of message or status is required
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UpdateEventNotificationRequest {
    pub message: Option<String>,
    /// Either "sent" or "failed"
    pub status: Option<String>,
}

#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct EventNotificationResponse {
    pub id: String,
    pub event_id: String,
    pub recipient_id: String,
    pub message: String,
    pub sent_at: i64,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<event_notification::Model> for EventNotificationResponse {
    fn from(notification: event_notification::Model) -> Self {
        Self {
            id: notification.id,
            event_id: notification.event_id,
            recipient_id: notification.recipient_id,
            message: notification.message,
            sent_at: notification.sent_at,
            status: notification.status,
            created_at: notification.created_at,
            updated_at: notification.updated_at,
        }
    }
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct EventNotificationListResponse {
    pub items: Vec<EventNotificationResponse>,
    pub meta: PageMeta,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct BulkCreateEventNotificationResponse {
    pub total_recipients: u64,
    pub skipped_duplicates: u64,
    pub notifications_created: u64,
    pub notifications: Vec<EventNotificationResponse>,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct SmsBalanceResponse {
    pub credit_balance: f64,
}
