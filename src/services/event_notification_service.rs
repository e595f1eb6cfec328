use chrono::Utc;
use sea_orm::Set;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::providers::SmsGateway;
use crate::services::record_audit;
use crate::stores::{
    AuditStore, EventNotificationStore, NotificationSortKey, SchoolEventStore, UserStore,
};
use crate::types::db::{event_notification, user};
use crate::types::dto::common::{MessageResponse, PageMeta};
use crate::types::dto::event_notification::{
    BulkCreateEventNotificationRequest, BulkCreateEventNotificationResponse,
    CreateEventNotificationRequest, EventNotificationListResponse, EventNotificationResponse,
    SmsBalanceResponse, UpdateEventNotificationRequest,
};
use crate::types::internal::action::Action;
use crate::validation::{self, fields};

const STATUSES: [&str; 2] = ["sent", "failed"];

/// Event notifications with best-effort SMS delivery. A gateway failure
/// never fails the request; the stored status is demoted to "failed"
/// instead.
pub struct EventNotificationService {
    notifications: Arc<EventNotificationStore>,
    events: Arc<SchoolEventStore>,
    users: Arc<UserStore>,
    audit: Arc<AuditStore>,
    sms: Arc<dyn SmsGateway>,
}

impl EventNotificationService {
    pub fn new(
        notifications: Arc<EventNotificationStore>,
        events: Arc<SchoolEventStore>,
        users: Arc<UserStore>,
        audit: Arc<AuditStore>,
        sms: Arc<dyn SmsGateway>,
    ) -> Self {
        Self {
            notifications,
            events,
            users,
            audit,
            sms,
        }
    }

    pub async fn create(
        &self,
        actor_id: &str,
        req: CreateEventNotificationRequest,
    ) -> Result<EventNotificationResponse, ApiError> {
        let mut errors = Vec::new();
        errors.extend(fields::entity_id(&req.event_id, "event"));
        errors.extend(fields::entity_id(&req.recipient_id, "recipient"));
        errors.extend(fields::required(&req.message, "Message"));
        errors.extend(fields::max_length(&req.message, 2000, "Message"));
        validation::finish(errors)?;

        if self.events.find_by_id(&req.event_id).await?.is_none() {
            return Err(ApiError::not_found("Event not found"));
        }
        let recipient = self
            .users
            .find_by_id(&req.recipient_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Recipient not found"))?;

        let notification = self
            .deliver(&req.event_id, &recipient, &req.message)
            .await?;
        record_audit(&self.audit, actor_id, Action::NotificationCreate).await;
        Ok(notification)
    }

    /// Fan a message out to many recipients. Duplicate ids are collapsed,
    /// recipients already notified for the event are skipped, and each
    /// SMS failure demotes only that notification.
    pub async fn bulk_create(
        &self,
        actor_id: &str,
        req: BulkCreateEventNotificationRequest,
    ) -> Result<BulkCreateEventNotificationResponse, ApiError> {
        let mut errors = Vec::new();
        errors.extend(fields::entity_id(&req.event_id, "event"));
        if req.recipient_ids.is_empty() {
            errors.push("At least one recipient is required".to_string());
        }
        for recipient_id in &req.recipient_ids {
            if let Some(message) = fields::entity_id(recipient_id, "recipient") {
                errors.push(message);
                break;
            }
        }
        errors.extend(fields::required(&req.message, "Message"));
        errors.extend(fields::max_length(&req.message, 2000, "Message"));
        validation::finish(errors)?;

        if self.events.find_by_id(&req.event_id).await?.is_none() {
            return Err(ApiError::not_found("Event not found"));
        }

        let mut seen = HashSet::new();
        let recipient_ids: Vec<String> = req
            .recipient_ids
            .iter()
            .filter(|id| seen.insert(id.as_str()))
            .cloned()
            .collect();

        let recipients = self.users.find_many_by_ids(&recipient_ids).await?;
        if recipients.len() < recipient_ids.len() {
            let found: HashSet<&str> = recipients.iter().map(|u| u.id.as_str()).collect();
            let missing: Vec<&str> = recipient_ids
                .iter()
                .map(String::as_str)
                .filter(|id| !found.contains(id))
                .collect();
            return Err(ApiError::not_found(format!(
                "Recipients not found: {}",
                missing.join(", ")
            )));
        }

        let already_notified: HashSet<String> = self
            .notifications
            .find_by_event(&req.event_id)
            .await?
            .into_iter()
            .map(|n| n.recipient_id)
            .collect();
        let pending: Vec<&user::Model> = recipients
            .iter()
            .filter(|u| !already_notified.contains(&u.id))
            .collect();
        let skipped_duplicates = (recipients.len() - pending.len()) as u64;
        if pending.is_empty() {
            return Err(ApiError::conflict(
                "All recipients already have notifications for this event",
            ));
        }

        let mut notifications = Vec::with_capacity(pending.len());
        for recipient in pending {
            notifications.push(self.deliver(&req.event_id, recipient, &req.message).await?);
        }
        record_audit(&self.audit, actor_id, Action::NotificationBulkCreate).await;

        Ok(BulkCreateEventNotificationResponse {
            total_recipients: recipient_ids.len() as u64,
            skipped_duplicates,
            notifications_created: notifications.len() as u64,
            notifications,
        })
    }

    /// Persist one notification, attempt SMS delivery, and record the
    /// outcome.
    async fn deliver(
        &self,
        event_id: &str,
        recipient: &user::Model,
        message: &str,
    ) -> Result<EventNotificationResponse, ApiError> {
        let now = Utc::now().timestamp();
        let id = Uuid::new_v4().to_string();
        let record = event_notification::ActiveModel {
            id: Set(id.clone()),
            event_id: Set(event_id.to_string()),
            recipient_id: Set(recipient.id.clone()),
            message: Set(message.to_string()),
            sent_at: Set(now),
            status: Set("sent".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let mut notification = self.notifications.insert(record).await?;

        let delivered = match &recipient.phone_number {
            Some(phone) => match self.sms.send_sms(phone, message).await {
                Ok(()) => true,
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        notification_id = %id,
                        "SMS delivery failed, recording notification as failed"
                    );
                    false
                }
            },
            None => {
                tracing::warn!(
                    notification_id = %id,
                    "recipient has no phone number, recording notification as failed"
                );
                false
            }
        };

        if !delivered {
            self.notifications.update_status(&id, "failed", now).await?;
            notification.status = "failed".to_string();
        }

        Ok(notification.into())
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn list(
        &self,
        actor_id: &str,
        event_id: Option<String>,
        recipient_id: Option<String>,
        status: Option<String>,
        sort_by: Option<String>,
        order: Option<String>,
        page: Option<u64>,
        limit: Option<u64>,
    ) -> Result<EventNotificationListResponse, ApiError> {
        let mut errors = Vec::new();
        let (page, limit) = validation::page_params(page, limit, &mut errors);
        if let Some(event_id) = &event_id {
            errors.extend(fields::entity_id(event_id, "event"));
        }
        if let Some(recipient_id) = &recipient_id {
            errors.extend(fields::entity_id(recipient_id, "recipient"));
        }
        if let Some(status) = &status {
            if !STATUSES.contains(&status.as_str()) {
                errors.push("Status must be either sent or failed".to_string());
            }
        }
        let sort_key = match sort_by.as_deref() {
            None | Some("sent_at") => NotificationSortKey::SentAt,
            Some("created_at") => NotificationSortKey::CreatedAt,
            Some("updated_at") => NotificationSortKey::UpdatedAt,
            Some("status") => NotificationSortKey::Status,
            Some(_) => {
                errors.push(
                    "Sort field must be one of: sent_at, created_at, updated_at, status"
                        .to_string(),
                );
                NotificationSortKey::SentAt
            }
        };
        let ascending = match order.as_deref() {
            None | Some("desc") => false,
            Some("asc") => true,
            Some(_) => {
                errors.push("Order must be either asc or desc".to_string());
                false
            }
        };
        validation::finish(errors)?;

        let (notifications, total) = self
            .notifications
            .list(event_id, recipient_id, status, sort_key, ascending, page, limit)
            .await?;
        record_audit(&self.audit, actor_id, Action::NotificationList).await;

        Ok(EventNotificationListResponse {
            items: notifications
                .into_iter()
                .map(EventNotificationResponse::from)
                .collect(),
            meta: PageMeta::new(page, limit, total),
        })
    }

    pub async fn get(
        &self,
        actor_id: &str,
        id: &str,
    ) -> Result<EventNotificationResponse, ApiError> {
        validation::finish(fields::entity_id(id, "notification").into_iter().collect())?;

        let notification = self
            .notifications
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Notification not found"))?;
        record_audit(&self.audit, actor_id, Action::NotificationDetail).await;
        Ok(notification.into())
    }

    pub async fn update(
        &self,
        actor_id: &str,
        id: &str,
        req: UpdateEventNotificationRequest,
    ) -> Result<EventNotificationResponse, ApiError> {
        let mut errors = Vec::new();
        errors.extend(fields::entity_id(id, "notification"));
        if req.message.is_none() && req.status.is_none() {
            errors.push("At least one field is required".to_string());
        }
        if let Some(message) = &req.message {
            errors.extend(fields::required(message, "Message"));
            errors.extend(fields::max_length(message, 2000, "Message"));
        }
        if let Some(status) = &req.status {
            if !STATUSES.contains(&status.as_str()) {
                errors.push("Status must be either sent or failed".to_string());
            }
        }
        validation::finish(errors)?;

        let notification = self
            .notifications
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Notification not found"))?;

        let mut active = event_notification::ActiveModel {
            id: Set(notification.id.clone()),
            updated_at: Set(Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(message) = req.message {
            active.message = Set(message);
        }
        if let Some(status) = req.status {
            active.status = Set(status);
        }

        let updated = self.notifications.update(active).await?;
        record_audit(&self.audit, actor_id, Action::NotificationUpdate).await;
        Ok(updated.into())
    }

    pub async fn delete(&self, actor_id: &str, id: &str) -> Result<MessageResponse, ApiError> {
        validation::finish(fields::entity_id(id, "notification").into_iter().collect())?;

        if self.notifications.find_by_id(id).await?.is_none() {
            return Err(ApiError::not_found("Notification not found"));
        }
        self.notifications.delete(id).await?;
        record_audit(&self.audit, actor_id, Action::NotificationDelete).await;
        Ok(MessageResponse {
            message: "Notification deleted successfully".to_string(),
        })
    }

    /// Remaining credit balance at the gateway.
    pub async fn sms_balance(&self) -> Result<SmsBalanceResponse, ApiError> {
        let credit_balance = self.sms.balance().await?;
        Ok(SmsBalanceResponse { credit_balance })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::InternalError;
    use async_trait::async_trait;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    /// Gateway double: records messages, can be flipped to fail.
    struct FakeSmsGateway {
        fail: AtomicBool,
        sent: Mutex<Vec<(String, String)>>,
    }

    impl FakeSmsGateway {
        fn new() -> Self {
            Self {
                fail: AtomicBool::new(false),
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SmsGateway for FakeSmsGateway {
        async fn send_sms(&self, to: &str, message: &str) -> Result<(), InternalError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(InternalError::provider("send_sms", "gateway down"));
            }
            self.sent
                .lock()
                .unwrap()
                .push((to.to_string(), message.to_string()));
            Ok(())
        }

        async fn balance(&self) -> Result<f64, InternalError> {
            Ok(42.5)
        }
    }

    struct Fixture {
        service: EventNotificationService,
        gateway: Arc<FakeSmsGateway>,
        event_id: String,
        recipient_ids: Vec<String>,
    }

    async fn setup() -> Fixture {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let users = Arc::new(UserStore::new(db.clone()));
        let events = Arc::new(SchoolEventStore::new(db.clone()));
        let gateway = Arc::new(FakeSmsGateway::new());
        let service = EventNotificationService::new(
            Arc::new(EventNotificationStore::new(db.clone())),
            events.clone(),
            users.clone(),
            Arc::new(AuditStore::new(db)),
            gateway.clone(),
        );

        let now = Utc::now().timestamp();
        let mut recipient_ids = Vec::new();
        for i in 0..2 {
            let id = Uuid::new_v4().to_string();
            users
                .insert(crate::types::db::user::ActiveModel {
                    id: Set(id.clone()),
                    username: Set(format!("student{i}")),
                    email: Set(format!("student{i}@example.com")),
                    password_hash: Set("hash".to_string()),
                    role: Set("student".to_string()),
                    phone_number: Set(Some(format!("+63912345678{i}"))),
                    created_at: Set(now),
                    updated_at: Set(now),
                })
                .await
                .unwrap();
            recipient_ids.push(id);
        }

        let event_id = Uuid::new_v4().to_string();
        events
            .insert(crate::types::db::school_event::ActiveModel {
                id: Set(event_id.clone()),
                title: Set("Orientation".to_string()),
                description: Set(None),
                date: Set(now + 86400),
                venue: Set("Main Hall".to_string()),
                organized_by: Set("admin".to_string()),
                created_at: Set(now),
                updated_at: Set(now),
            })
            .await
            .unwrap();

        Fixture {
            service,
            gateway,
            event_id,
            recipient_ids,
        }
    }

    #[tokio::test]
    async fn delivered_notification_is_sent() {
        let fixture = setup().await;
        let response = fixture
            .service
            .create(
                "actor",
                CreateEventNotificationRequest {
                    event_id: fixture.event_id.clone(),
                    recipient_id: fixture.recipient_ids[0].clone(),
                    message: "See you tomorrow".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(response.status, "sent");
        assert_eq!(fixture.gateway.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn gateway_failure_demotes_status_without_failing_the_request() {
        let fixture = setup().await;
        fixture.gateway.fail.store(true, Ordering::SeqCst);

        let response = fixture
            .service
            .create(
                "actor",
                CreateEventNotificationRequest {
                    event_id: fixture.event_id.clone(),
                    recipient_id: fixture.recipient_ids[0].clone(),
                    message: "See you tomorrow".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(response.status, "failed");

        let stored = fixture
            .service
            .get("actor", &response.id)
            .await
            .unwrap();
        assert_eq!(stored.status, "failed");
    }

    #[tokio::test]
    async fn bulk_create_dedupes_and_skips_existing() {
        let fixture = setup().await;
        fixture
            .service
            .create(
                "actor",
                CreateEventNotificationRequest {
                    event_id: fixture.event_id.clone(),
                    recipient_id: fixture.recipient_ids[0].clone(),
                    message: "First".to_string(),
                },
            )
            .await
            .unwrap();

        let response = fixture
            .service
            .bulk_create(
                "actor",
                BulkCreateEventNotificationRequest {
                    event_id: fixture.event_id.clone(),
                    recipient_ids: vec![
                        fixture.recipient_ids[0].clone(),
                        fixture.recipient_ids[1].clone(),
                        fixture.recipient_ids[1].clone(),
                    ],
                    message: "Reminder".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(response.total_recipients, 2);
        assert_eq!(response.skipped_duplicates, 1);
        assert_eq!(response.notifications_created, 1);
    }

    #[tokio::test]
    async fn bulk_create_with_no_new_recipients_conflicts() {
        let fixture = setup().await;
        fixture
            .service
            .create(
                "actor",
                CreateEventNotificationRequest {
                    event_id: fixture.event_id.clone(),
                    recipient_id: fixture.recipient_ids[0].clone(),
                    message: "First".to_string(),
                },
            )
            .await
            .unwrap();

        let err = fixture
            .service
            .bulk_create(
                "actor",
                BulkCreateEventNotificationRequest {
                    event_id: fixture.event_id.clone(),
                    recipient_ids: vec![fixture.recipient_ids[0].clone()],
                    message: "Again".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 409);
    }

    #[tokio::test]
    async fn bulk_create_names_missing_recipients() {
        let fixture = setup().await;
        let ghost = Uuid::new_v4().to_string();

        let err = fixture
            .service
            .bulk_create(
                "actor",
                BulkCreateEventNotificationRequest {
                    event_id: fixture.event_id.clone(),
                    recipient_ids: vec![fixture.recipient_ids[0].clone(), ghost.clone()],
                    message: "Hello".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
        assert!(err.message().contains(&ghost));
    }

    #[tokio::test]
    async fn list_sorts_by_the_requested_column() {
        let fixture = setup().await;
        fixture
            .service
            .create(
                "actor",
                CreateEventNotificationRequest {
                    event_id: fixture.event_id.clone(),
                    recipient_id: fixture.recipient_ids[0].clone(),
                    message: "Delivered".to_string(),
                },
            )
            .await
            .unwrap();
        fixture.gateway.fail.store(true, Ordering::SeqCst);
        fixture
            .service
            .create(
                "actor",
                CreateEventNotificationRequest {
                    event_id: fixture.event_id.clone(),
                    recipient_id: fixture.recipient_ids[1].clone(),
                    message: "Demoted".to_string(),
                },
            )
            .await
            .unwrap();

        let page = fixture
            .service
            .list(
                "actor",
                None,
                None,
                None,
                Some("status".to_string()),
                Some("asc".to_string()),
                None,
                None,
            )
            .await
            .unwrap();
        assert_eq!(page.meta.total, 2);
        assert_eq!(page.items[0].status, "failed");
        assert_eq!(page.items[1].status, "sent");

        let page = fixture
            .service
            .list(
                "actor",
                None,
                None,
                None,
                Some("status".to_string()),
                None,
                None,
                None,
            )
            .await
            .unwrap();
        assert_eq!(page.items[0].status, "sent");
    }

    #[tokio::test]
    async fn list_rejects_unknown_sort_fields() {
        let fixture = setup().await;
        let err = fixture
            .service
            .list(
                "actor",
                None,
                None,
                None,
                Some("message".to_string()),
                Some("sideways".to_string()),
                None,
                None,
            )
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(
            err.message(),
            "Sort field must be one of: sent_at, created_at, updated_at, status, Order must be either asc or desc"
        );
    }
}
