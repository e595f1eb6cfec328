use chrono::Utc;
use sea_orm::Set;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::services::record_audit;
use crate::stores::{AuditStore, CalendarEntryStore, SchoolEventStore, UserStore};
use crate::types::db::calendar_entry;
use crate::types::dto::calendar_entry::{
    CalendarEntryListResponse, CalendarEntryResponse, CalendarEntryWithEventResponse,
    CreateCalendarEntryRequest, UpdateCalendarEntryRequest,
};
use crate::types::dto::common::{MessageResponse, PageMeta};
use crate::types::internal::action::Action;
use crate::validation::{self, fields};

/// Personal event bookmarks. A user bookmarks an event at most once.
pub struct CalendarEntryService {
    entries: Arc<CalendarEntryStore>,
    events: Arc<SchoolEventStore>,
    users: Arc<UserStore>,
    audit: Arc<AuditStore>,
}

impl CalendarEntryService {
    pub fn new(
        entries: Arc<CalendarEntryStore>,
        events: Arc<SchoolEventStore>,
        users: Arc<UserStore>,
        audit: Arc<AuditStore>,
    ) -> Self {
        Self {
            entries,
            events,
            users,
            audit,
        }
    }

    pub async fn create(
        &self,
        actor_id: &str,
        req: CreateCalendarEntryRequest,
    ) -> Result<CalendarEntryWithEventResponse, ApiError> {
        let mut errors = Vec::new();
        errors.extend(fields::entity_id(&req.event_id, "event"));
        errors.extend(fields::entity_id(&req.created_by, "user"));
        validation::finish(errors)?;

        if self.users.find_by_id(&req.created_by).await?.is_none() {
            return Err(ApiError::not_found("User not found"));
        }
        let event = self
            .events
            .find_by_id(&req.event_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Event not found"))?;

        if self
            .entries
            .find_by_user_and_event(&req.created_by, &req.event_id)
            .await?
            .is_some()
        {
            return Err(ApiError::conflict(
                "Calendar entry already exists for this event",
            ));
        }

        let now = Utc::now().timestamp();
        let entry = calendar_entry::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            event_id: Set(req.event_id),
            created_by: Set(req.created_by),
            date_added: Set(now),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let entry = self.entries.insert(entry).await?;
        record_audit(&self.audit, actor_id, Action::CalendarCreate).await;

        Ok(CalendarEntryWithEventResponse {
            calendar_entry: entry.into(),
            event: event.into(),
        })
    }

    pub async fn list(
        &self,
        actor_id: &str,
        event_id: Option<String>,
        created_by: Option<String>,
        page: Option<u64>,
        limit: Option<u64>,
    ) -> Result<CalendarEntryListResponse, ApiError> {
        let mut errors = Vec::new();
        let (page, limit) = validation::page_params(page, limit, &mut errors);
        if let Some(event_id) = &event_id {
            errors.extend(fields::entity_id(event_id, "event"));
        }
        if let Some(created_by) = &created_by {
            errors.extend(fields::entity_id(created_by, "user"));
        }
        validation::finish(errors)?;

        let (entries, total) = self.entries.list(event_id, created_by, page, limit).await?;
        record_audit(&self.audit, actor_id, Action::CalendarList).await;

        Ok(CalendarEntryListResponse {
            items: entries
                .into_iter()
                .map(CalendarEntryResponse::from)
                .collect(),
            meta: PageMeta::new(page, limit, total),
        })
    }

    pub async fn get(&self, actor_id: &str, id: &str) -> Result<CalendarEntryResponse, ApiError> {
        validation::finish(fields::entity_id(id, "calendar entry").into_iter().collect())?;

        let entry = self
            .entries
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Calendar entry not found"))?;
        record_audit(&self.audit, actor_id, Action::CalendarDetail).await;
        Ok(entry.into())
    }

    pub async fn update(
        &self,
        actor_id: &str,
        id: &str,
        req: UpdateCalendarEntryRequest,
    ) -> Result<CalendarEntryResponse, ApiError> {
        let mut errors = Vec::new();
        errors.extend(fields::entity_id(id, "calendar entry"));
        errors.extend(fields::entity_id(&req.event_id, "event"));
        errors.extend(fields::entity_id(&req.created_by, "user"));
        validation::finish(errors)?;

        let entry = self
            .entries
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Calendar entry not found"))?;

        if self.users.find_by_id(&req.created_by).await?.is_none() {
            return Err(ApiError::not_found("User not found"));
        }
        if self.events.find_by_id(&req.event_id).await?.is_none() {
            return Err(ApiError::not_found("Event not found"));
        }
        if let Some(existing) = self
            .entries
            .find_by_user_and_event(&req.created_by, &req.event_id)
            .await?
        {
            if existing.id != entry.id {
                return Err(ApiError::conflict(
                    "Calendar entry already exists for this event",
                ));
            }
        }

        let active = calendar_entry::ActiveModel {
            id: Set(entry.id.clone()),
            event_id: Set(req.event_id),
            created_by: Set(req.created_by),
            updated_at: Set(Utc::now().timestamp()),
            ..Default::default()
        };
        let updated = self.entries.update(active).await?;
        record_audit(&self.audit, actor_id, Action::CalendarUpdate).await;
        Ok(updated.into())
    }

    pub async fn delete(&self, actor_id: &str, id: &str) -> Result<MessageResponse, ApiError> {
        validation::finish(fields::entity_id(id, "calendar entry").into_iter().collect())?;

        if self.entries.find_by_id(id).await?.is_none() {
            return Err(ApiError::not_found("Calendar entry not found"));
        }
        self.entries.delete(id).await?;
        record_audit(&self.audit, actor_id, Action::CalendarDelete).await;
        Ok(MessageResponse {
            message: "Calendar entry deleted successfully".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    struct Fixture {
        service: CalendarEntryService,
        user_id: String,
        event_id: String,
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
        let service = CalendarEntryService::new(
            Arc::new(CalendarEntryStore::new(db.clone())),
            events.clone(),
            users.clone(),
            Arc::new(AuditStore::new(db)),
        );

        let now = Utc::now().timestamp();
        let user_id = Uuid::new_v4().to_string();
        users
            .insert(crate::types::db::user::ActiveModel {
                id: Set(user_id.clone()),
                username: Set("student1".to_string()),
                email: Set("student1@example.com".to_string()),
                password_hash: Set("hash".to_string()),
                role: Set("student".to_string()),
                phone_number: Set(None),
                created_at: Set(now),
                updated_at: Set(now),
            })
            .await
            .unwrap();

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
            user_id,
            event_id,
        }
    }

    #[tokio::test]
    async fn create_returns_the_bookmarked_event() {
        let fixture = setup().await;
        let response = fixture
            .service
            .create(
                &fixture.user_id.clone(),
                CreateCalendarEntryRequest {
                    event_id: fixture.event_id.clone(),
                    created_by: fixture.user_id.clone(),
                },
            )
            .await
            .unwrap();
        assert_eq!(response.event.title, "Orientation");
        assert_eq!(response.calendar_entry.created_by, fixture.user_id);
    }

    #[tokio::test]
    async fn one_bookmark_per_user_per_event() {
        let fixture = setup().await;
        let request = CreateCalendarEntryRequest {
            event_id: fixture.event_id.clone(),
            created_by: fixture.user_id.clone(),
        };
        fixture
            .service
            .create(&fixture.user_id, request)
            .await
            .unwrap();

        let err = fixture
            .service
            .create(
                &fixture.user_id.clone(),
                CreateCalendarEntryRequest {
                    event_id: fixture.event_id.clone(),
                    created_by: fixture.user_id.clone(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.message(), "Calendar entry already exists for this event");
    }

    #[tokio::test]
    async fn create_requires_an_existing_event() {
        let fixture = setup().await;
        let err = fixture
            .service
            .create(
                &fixture.user_id.clone(),
                CreateCalendarEntryRequest {
                    event_id: Uuid::new_v4().to_string(),
                    created_by: fixture.user_id.clone(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.message(), "Event not found");
    }
}
