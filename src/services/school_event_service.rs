use chrono::Utc;
use sea_orm::Set;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::services::record_audit;
use crate::stores::{AuditStore, EventWindow, SchoolEventFilter, SchoolEventStore};
use crate::types::db::school_event;
use crate::types::dto::common::{MessageResponse, PageMeta};
use crate::types::dto::school_event::{
    CreateSchoolEventRequest, SchoolEventListResponse, SchoolEventRangeResponse,
    SchoolEventResponse, UpdateSchoolEventRequest,
};
use crate::types::internal::action::Action;
use crate::validation::{self, fields};

const ORGANIZERS: [&str; 2] = ["admin", "department"];

/// School events. Listing and detail are open to guests, so the actor is
/// optional there and audit rows are written only for signed-in callers.
pub struct SchoolEventService {
    events: Arc<SchoolEventStore>,
    audit: Arc<AuditStore>,
}

impl SchoolEventService {
    pub fn new(events: Arc<SchoolEventStore>, audit: Arc<AuditStore>) -> Self {
        Self { events, audit }
    }

    pub async fn create(
        &self,
        actor_id: &str,
        req: CreateSchoolEventRequest,
    ) -> Result<SchoolEventResponse, ApiError> {
        let mut errors = Vec::new();
        errors.extend(fields::required(&req.title, "Title"));
        errors.extend(fields::max_length(&req.title, 100, "Title"));
        if let Some(description) = &req.description {
            errors.extend(fields::max_length(description, 2000, "Description"));
        }
        errors.extend(fields::required(&req.venue, "Venue"));
        errors.extend(fields::max_length(&req.venue, 150, "Venue"));
        if !ORGANIZERS.contains(&req.organized_by.as_str()) {
            errors.push("Organized by must be either admin or department".to_string());
        }
        if req.date < Utc::now().timestamp() {
            errors.push("Event date cannot be in the past".to_string());
        }
        validation::finish(errors)?;

        let now = Utc::now().timestamp();
        let event = school_event::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            title: Set(req.title.trim().to_string()),
            description: Set(req.description),
            date: Set(req.date),
            venue: Set(req.venue.trim().to_string()),
            organized_by: Set(req.organized_by),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let event = self.events.insert(event).await?;
        record_audit(&self.audit, actor_id, Action::EventCreate).await;
        Ok(event.into())
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn list(
        &self,
        actor_id: Option<&str>,
        venue: Option<String>,
        organized_by: Option<String>,
        date_from: Option<i64>,
        date_to: Option<i64>,
        window: Option<String>,
        page: Option<u64>,
        limit: Option<u64>,
    ) -> Result<SchoolEventListResponse, ApiError> {
        let mut errors = Vec::new();
        let (page, limit) = validation::page_params(page, limit, &mut errors);
        if let Some(organized_by) = &organized_by {
            if !ORGANIZERS.contains(&organized_by.as_str()) {
                errors.push("Organized by must be either admin or department".to_string());
            }
        }
        let window = match window.as_deref() {
            None | Some("all") => EventWindow::All,
            Some("upcoming") => EventWindow::Upcoming,
            Some("past") => EventWindow::Past,
            Some(_) => {
                errors.push("Type must be one of: all, upcoming, past".to_string());
                EventWindow::All
            }
        };
        validation::finish(errors)?;

        let filter = SchoolEventFilter {
            venue,
            organized_by,
            date_from,
            date_to,
            window,
        };
        let (events, total) = self.events.list(filter, page, limit).await?;

        let total_pages = total.div_ceil(limit);
        if total > 0 && page > total_pages {
            return Err(ApiError::validation(format!(
                "Invalid page number. Maximum page is {total_pages}."
            )));
        }

        if let Some(actor_id) = actor_id {
            record_audit(&self.audit, actor_id, Action::EventList).await;
        }

        Ok(SchoolEventListResponse {
            items: events.into_iter().map(SchoolEventResponse::from).collect(),
            meta: PageMeta::new(page, limit, total),
        })
    }

    pub async fn get(
        &self,
        actor_id: Option<&str>,
        id: &str,
    ) -> Result<SchoolEventResponse, ApiError> {
        validation::finish(fields::entity_id(id, "event").into_iter().collect())?;

        let event = self
            .events
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Event not found"))?;
        if let Some(actor_id) = actor_id {
            record_audit(&self.audit, actor_id, Action::EventDetail).await;
        }
        Ok(event.into())
    }

    pub async fn update(
        &self,
        actor_id: &str,
        id: &str,
        req: UpdateSchoolEventRequest,
    ) -> Result<SchoolEventResponse, ApiError> {
        let mut errors = Vec::new();
        errors.extend(fields::entity_id(id, "event"));
        if req.title.is_none() && req.description.is_none() && req.date.is_none() && req.venue.is_none() {
            errors.push("At least one field is required".to_string());
        }
        if let Some(title) = &req.title {
            errors.extend(fields::required(title, "Title"));
            errors.extend(fields::max_length(title, 100, "Title"));
        }
        if let Some(description) = &req.description {
            errors.extend(fields::max_length(description, 2000, "Description"));
        }
        if let Some(venue) = &req.venue {
            errors.extend(fields::required(venue, "Venue"));
            errors.extend(fields::max_length(venue, 150, "Venue"));
        }
        if let Some(date) = req.date {
            if date < Utc::now().timestamp() {
                errors.push("Cannot update event to a past date".to_string());
            }
        }
        validation::finish(errors)?;

        let event = self
            .events
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Event not found"))?;

        let mut active = school_event::ActiveModel {
            id: Set(event.id.clone()),
            updated_at: Set(Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(title) = req.title {
            active.title = Set(title.trim().to_string());
        }
        if let Some(description) = req.description {
            active.description = Set(Some(description));
        }
        if let Some(date) = req.date {
            active.date = Set(date);
        }
        if let Some(venue) = req.venue {
            active.venue = Set(venue.trim().to_string());
        }

        let updated = self.events.update(active).await?;
        record_audit(&self.audit, actor_id, Action::EventUpdate).await;
        Ok(updated.into())
    }

    pub async fn delete(&self, actor_id: &str, id: &str) -> Result<MessageResponse, ApiError> {
        validation::finish(fields::entity_id(id, "event").into_iter().collect())?;

        if self.events.find_by_id(id).await?.is_none() {
            return Err(ApiError::not_found("Event not found"));
        }
        self.events.delete(id).await?;
        record_audit(&self.audit, actor_id, Action::EventDelete).await;
        Ok(MessageResponse {
            message: "Event deleted successfully".to_string(),
        })
    }

    /// Events inside an inclusive date window, soonest first.
    pub async fn range(
        &self,
        actor_id: Option<&str>,
        start_date: i64,
        end_date: i64,
    ) -> Result<SchoolEventRangeResponse, ApiError> {
        if end_date < start_date {
            return Err(ApiError::validation(
                "End date cannot be earlier than start date",
            ));
        }

        let events = self.events.find_by_date_range(start_date, end_date).await?;
        if let Some(actor_id) = actor_id {
            record_audit(&self.audit, actor_id, Action::EventFilterDateRange).await;
        }

        let count = events.len() as u64;
        Ok(SchoolEventRangeResponse {
            items: events.into_iter().map(SchoolEventResponse::from).collect(),
            count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn setup() -> SchoolEventService {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");
        SchoolEventService::new(
            Arc::new(SchoolEventStore::new(db.clone())),
            Arc::new(AuditStore::new(db)),
        )
    }

    fn upcoming_request(title: &str, offset_hours: i64) -> CreateSchoolEventRequest {
        CreateSchoolEventRequest {
            title: title.to_string(),
            description: None,
            date: Utc::now().timestamp() + offset_hours * 3600,
            venue: "Main Hall".to_string(),
            organized_by: "admin".to_string(),
        }
    }

    #[tokio::test]
    async fn create_rejects_past_dates() {
        let service = setup().await;
        let mut request = upcoming_request("Orientation", 24);
        request.date = Utc::now().timestamp() - 3600;

        let err = service.create("actor", request).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(err.message().contains("Event date cannot be in the past"));
    }

    #[tokio::test]
    async fn page_overflow_names_the_maximum_page() {
        let service = setup().await;
        for i in 0..3 {
            service
                .create("actor", upcoming_request(&format!("Event {i}"), 24 + i))
                .await
                .unwrap();
        }

        let err = service
            .list(
                Some("actor"),
                None,
                None,
                None,
                None,
                None,
                Some(7),
                Some(2),
            )
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), "Invalid page number. Maximum page is 2.");
    }

    #[tokio::test]
    async fn guests_can_list_without_an_actor() {
        let service = setup().await;
        service
            .create("actor", upcoming_request("Open Day", 24))
            .await
            .unwrap();

        let page = service
            .list(None, None, None, None, None, None, None, None)
            .await
            .unwrap();
        assert_eq!(page.meta.total, 1);
    }

    #[tokio::test]
    async fn update_rejects_past_dates_with_its_own_message() {
        let service = setup().await;
        let event = service
            .create("actor", upcoming_request("Orientation", 24))
            .await
            .unwrap();

        let err = service
            .update(
                "actor",
                &event.id,
                UpdateSchoolEventRequest {
                    title: None,
                    description: None,
                    date: Some(Utc::now().timestamp() - 3600),
                    venue: None,
                },
            )
            .await
            .unwrap_err();
        assert!(err.message().contains("Cannot update event to a past date"));
    }

    #[tokio::test]
    async fn range_requires_ordered_bounds_and_sorts_ascending() {
        let service = setup().await;
        let later = service
            .create("actor", upcoming_request("Later", 48))
            .await
            .unwrap();
        let sooner = service
            .create("actor", upcoming_request("Sooner", 24))
            .await
            .unwrap();

        let err = service.range(Some("actor"), 100, 50).await.unwrap_err();
        assert_eq!(err.status_code(), 400);

        let response = service
            .range(Some("actor"), sooner.date - 1, later.date + 1)
            .await
            .unwrap();
        assert_eq!(response.count, 2);
        assert_eq!(response.items[0].title, "Sooner");
        assert_eq!(response.items[1].title, "Later");
    }
}
