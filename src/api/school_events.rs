use std::sync::Arc;

use poem_openapi::{
    param::{Header, Path, Query},
    payload::Json,
    OpenApi,
};

use crate::api::{helpers, ApiTags, BearerAuth};
use crate::errors::ApiError;
use crate::services::{SchoolEventService, TokenService};
use crate::types::dto::common::MessageResponse;
use crate::types::dto::school_event::{
    CreateSchoolEventRequest, SchoolEventListResponse, SchoolEventRangeResponse,
    SchoolEventResponse, UpdateSchoolEventRequest,
};
use crate::types::internal::auth::Role;

/// School event endpoints. Reads are open to guests; the optional
/// Authorization header only attributes the audit entry.
pub struct SchoolEventApi {
    events: Arc<SchoolEventService>,
    tokens: Arc<TokenService>,
}

impl SchoolEventApi {
    pub fn new(events: Arc<SchoolEventService>, tokens: Arc<TokenService>) -> Self {
        Self { events, tokens }
    }
}

#[OpenApi(prefix_path = "/school-events", tag = "ApiTags::SchoolEvents")]
impl SchoolEventApi {
    /// Create a school event
    #[oai(path = "/", method = "post")]
    async fn create(
        &self,
        auth: BearerAuth,
        body: Json<CreateSchoolEventRequest>,
    ) -> Result<Json<SchoolEventResponse>, ApiError> {
        let actor = helpers::authenticate(&self.tokens, &auth.0)?;
        helpers::require_role(&actor, &[Role::Admin])?;
        Ok(Json(self.events.create(&actor.id, body.0).await?))
    }

    /// List school events with filters and an upcoming/past window
    #[oai(path = "/", method = "get")]
    #[allow(clippy::too_many_arguments)]
    async fn list(
        &self,
        #[oai(name = "Authorization")] authorization: Header<Option<String>>,
        venue: Query<Option<String>>,
        organized_by: Query<Option<String>>,
        date_from: Query<Option<i64>>,
        date_to: Query<Option<i64>>,
        #[oai(name = "type")] window: Query<Option<String>>,
        page: Query<Option<u64>>,
        limit: Query<Option<u64>>,
    ) -> Result<Json<SchoolEventListResponse>, ApiError> {
        let actor = helpers::optional_user(&self.tokens, authorization.0.as_deref())?;
        Ok(Json(
            self.events
                .list(
                    actor.as_ref().map(|a| a.id.as_str()),
                    venue.0,
                    organized_by.0,
                    date_from.0,
                    date_to.0,
                    window.0,
                    page.0,
                    limit.0,
                )
                .await?,
        ))
    }

    /// List events falling inside an inclusive date range
    #[oai(path = "/range", method = "get")]
    async fn range(
        &self,
        #[oai(name = "Authorization")] authorization: Header<Option<String>>,
        start_date: Query<i64>,
        end_date: Query<i64>,
    ) -> Result<Json<SchoolEventRangeResponse>, ApiError> {
        let actor = helpers::optional_user(&self.tokens, authorization.0.as_deref())?;
        Ok(Json(
            self.events
                .range(actor.as_ref().map(|a| a.id.as_str()), start_date.0, end_date.0)
                .await?,
        ))
    }

    /// Fetch a single school event
    #[oai(path = "/:id", method = "get")]
    async fn get(
        &self,
        #[oai(name = "Authorization")] authorization: Header<Option<String>>,
        id: Path<String>,
    ) -> Result<Json<SchoolEventResponse>, ApiError> {
        let actor = helpers::optional_user(&self.tokens, authorization.0.as_deref())?;
        Ok(Json(
            self.events
                .get(actor.as_ref().map(|a| a.id.as_str()), &id.0)
                .await?,
        ))
    }

    /// Update a school event's title, description, date, or venue
    #[oai(path = "/:id", method = "put")]
    async fn update(
        &self,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<UpdateSchoolEventRequest>,
    ) -> Result<Json<SchoolEventResponse>, ApiError> {
        let actor = helpers::authenticate(&self.tokens, &auth.0)?;
        helpers::require_role(&actor, &[Role::Admin])?;
        Ok(Json(self.events.update(&actor.id, &id.0, body.0).await?))
    }

    /// Delete a school event
    #[oai(path = "/:id", method = "delete")]
    async fn delete(
        &self,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let actor = helpers::authenticate(&self.tokens, &auth.0)?;
        helpers::require_role(&actor, &[Role::Admin])?;
        Ok(Json(self.events.delete(&actor.id, &id.0).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use poem_openapi::auth::Bearer;
    use sea_orm::Database;

    use crate::stores::{AuditStore, SchoolEventStore};
    use crate::types::db::user;

    fn token_service() -> Arc<TokenService> {
        Arc::new(TokenService::new(
            "test-secret-key-minimum-32-characters-long".to_string(),
            "campushub-test".to_string(),
            3600,
        ))
    }

    fn bearer(role: &str) -> BearerAuth {
        let user = user::Model {
            id: uuid::Uuid::new_v4().to_string(),
            username: format!("{role}-user"),
            email: format!("{role}@example.com"),
            password_hash: "irrelevant".to_string(),
            role: role.to_string(),
            phone_number: None,
            created_at: 0,
            updated_at: 0,
        };
        BearerAuth(Bearer {
            token: token_service().issue(&user).unwrap(),
        })
    }

    async fn setup() -> SchoolEventApi {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        let service = SchoolEventService::new(
            Arc::new(SchoolEventStore::new(db.clone())),
            Arc::new(AuditStore::new(db)),
        );
        SchoolEventApi::new(Arc::new(service), token_service())
    }

    #[tokio::test]
    async fn create_and_update_are_admin_only() {
        let api = setup().await;

        let body = CreateSchoolEventRequest {
            title: "Foundation Day".to_string(),
            description: None,
            date: 0,
            venue: "Gymnasium".to_string(),
            organized_by: "admin".to_string(),
        };
        for role in ["adviser", "officer", "student"] {
            let err = api
                .create(bearer(role), Json(body.clone()))
                .await
                .unwrap_err();
            assert_eq!(err.status_code(), 403);
            assert_eq!(
                err.message(),
                format!("Forbidden: role \"{role}\" is not allowed")
            );
        }

        // Admin clears the gate and trips the past-date rule instead.
        let err = api.create(bearer("admin"), Json(body)).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), "Event date cannot be in the past");

        let update = UpdateSchoolEventRequest {
            title: Some("Renamed".to_string()),
            description: None,
            date: None,
            venue: None,
        };
        let err = api
            .update(
                bearer("adviser"),
                Path(uuid::Uuid::new_v4().to_string()),
                Json(update),
            )
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);
    }

    #[tokio::test]
    async fn guests_can_browse_without_a_token() {
        let api = setup().await;

        let listed = api
            .list(
                Header(None),
                Query(None),
                Query(None),
                Query(None),
                Query(None),
                Query(None),
                Query(None),
                Query(None),
            )
            .await
            .unwrap();
        assert!(listed.0.items.is_empty());

        let err = api
            .get(Header(None), Path(uuid::Uuid::new_v4().to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);

        let err = api
            .delete(bearer("officer"), Path(uuid::Uuid::new_v4().to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);
    }
}
