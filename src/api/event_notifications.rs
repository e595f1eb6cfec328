use std::sync::Arc;

use poem_openapi::{
    param::{Path, Query},
    payload::Json,
    OpenApi,
};

use crate::api::{helpers, ApiTags, BearerAuth};
use crate::errors::ApiError;
use crate::services::{EventNotificationService, TokenService};
use crate::types::dto::common::MessageResponse;
use crate::types::dto::event_notification::{
    BulkCreateEventNotificationRequest, BulkCreateEventNotificationResponse,
    CreateEventNotificationRequest, EventNotificationListResponse, EventNotificationResponse,
    SmsBalanceResponse, UpdateEventNotificationRequest,
};
use crate::types::internal::auth::Role;

const WRITE_ROLES: &[Role] = &[Role::Admin];
const READ_ROLES: &[Role] = &[Role::Admin, Role::Officer];

/// Event notification endpoints; sending, editing, and deleting stay
/// with admins, officers may read
pub struct EventNotificationApi {
    notifications: Arc<EventNotificationService>,
    tokens: Arc<TokenService>,
}

impl EventNotificationApi {
    pub fn new(notifications: Arc<EventNotificationService>, tokens: Arc<TokenService>) -> Self {
        Self {
            notifications,
            tokens,
        }
    }
}

#[OpenApi(prefix_path = "/event-notifications", tag = "ApiTags::EventNotifications")]
impl EventNotificationApi {
    /// Notify a single recipient about an event via SMS
    #[oai(path = "/", method = "post")]
    async fn create(
        &self,
        auth: BearerAuth,
        body: Json<CreateEventNotificationRequest>,
    ) -> Result<Json<EventNotificationResponse>, ApiError> {
        let actor = helpers::authenticate(&self.tokens, &auth.0)?;
        helpers::require_role(&actor, WRITE_ROLES)?;
        Ok(Json(self.notifications.create(&actor.id, body.0).await?))
    }

    /// Notify many recipients about an event in one call
    #[oai(path = "/bulk", method = "post")]
    async fn bulk_create(
        &self,
        auth: BearerAuth,
        body: Json<BulkCreateEventNotificationRequest>,
    ) -> Result<Json<BulkCreateEventNotificationResponse>, ApiError> {
        let actor = helpers::authenticate(&self.tokens, &auth.0)?;
        helpers::require_role(&actor, WRITE_ROLES)?;
        Ok(Json(self.notifications.bulk_create(&actor.id, body.0).await?))
    }

    /// Remaining credit balance at the SMS gateway
    #[oai(path = "/sms/balance", method = "get")]
    async fn sms_balance(&self, auth: BearerAuth) -> Result<Json<SmsBalanceResponse>, ApiError> {
        let actor = helpers::authenticate(&self.tokens, &auth.0)?;
        helpers::require_role(&actor, READ_ROLES)?;
        Ok(Json(self.notifications.sms_balance().await?))
    }

    /// List notifications with optional filters and sorting
    #[oai(path = "/", method = "get")]
    #[allow(clippy::too_many_arguments)]
    async fn list(
        &self,
        auth: BearerAuth,
        event_id: Query<Option<String>>,
        recipient_id: Query<Option<String>>,
        status: Query<Option<String>>,
        sort_by: Query<Option<String>>,
        order: Query<Option<String>>,
        page: Query<Option<u64>>,
        limit: Query<Option<u64>>,
    ) -> Result<Json<EventNotificationListResponse>, ApiError> {
        let actor = helpers::authenticate(&self.tokens, &auth.0)?;
        helpers::require_role(&actor, READ_ROLES)?;
        Ok(Json(
            self.notifications
                .list(
                    &actor.id,
                    event_id.0,
                    recipient_id.0,
                    status.0,
                    sort_by.0,
                    order.0,
                    page.0,
                    limit.0,
                )
                .await?,
        ))
    }

    /// Fetch a single notification
    #[oai(path = "/:id", method = "get")]
    async fn get(
        &self,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<EventNotificationResponse>, ApiError> {
        let actor = helpers::authenticate(&self.tokens, &auth.0)?;
        helpers::require_role(&actor, READ_ROLES)?;
        Ok(Json(self.notifications.get(&actor.id, &id.0).await?))
    }

    /// Update a notification's message or status
    #[oai(path = "/:id", method = "put")]
    async fn update(
        &self,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<UpdateEventNotificationRequest>,
    ) -> Result<Json<EventNotificationResponse>, ApiError> {
        let actor = helpers::authenticate(&self.tokens, &auth.0)?;
        helpers::require_role(&actor, WRITE_ROLES)?;
        Ok(Json(self.notifications.update(&actor.id, &id.0, body.0).await?))
    }

    /// Delete a notification record
    #[oai(path = "/:id", method = "delete")]
    async fn delete(
        &self,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let actor = helpers::authenticate(&self.tokens, &auth.0)?;
        helpers::require_role(&actor, WRITE_ROLES)?;
        Ok(Json(self.notifications.delete(&actor.id, &id.0).await?))
    }
}
