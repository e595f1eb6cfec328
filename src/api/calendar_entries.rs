use std::sync::Arc;

use poem_openapi::{
    param::{Path, Query},
    payload::Json,
    OpenApi,
};

use crate::api::{helpers, ApiTags, BearerAuth};
use crate::errors::ApiError;
use crate::services::{CalendarEntryService, TokenService};
use crate::types::dto::calendar_entry::{
    CalendarEntryListResponse, CalendarEntryResponse, CalendarEntryWithEventResponse,
    CreateCalendarEntryRequest, UpdateCalendarEntryRequest,
};
use crate::types::dto::common::MessageResponse;

/// Calendar entry endpoints, available to any authenticated user
pub struct CalendarEntryApi {
    entries: Arc<CalendarEntryService>,
    tokens: Arc<TokenService>,
}

impl CalendarEntryApi {
    pub fn new(entries: Arc<CalendarEntryService>, tokens: Arc<TokenService>) -> Self {
        Self { entries, tokens }
    }
}

#[OpenApi(prefix_path = "/calendar-entries", tag = "ApiTags::CalendarEntries")]
impl CalendarEntryApi {
    /// Bookmark an event on a user's calendar
    #[oai(path = "/", method = "post")]
    async fn create(
        &self,
        auth: BearerAuth,
        body: Json<CreateCalendarEntryRequest>,
    ) -> Result<Json<CalendarEntryWithEventResponse>, ApiError> {
        let actor = helpers::authenticate(&self.tokens, &auth.0)?;
        Ok(Json(self.entries.create(&actor.id, body.0).await?))
    }

    /// List calendar entries with optional filters
    #[oai(path = "/", method = "get")]
    async fn list(
        &self,
        auth: BearerAuth,
        event_id: Query<Option<String>>,
        created_by: Query<Option<String>>,
        page: Query<Option<u64>>,
        limit: Query<Option<u64>>,
    ) -> Result<Json<CalendarEntryListResponse>, ApiError> {
        let actor = helpers::authenticate(&self.tokens, &auth.0)?;
        Ok(Json(
            self.entries
                .list(&actor.id, event_id.0, created_by.0, page.0, limit.0)
                .await?,
        ))
    }

    /// Fetch a single calendar entry
    #[oai(path = "/:id", method = "get")]
    async fn get(
        &self,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<CalendarEntryResponse>, ApiError> {
        let actor = helpers::authenticate(&self.tokens, &auth.0)?;
        Ok(Json(self.entries.get(&actor.id, &id.0).await?))
    }

    /// Re-point a calendar entry at another event or owner
    #[oai(path = "/:id", method = "put")]
    async fn update(
        &self,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<UpdateCalendarEntryRequest>,
    ) -> Result<Json<CalendarEntryResponse>, ApiError> {
        let actor = helpers::authenticate(&self.tokens, &auth.0)?;
        Ok(Json(self.entries.update(&actor.id, &id.0, body.0).await?))
    }

    /// Remove a calendar entry
    #[oai(path = "/:id", method = "delete")]
    async fn delete(
        &self,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let actor = helpers::authenticate(&self.tokens, &auth.0)?;
        Ok(Json(self.entries.delete(&actor.id, &id.0).await?))
    }
}
