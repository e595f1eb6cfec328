use std::sync::Arc;

use poem_openapi::{
    param::{Path, Query},
    payload::Json,
    OpenApi,
};

use crate::api::{helpers, ApiTags, BearerAuth};
use crate::errors::ApiError;
use crate::services::{OfficerService, TokenService};
use crate::stores::OfficerFilter;
use crate::types::dto::common::MessageResponse;
use crate::types::dto::officer::{
    CreateOfficerRequest, OfficerListResponse, OfficerResponse, UpdateOfficerRequest,
};
use crate::types::internal::auth::Role;

const WRITE_ROLES: &[Role] = &[Role::Admin];
const READ_ROLES: &[Role] = &[Role::Admin, Role::Officer];

/// Officer endpoints; writes are admin only, reads allow officers too
pub struct OfficerApi {
    officers: Arc<OfficerService>,
    tokens: Arc<TokenService>,
}

impl OfficerApi {
    pub fn new(officers: Arc<OfficerService>, tokens: Arc<TokenService>) -> Self {
        Self { officers, tokens }
    }
}

#[OpenApi(prefix_path = "/officers", tag = "ApiTags::Officers")]
impl OfficerApi {
    /// Appoint a user as an officer of an organization
    #[oai(path = "/", method = "post")]
    async fn create(
        &self,
        auth: BearerAuth,
        body: Json<CreateOfficerRequest>,
    ) -> Result<Json<OfficerResponse>, ApiError> {
        let actor = helpers::authenticate(&self.tokens, &auth.0)?;
        helpers::require_role(&actor, WRITE_ROLES)?;
        Ok(Json(self.officers.create(&actor.id, body.0).await?))
    }

    /// List officers with optional filters and sorting
    #[oai(path = "/", method = "get")]
    async fn list(
        &self,
        auth: BearerAuth,
        org_id: Query<Option<String>>,
        user_id: Query<Option<String>>,
        position: Query<Option<String>>,
        sort_by: Query<Option<String>>,
        order: Query<Option<String>>,
        page: Query<Option<u64>>,
        limit: Query<Option<u64>>,
    ) -> Result<Json<OfficerListResponse>, ApiError> {
        let actor = helpers::authenticate(&self.tokens, &auth.0)?;
        helpers::require_role(&actor, READ_ROLES)?;
        let filter = OfficerFilter {
            org_id: org_id.0,
            user_id: user_id.0,
            position: position.0,
        };
        Ok(Json(
            self.officers
                .list(&actor.id, filter, sort_by.0, order.0, page.0, limit.0)
                .await?,
        ))
    }

    /// Fetch a single officer record
    #[oai(path = "/:id", method = "get")]
    async fn get(
        &self,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<OfficerResponse>, ApiError> {
        let actor = helpers::authenticate(&self.tokens, &auth.0)?;
        helpers::require_role(&actor, READ_ROLES)?;
        Ok(Json(self.officers.get(&actor.id, &id.0).await?))
    }

    /// Update an officer's position or term
    #[oai(path = "/:id", method = "put")]
    async fn update(
        &self,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<UpdateOfficerRequest>,
    ) -> Result<Json<OfficerResponse>, ApiError> {
        let actor = helpers::authenticate(&self.tokens, &auth.0)?;
        helpers::require_role(&actor, WRITE_ROLES)?;
        Ok(Json(self.officers.update(&actor.id, &id.0, body.0).await?))
    }

    /// Remove an officer record
    #[oai(path = "/:id", method = "delete")]
    async fn delete(
        &self,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let actor = helpers::authenticate(&self.tokens, &auth.0)?;
        helpers::require_role(&actor, WRITE_ROLES)?;
        Ok(Json(self.officers.delete(&actor.id, &id.0).await?))
    }
}
