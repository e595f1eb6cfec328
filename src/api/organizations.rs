use std::sync::Arc;

use poem_openapi::{
    param::{Path, Query},
    payload::Json,
    OpenApi,
};

use crate::api::{helpers, ApiTags, BearerAuth};
use crate::errors::ApiError;
use crate::services::{OrganizationService, TokenService};
use crate::stores::OrganizationFilter;
use crate::types::dto::common::MessageResponse;
use crate::types::dto::organization::{
    CreateOrganizationRequest, OrganizationListResponse, OrganizationResponse,
    UpdateOrganizationRequest,
};
use crate::types::internal::auth::Role;

/// Organization endpoints; admins and advisers may create, reads are
/// shared with officers, updates and deletes stay with admins
pub struct OrganizationApi {
    organizations: Arc<OrganizationService>,
    tokens: Arc<TokenService>,
}

impl OrganizationApi {
    pub fn new(organizations: Arc<OrganizationService>, tokens: Arc<TokenService>) -> Self {
        Self {
            organizations,
            tokens,
        }
    }
}

#[OpenApi(prefix_path = "/organizations", tag = "ApiTags::Organizations")]
impl OrganizationApi {
    /// Create an organization
    #[oai(path = "/", method = "post")]
    async fn create(
        &self,
        auth: BearerAuth,
        body: Json<CreateOrganizationRequest>,
    ) -> Result<Json<OrganizationResponse>, ApiError> {
        let actor = helpers::authenticate(&self.tokens, &auth.0)?;
        helpers::require_role(&actor, &[Role::Admin, Role::Adviser])?;
        Ok(Json(self.organizations.create(&actor.id, body.0).await?))
    }

    /// List organizations with optional filters
    #[oai(path = "/", method = "get")]
    async fn list(
        &self,
        auth: BearerAuth,
        org_name: Query<Option<String>>,
        adviser_id: Query<Option<String>>,
        page: Query<Option<u64>>,
        limit: Query<Option<u64>>,
    ) -> Result<Json<OrganizationListResponse>, ApiError> {
        let actor = helpers::authenticate(&self.tokens, &auth.0)?;
        helpers::require_role(&actor, &[Role::Admin, Role::Officer, Role::Adviser])?;
        let filter = OrganizationFilter {
            org_name: org_name.0,
            adviser_id: adviser_id.0,
        };
        Ok(Json(
            self.organizations
                .list(&actor.id, filter, page.0, limit.0)
                .await?,
        ))
    }

    /// Fetch a single organization
    #[oai(path = "/:id", method = "get")]
    async fn get(
        &self,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<OrganizationResponse>, ApiError> {
        let actor = helpers::authenticate(&self.tokens, &auth.0)?;
        helpers::require_role(&actor, &[Role::Admin, Role::Officer])?;
        Ok(Json(self.organizations.get(&actor.id, &id.0).await?))
    }

    /// Update an organization; at least one field is required
    #[oai(path = "/:id", method = "put")]
    async fn update(
        &self,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<UpdateOrganizationRequest>,
    ) -> Result<Json<OrganizationResponse>, ApiError> {
        let actor = helpers::authenticate(&self.tokens, &auth.0)?;
        helpers::require_role(&actor, &[Role::Admin])?;
        Ok(Json(
            self.organizations.update(&actor.id, &id.0, body.0).await?,
        ))
    }

    /// Delete an organization
    #[oai(path = "/:id", method = "delete")]
    async fn delete(
        &self,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let actor = helpers::authenticate(&self.tokens, &auth.0)?;
        helpers::require_role(&actor, &[Role::Admin])?;
        Ok(Json(self.organizations.delete(&actor.id, &id.0).await?))
    }
}
