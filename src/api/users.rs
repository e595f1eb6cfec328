use std::sync::Arc;

use poem_openapi::{
    param::{Path, Query},
    payload::Json,
    OpenApi,
};

use crate::api::{helpers, ApiTags, BearerAuth};
use crate::errors::ApiError;
use crate::services::{TokenService, UserService};
use crate::stores::UserFilter;
use crate::types::dto::common::MessageResponse;
use crate::types::dto::user::{CreateUserRequest, UpdateUserRequest, UserListResponse, UserResponse};
use crate::types::internal::auth::Role;

/// User administration endpoints, admin only
pub struct UserApi {
    users: Arc<UserService>,
    tokens: Arc<TokenService>,
}

impl UserApi {
    pub fn new(users: Arc<UserService>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }
}

#[OpenApi(prefix_path = "/users", tag = "ApiTags::Users")]
impl UserApi {
    /// Create a user account
    #[oai(path = "/", method = "post")]
    async fn create(
        &self,
        auth: BearerAuth,
        body: Json<CreateUserRequest>,
    ) -> Result<Json<UserResponse>, ApiError> {
        let actor = helpers::authenticate(&self.tokens, &auth.0)?;
        helpers::require_role(&actor, &[Role::Admin])?;
        Ok(Json(self.users.create(&actor.id, body.0).await?))
    }

    /// List users with optional filters
    #[oai(path = "/", method = "get")]
    async fn list(
        &self,
        auth: BearerAuth,
        username: Query<Option<String>>,
        email: Query<Option<String>>,
        role: Query<Option<String>>,
        phone_number: Query<Option<String>>,
        page: Query<Option<u64>>,
        limit: Query<Option<u64>>,
    ) -> Result<Json<UserListResponse>, ApiError> {
        let actor = helpers::authenticate(&self.tokens, &auth.0)?;
        helpers::require_role(&actor, &[Role::Admin])?;
        let filter = UserFilter {
            username: username.0,
            email: email.0,
            role: role.0,
            phone_number: phone_number.0,
        };
        Ok(Json(self.users.list(&actor.id, filter, page.0, limit.0).await?))
    }

    /// Fetch a single user
    #[oai(path = "/:id", method = "get")]
    async fn get(&self, auth: BearerAuth, id: Path<String>) -> Result<Json<UserResponse>, ApiError> {
        let actor = helpers::authenticate(&self.tokens, &auth.0)?;
        helpers::require_role(&actor, &[Role::Admin])?;
        Ok(Json(self.users.get(&actor.id, &id.0).await?))
    }

    /// Update a user; at least one field is required
    #[oai(path = "/:id", method = "put")]
    async fn update(
        &self,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<UpdateUserRequest>,
    ) -> Result<Json<UserResponse>, ApiError> {
        let actor = helpers::authenticate(&self.tokens, &auth.0)?;
        helpers::require_role(&actor, &[Role::Admin])?;
        Ok(Json(self.users.update(&actor.id, &id.0, body.0).await?))
    }

    /// Delete a user
    #[oai(path = "/:id", method = "delete")]
    async fn delete(
        &self,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let actor = helpers::authenticate(&self.tokens, &auth.0)?;
        helpers::require_role(&actor, &[Role::Admin])?;
        Ok(Json(self.users.delete(&actor.id, &id.0).await?))
    }
}
