use std::sync::Arc;

use poem_openapi::{payload::Json, OpenApi};

use crate::api::{helpers, ApiTags, BearerAuth};
use crate::errors::ApiError;
use crate::services::{AuthService, TokenService};
use crate::types::dto::auth::{ResetPasswordRequest, SignInRequest, SignInResponse};
use crate::types::dto::common::MessageResponse;
use crate::types::dto::user::{CreateUserRequest, UserResponse};

/// Authentication endpoints
pub struct AuthApi {
    auth: Arc<AuthService>,
    tokens: Arc<TokenService>,
}

impl AuthApi {
    pub fn new(auth: Arc<AuthService>, tokens: Arc<TokenService>) -> Self {
        Self { auth, tokens }
    }
}

#[OpenApi(prefix_path = "/auth", tag = "ApiTags::Auth")]
impl AuthApi {
    /// Register a new account
    #[oai(path = "/sign-up", method = "post")]
    async fn sign_up(&self, body: Json<CreateUserRequest>) -> Result<Json<UserResponse>, ApiError> {
        Ok(Json(self.auth.sign_up(body.0).await?))
    }

    /// Sign in with a username or email and receive a bearer token
    #[oai(path = "/sign-in", method = "post")]
    async fn sign_in(&self, body: Json<SignInRequest>) -> Result<Json<SignInResponse>, ApiError> {
        Ok(Json(self.auth.sign_in(body.0).await?))
    }

    /// Return the authenticated user's own account
    #[oai(path = "/profile", method = "get")]
    async fn profile(&self, auth: BearerAuth) -> Result<Json<UserResponse>, ApiError> {
        let actor = helpers::authenticate(&self.tokens, &auth.0)?;
        Ok(Json(self.auth.profile(&actor).await?))
    }

    /// Reset a password with a previously emailed OTP
    #[oai(path = "/reset-password", method = "post")]
    async fn reset_password(
        &self,
        body: Json<ResetPasswordRequest>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        Ok(Json(self.auth.reset_password(body.0).await?))
    }
}
