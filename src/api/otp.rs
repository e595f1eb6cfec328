use std::sync::Arc;

use poem_openapi::{payload::Json, OpenApi};

use crate::api::{helpers, ApiTags, BearerAuth};
use crate::errors::ApiError;
use crate::services::{OtpService, TokenService};
use crate::types::dto::otp::{
    CleanupOtpResponse, SendOtpRequest, SendOtpResponse, VerifyOtpRequest, VerifyOtpResponse,
};
use crate::types::internal::auth::Role;

/// OTP endpoints; send/resend/verify are public since they precede
/// authentication, cleanup is an admin maintenance surface.
pub struct OtpApi {
    otps: Arc<OtpService>,
    tokens: Arc<TokenService>,
}

impl OtpApi {
    pub fn new(otps: Arc<OtpService>, tokens: Arc<TokenService>) -> Self {
        Self { otps, tokens }
    }
}

#[OpenApi(prefix_path = "/otp", tag = "ApiTags::Otp")]
impl OtpApi {
    /// Email a fresh password-reset code
    #[oai(path = "/send", method = "post")]
    async fn send(&self, body: Json<SendOtpRequest>) -> Result<Json<SendOtpResponse>, ApiError> {
        Ok(Json(self.otps.send(body.0).await?))
    }

    /// Re-email a code once the previous one has expired
    #[oai(path = "/resend", method = "post")]
    async fn resend(&self, body: Json<SendOtpRequest>) -> Result<Json<SendOtpResponse>, ApiError> {
        Ok(Json(self.otps.resend(body.0).await?))
    }

    /// Check a code against the latest outstanding OTP
    #[oai(path = "/verify", method = "post")]
    async fn verify(
        &self,
        body: Json<VerifyOtpRequest>,
    ) -> Result<Json<VerifyOtpResponse>, ApiError> {
        Ok(Json(self.otps.verify(body.0).await?))
    }

    /// Purge expired OTP rows
    #[oai(path = "/cleanup", method = "delete")]
    async fn cleanup(&self, auth: BearerAuth) -> Result<Json<CleanupOtpResponse>, ApiError> {
        let actor = helpers::authenticate(&self.tokens, &auth.0)?;
        helpers::require_role(&actor, &[Role::Admin])?;
        Ok(Json(self.otps.cleanup(&actor.id).await?))
    }
}
