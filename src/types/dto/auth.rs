use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::dto::user::UserResponse;

/// Request model for sign-in; the identifier may be a username or email
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct SignInRequest {
    pub identifier: String,
    pub password: String,
}

/// Response model for sign-in
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct SignInResponse {
    pub user: UserResponse,

    /// Signed bearer token for subsequent requests
    pub token: String,
}

/// Request model for the OTP-backed password reset
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,

    /// 6-digit code previously delivered by email
    pub otp: String,

    pub new_password: String,
}
