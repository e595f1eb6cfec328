use poem_openapi::Object;
use serde::{Deserialize, Serialize};

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct SendOtpRequest {
    pub email: String,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    /// 6-digit code
    pub otp: String,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct SendOtpResponse {
    pub email: String,
    /// Expiry of the issued code (Unix timestamp)
    pub expires_at: i64,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct VerifyOtpResponse {
    pub email: String,
    pub verified: bool,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CleanupOtpResponse {
    pub message: String,
    pub deleted_count: u64,
}
