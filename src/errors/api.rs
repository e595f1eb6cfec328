use poem_openapi::{payload::Json, ApiResponse, Object};

use crate::errors::InternalError;

/// Standardized error body for all endpoints
#[derive(Object, Debug)]
pub struct ErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Operational error types surfaced to API clients.
///
/// Validation failures aggregate every field message into one response;
/// unknown internal failures are logged server-side and surface as a
/// generic 500.
#[derive(ApiResponse, Debug)]
pub enum ApiError {
    /// Input failed schema or business-rule validation
    #[oai(status = 400)]
    Validation(Json<ErrorResponse>),

    /// Missing, invalid, or expired credentials
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),

    /// Authenticated but not allowed
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// Referenced entity does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Uniqueness or state conflict
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),

    /// Attempt or rate cap reached
    #[oai(status = 429)]
    TooManyRequests(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    Internal(Json<ErrorResponse>),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(Json(ErrorResponse {
            error: "validation_error".to_string(),
            message: message.into(),
            status_code: 400,
        }))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(Json(ErrorResponse {
            error: "unauthorized".to_string(),
            message: message.into(),
            status_code: 401,
        }))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(Json(ErrorResponse {
            error: "forbidden".to_string(),
            message: message.into(),
            status_code: 403,
        }))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(Json(ErrorResponse {
            error: "not_found".to_string(),
            message: message.into(),
            status_code: 404,
        }))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(Json(ErrorResponse {
            error: "conflict".to_string(),
            message: message.into(),
            status_code: 409,
        }))
    }

    pub fn too_many_requests(message: impl Into<String>) -> Self {
        ApiError::TooManyRequests(Json(ErrorResponse {
            error: "too_many_requests".to_string(),
            message: message.into(),
            status_code: 429,
        }))
    }

    /// Generic 500 with a safe client message
    pub fn internal() -> Self {
        ApiError::Internal(Json(ErrorResponse {
            error: "internal_error".to_string(),
            message: "Internal server error".to_string(),
            status_code: 500,
        }))
    }

    /// The message carried in the response body
    pub fn message(&self) -> &str {
        let body = match self {
            ApiError::Validation(Json(b))
            | ApiError::Unauthorized(Json(b))
            | ApiError::Forbidden(Json(b))
            | ApiError::NotFound(Json(b))
            | ApiError::Conflict(Json(b))
            | ApiError::TooManyRequests(Json(b))
            | ApiError::Internal(Json(b)) => b,
        };
        &body.message
    }

    pub fn status_code(&self) -> u16 {
        let body = match self {
            ApiError::Validation(Json(b))
            | ApiError::Unauthorized(Json(b))
            | ApiError::Forbidden(Json(b))
            | ApiError::NotFound(Json(b))
            | ApiError::Conflict(Json(b))
            | ApiError::TooManyRequests(Json(b))
            | ApiError::Internal(Json(b)) => b,
        };
        body.status_code
    }
}

impl From<InternalError> for ApiError {
    fn from(err: InternalError) -> Self {
        tracing::error!(error = %err, "internal error");
        ApiError::internal()
    }
}
