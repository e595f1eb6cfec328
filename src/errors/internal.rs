use thiserror::Error;

/// Internal error type for store and provider operations.
///
/// Never serialized to clients - endpoints convert to `ApiError`, which
/// logs the source and returns a generic 500.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error("Database error: {operation} failed: {source}")]
    Database {
        operation: String,
        #[source]
        source: sea_orm::DbErr,
    },

    #[error("Serialization error: {operation} failed: {message}")]
    Serialization { operation: String, message: String },

    #[error("Crypto error: {operation} failed: {message}")]
    Crypto { operation: String, message: String },

    #[error("Provider error: {operation} failed: {message}")]
    Provider { operation: String, message: String },
}

impl InternalError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> InternalError {
        InternalError::Database {
            operation: operation.to_string(),
            source,
        }
    }

    pub fn serialization(operation: &str, message: impl Into<String>) -> InternalError {
        InternalError::Serialization {
            operation: operation.to_string(),
            message: message.into(),
        }
    }

    pub fn crypto(operation: &str, message: impl Into<String>) -> InternalError {
        InternalError::Crypto {
            operation: operation.to_string(),
            message: message.into(),
        }
    }

    pub fn provider(operation: &str, message: impl Into<String>) -> InternalError {
        InternalError::Provider {
            operation: operation.to_string(),
            message: message.into(),
        }
    }
}
