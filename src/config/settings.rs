use std::env;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Required environment variable {0} is missing")]
    MissingVar(&'static str),

    #[error("Environment variable {name} is invalid: {reason}")]
    InvalidVar { name: &'static str, reason: String },
}

/// Application settings, loaded once at startup.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_expiry_seconds: i64,
    pub port: u16,
    pub semaphore_api_key: String,
    pub semaphore_sender_name: String,
    pub smtp_host: String,
    pub smtp_username: String,
    pub smtp_password: String,
}

impl AppSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://campushub.db?mode=rwc".to_string()),
            jwt_secret: required("JWT_SECRET")?,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "campushub".to_string()),
            jwt_expiry_seconds: parsed("JWT_EXPIRY_SECONDS", 86_400)?,
            port: parsed("PORT", 3000)?,
            semaphore_api_key: required("SEMAPHORE_API_KEY")?,
            semaphore_sender_name: env::var("SEMAPHORE_SENDER_NAME")
                .unwrap_or_else(|_| "CampusHub".to_string()),
            smtp_host: required("SMTP_HOST")?,
            smtp_username: required("SMTP_USERNAME")?,
            smtp_password: required("SMTP_PASSWORD")?,
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

fn parsed<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.parse().map_err(|e: T::Err| ConfigError::InvalidVar {
            name,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}
