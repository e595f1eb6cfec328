use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::fmt;

use crate::errors::{ApiError, InternalError};
use crate::types::db::user;
use crate::types::internal::auth::Claims;

/// Issues and verifies HS256 bearer tokens.
pub struct TokenService {
    secret: String,
    issuer: String,
    expiry_seconds: i64,
}

impl TokenService {
    pub fn new(secret: String, issuer: String, expiry_seconds: i64) -> Self {
        Self {
            secret,
            issuer,
            expiry_seconds,
        }
    }

    /// Sign a token carrying the user's identity claims.
    pub fn issue(&self, user: &user::Model) -> Result<String, InternalError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            exp: now + self.expiry_seconds,
            iat: now,
            iss: self.issuer.clone(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| InternalError::crypto("issue_token", e.to_string()))
    }

    /// Verify a bearer token and return its claims.
    ///
    /// Expired tokens are distinguished from every other failure so
    /// clients can prompt for a fresh sign-in.
    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => {
                ApiError::unauthorized("Token expired, Please Login Again")
            }
            _ => ApiError::unauthorized("Invalid token"),
        })?;

        Ok(data.claims)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("expiry_seconds", &self.expiry_seconds)
            .finish()
    }
}
