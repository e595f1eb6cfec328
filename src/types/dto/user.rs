use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::user;
use crate::types::dto::common::PageMeta;

/// Request model for user creation and sign-up
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,

    pub email: String,

    /// Plaintext password, 8-128 characters
    pub password: String,

    /// One of admin, adviser, officer, student; defaults to student
    pub role: Option<String>,

    /// E.164 format, e.g. +639123456789
    pub phone_number: String,
}

/// Request model for user updates; at least one field is required
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub phone_number: Option<String>,
}

/// Sanitized user representation - never carries the password hash
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub phone_number: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<user::Model> for UserResponse {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            phone_number: user.phone_number,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UserListResponse {
    pub items: Vec<UserResponse>,
    pub meta: PageMeta,
}
