use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::officer;
use crate::types::dto::common::PageMeta;

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateOfficerRequest {
    pub user_id: String,
    pub org_id: String,
    /// Position name, up to 50 characters
    pub position: String,
    /// Term start (Unix timestamp)
    pub start_term: i64,
    /// Term end (Unix timestamp); must be later than start_term
    pub end_term: i64,
}

/// At least one field is required. user_id and org_id may be echoed back
/// but never changed.
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UpdateOfficerRequest {
    pub user_id: Option<String>,
    pub org_id: Option<String>,
    pub position: Option<String>,
    pub start_term: Option<i64>,
    pub end_term: Option<i64>,
}

#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct OfficerResponse {
    pub id: String,
    pub user_id: String,
    pub org_id: String,
    pub position: String,
    pub start_term: i64,
    pub end_term: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<officer::Model> for OfficerResponse {
    fn from(officer: officer::Model) -> Self {
        Self {
            id: officer.id,
            user_id: officer.user_id,
            org_id: officer.org_id,
            position: officer.position,
            start_term: officer.start_term,
            end_term: officer.end_term,
            created_at: officer.created_at,
            updated_at: officer.updated_at,
        }
    }
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct OfficerListResponse {
    pub items: Vec<OfficerResponse>,
    pub meta: PageMeta,
}
