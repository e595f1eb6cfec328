use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::organization;
use crate::types::dto::common::PageMeta;

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateOrganizationRequest {
    pub org_name: String,
    pub description: Option<String>,
    /// User id of the assigned adviser
    pub adviser_id: String,
}

/// At least one field is required
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UpdateOrganizationRequest {
    pub org_name: Option<String>,
    pub description: Option<String>,
    pub adviser_id: Option<String>,
}

#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationResponse {
    pub id: String,
    pub org_name: String,
    pub description: Option<String>,
    pub adviser_id: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<organization::Model> for OrganizationResponse {
    fn from(org: organization::Model) -> Self {
        Self {
            id: org.id,
            org_name: org.org_name,
            description: org.description,
            adviser_id: org.adviser_id,
            created_at: org.created_at,
            updated_at: org.updated_at,
        }
    }
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct OrganizationListResponse {
    pub items: Vec<OrganizationResponse>,
    pub meta: PageMeta,
}
