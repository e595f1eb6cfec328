use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use super::common::PageMeta;
use crate::types::db::audit_log;

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct AuditLogResponse {
    pub id: i64,
    pub user_id: String,
    pub action: String,
    pub created_at: i64,
}

impl From<audit_log::Model> for AuditLogResponse {
    fn from(model: audit_log::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            action: model.action,
            created_at: model.created_at,
        }
    }
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct AuditLogListResponse {
    pub items: Vec<AuditLogResponse>,
    pub meta: PageMeta,
}
