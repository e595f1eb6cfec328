use std::sync::Arc;

use poem_openapi::{param::Query, payload::Json, OpenApi};

use crate::api::{helpers, ApiTags, BearerAuth};
use crate::errors::ApiError;
use crate::services::{AuditLogService, TokenService};
use crate::types::dto::audit_log::AuditLogListResponse;
use crate::types::internal::auth::Role;

/// Audit trail endpoints, admin only
pub struct AuditLogApi {
    audit_logs: Arc<AuditLogService>,
    tokens: Arc<TokenService>,
}

impl AuditLogApi {
    pub fn new(audit_logs: Arc<AuditLogService>, tokens: Arc<TokenService>) -> Self {
        Self { audit_logs, tokens }
    }
}

#[OpenApi(prefix_path = "/audit-logs", tag = "ApiTags::AuditLogs")]
impl AuditLogApi {
    /// List audit entries, newest first
    #[oai(path = "/", method = "get")]
    async fn list(
        &self,
        auth: BearerAuth,
        user_id: Query<Option<String>>,
        action: Query<Option<String>>,
        page: Query<Option<u64>>,
        limit: Query<Option<u64>>,
    ) -> Result<Json<AuditLogListResponse>, ApiError> {
        let actor = helpers::authenticate(&self.tokens, &auth.0)?;
        helpers::require_role(&actor, &[Role::Admin])?;
        Ok(Json(
            self.audit_logs
                .list(user_id.0, action.0, page.0, limit.0)
                .await?,
        ))
    }
}
