use std::sync::Arc;

use poem_openapi::{
    param::{Path, Query},
    payload::Json,
    OpenApi,
};

use crate::api::{helpers, ApiTags, BearerAuth};
use crate::errors::ApiError;
use crate::services::{ReportService, TokenService};
use crate::stores::ReportFilter;
use crate::types::dto::common::MessageResponse;
use crate::types::dto::report::{
    CreateReportRequest, ReportFilesResponse, ReportListResponse, ReportResponse,
    UpdateReportStatusRequest,
};
use crate::types::internal::auth::Role;

const SUBMIT_ROLES: &[Role] = &[Role::Admin, Role::Officer];

/// Report endpoints; submission and reads are shared with officers,
/// the file listing, approval workflow, and deletion stay with admins.
pub struct ReportApi {
    reports: Arc<ReportService>,
    tokens: Arc<TokenService>,
}

impl ReportApi {
    pub fn new(reports: Arc<ReportService>, tokens: Arc<TokenService>) -> Self {
        Self { reports, tokens }
    }
}

#[OpenApi(prefix_path = "/reports", tag = "ApiTags::Reports")]
impl ReportApi {
    /// Submit a report for an organization
    #[oai(path = "/", method = "post")]
    async fn create(
        &self,
        auth: BearerAuth,
        body: Json<CreateReportRequest>,
    ) -> Result<Json<ReportResponse>, ApiError> {
        let actor = helpers::authenticate(&self.tokens, &auth.0)?;
        helpers::require_role(&actor, SUBMIT_ROLES)?;
        Ok(Json(self.reports.create(&actor.id, body.0).await?))
    }

    /// List reports with optional filters
    #[oai(path = "/", method = "get")]
    async fn list(
        &self,
        auth: BearerAuth,
        org_id: Query<Option<String>>,
        report_type: Query<Option<String>>,
        submitted_by: Query<Option<String>>,
        status: Query<Option<String>>,
        order: Query<Option<String>>,
        page: Query<Option<u64>>,
        limit: Query<Option<u64>>,
    ) -> Result<Json<ReportListResponse>, ApiError> {
        let actor = helpers::authenticate(&self.tokens, &auth.0)?;
        helpers::require_role(&actor, SUBMIT_ROLES)?;
        let filter = ReportFilter {
            org_id: org_id.0,
            report_type: report_type.0,
            submitted_by: submitted_by.0,
            status: status.0,
        };
        Ok(Json(
            self.reports
                .list(&actor.id, filter, order.0, page.0, limit.0)
                .await?,
        ))
    }

    /// Fetch a single report
    #[oai(path = "/:id", method = "get")]
    async fn get(
        &self,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<ReportResponse>, ApiError> {
        let actor = helpers::authenticate(&self.tokens, &auth.0)?;
        helpers::require_role(&actor, SUBMIT_ROLES)?;
        Ok(Json(self.reports.get(&actor.id, &id.0).await?))
    }

    /// File paths and report type for download orchestration
    #[oai(path = "/:id/files", method = "get")]
    async fn files(
        &self,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<ReportFilesResponse>, ApiError> {
        let actor = helpers::authenticate(&self.tokens, &auth.0)?;
        helpers::require_role(&actor, &[Role::Admin])?;
        Ok(Json(self.reports.files(&actor.id, &id.0).await?))
    }

    /// Approve, reject, or reopen a report
    #[oai(path = "/:id/status", method = "put")]
    async fn update_status(
        &self,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<UpdateReportStatusRequest>,
    ) -> Result<Json<ReportResponse>, ApiError> {
        let actor = helpers::authenticate(&self.tokens, &auth.0)?;
        helpers::require_role(&actor, &[Role::Admin])?;
        Ok(Json(self.reports.update_status(&actor.id, &id.0, body.0).await?))
    }

    /// Delete a report
    #[oai(path = "/:id", method = "delete")]
    async fn delete(
        &self,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let actor = helpers::authenticate(&self.tokens, &auth.0)?;
        helpers::require_role(&actor, &[Role::Admin])?;
        Ok(Json(self.reports.delete(&actor.id, &id.0).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use poem_openapi::auth::Bearer;
    use sea_orm::Database;

    use crate::stores::{AuditStore, OrganizationStore, ReportStore};
    use crate::types::db::user;

    fn token_service() -> Arc<TokenService> {
        Arc::new(TokenService::new(
            "test-secret-key-minimum-32-characters-long".to_string(),
            "campushub-test".to_string(),
            3600,
        ))
    }

    fn bearer(role: &str) -> BearerAuth {
        let user = user::Model {
            id: uuid::Uuid::new_v4().to_string(),
            username: format!("{role}-user"),
            email: format!("{role}@example.com"),
            password_hash: "irrelevant".to_string(),
            role: role.to_string(),
            phone_number: None,
            created_at: 0,
            updated_at: 0,
        };
        BearerAuth(Bearer {
            token: token_service().issue(&user).unwrap(),
        })
    }

    async fn setup() -> ReportApi {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        let service = ReportService::new(
            Arc::new(ReportStore::new(db.clone())),
            Arc::new(OrganizationStore::new(db.clone())),
            Arc::new(AuditStore::new(db)),
        );
        ReportApi::new(Arc::new(service), token_service())
    }

    fn create_request() -> CreateReportRequest {
        CreateReportRequest {
            org_id: uuid::Uuid::new_v4().to_string(),
            report_type: "financial".to_string(),
            file_paths: vec!["reports/q1.pdf".to_string()],
        }
    }

    #[tokio::test]
    async fn submission_and_reads_are_for_admins_and_officers() {
        let api = setup().await;

        for role in ["adviser", "student"] {
            let err = api
                .create(bearer(role), Json(create_request()))
                .await
                .unwrap_err();
            assert_eq!(err.status_code(), 403);
            assert_eq!(
                err.message(),
                format!("Forbidden: role \"{role}\" is not allowed")
            );
        }

        // Officer clears the gate and fails on the missing organization.
        let err = api
            .create(bearer("officer"), Json(create_request()))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.message(), "Organization not found");

        assert!(api
            .list(
                bearer("officer"),
                Query(None),
                Query(None),
                Query(None),
                Query(None),
                Query(None),
                Query(None),
                Query(None),
            )
            .await
            .is_ok());
        let err = api
            .list(
                bearer("adviser"),
                Query(None),
                Query(None),
                Query(None),
                Query(None),
                Query(None),
                Query(None),
                Query(None),
            )
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);
    }

    #[tokio::test]
    async fn file_listing_workflow_and_deletion_stay_with_admins() {
        let api = setup().await;
        let id = uuid::Uuid::new_v4().to_string();

        let err = api
            .files(bearer("officer"), Path(id.clone()))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);
        let err = api
            .files(bearer("admin"), Path(id.clone()))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);

        let body = UpdateReportStatusRequest {
            status: "approved".to_string(),
        };
        let err = api
            .update_status(bearer("officer"), Path(id.clone()), Json(body))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);

        let err = api
            .delete(bearer("officer"), Path(id))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);
    }
}
