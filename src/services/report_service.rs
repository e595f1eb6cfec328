use chrono::Utc;
use sea_orm::Set;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::{ApiError, InternalError};
use crate::services::record_audit;
use crate::stores::{AuditStore, OrganizationStore, ReportFilter, ReportStore};
use crate::types::db::report;
use crate::types::dto::common::{MessageResponse, PageMeta};
use crate::types::dto::report::{
    CreateReportRequest, ReportFilesResponse, ReportListResponse, ReportResponse,
    UpdateReportStatusRequest,
};
use crate::types::internal::action::Action;
use crate::validation::{self, fields};

const REPORT_TYPES: [&str; 4] = ["actionPlan", "bylaws", "financial", "proposal"];
const STATUSES: [&str; 3] = ["pending", "approved", "rejected"];

/// Organization report submissions and their approval workflow.
/// File paths are stored as a JSON array in one column.
pub struct ReportService {
    reports: Arc<ReportStore>,
    orgs: Arc<OrganizationStore>,
    audit: Arc<AuditStore>,
}

impl ReportService {
    pub fn new(
        reports: Arc<ReportStore>,
        orgs: Arc<OrganizationStore>,
        audit: Arc<AuditStore>,
    ) -> Self {
        Self {
            reports,
            orgs,
            audit,
        }
    }

    pub async fn create(
        &self,
        actor_id: &str,
        req: CreateReportRequest,
    ) -> Result<ReportResponse, ApiError> {
        let mut errors = Vec::new();
        errors.extend(fields::entity_id(&req.org_id, "organization"));
        if !REPORT_TYPES.contains(&req.report_type.as_str()) {
            errors.push(
                "Report type must be one of: actionPlan, bylaws, financial, proposal".to_string(),
            );
        }
        if req.file_paths.is_empty() {
            errors.push("At least one file is required".to_string());
        }
        for path in &req.file_paths {
            errors.extend(fields::required(path, "File path"));
            errors.extend(fields::max_length(path, 255, "File path"));
        }
        validation::finish(errors)?;

        if self.orgs.find_by_id(&req.org_id).await?.is_none() {
            return Err(ApiError::not_found("Organization not found"));
        }

        let now = Utc::now().timestamp();
        let record = report::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            org_id: Set(req.org_id),
            submitted_by: Set(actor_id.to_string()),
            report_type: Set(req.report_type),
            file_paths: Set(encode_file_paths(&req.file_paths)?),
            status: Set("pending".to_string()),
            submitted_date: Set(now),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let report = self.reports.insert(record).await?;
        record_audit(&self.audit, actor_id, Action::ReportCreate).await;
        to_response(report).map_err(ApiError::from)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn list(
        &self,
        actor_id: &str,
        filter: ReportFilter,
        order: Option<String>,
        page: Option<u64>,
        limit: Option<u64>,
    ) -> Result<ReportListResponse, ApiError> {
        let mut errors = Vec::new();
        let (page, limit) = validation::page_params(page, limit, &mut errors);
        if let Some(org_id) = &filter.org_id {
            errors.extend(fields::entity_id(org_id, "organization"));
        }
        if let Some(submitted_by) = &filter.submitted_by {
            errors.extend(fields::entity_id(submitted_by, "user"));
        }
        if let Some(report_type) = &filter.report_type {
            if !REPORT_TYPES.contains(&report_type.as_str()) {
                errors.push(
                    "Report type must be one of: actionPlan, bylaws, financial, proposal"
                        .to_string(),
                );
            }
        }
        if let Some(status) = &filter.status {
            if !STATUSES.contains(&status.as_str()) {
                errors.push("Status must be one of: pending, approved, rejected".to_string());
            }
        }
        let ascending = match order.as_deref() {
            None | Some("desc") => false,
            Some("asc") => true,
            Some(_) => {
                errors.push("Order must be either asc or desc".to_string());
                false
            }
        };
        validation::finish(errors)?;

        let (reports, total) = self.reports.list(filter, ascending, page, limit).await?;
        record_audit(&self.audit, actor_id, Action::ReportList).await;

        let items = reports
            .into_iter()
            .map(to_response)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ReportListResponse {
            items,
            meta: PageMeta::new(page, limit, total),
        })
    }

    pub async fn get(&self, actor_id: &str, id: &str) -> Result<ReportResponse, ApiError> {
        let report = self.find(id).await?;
        record_audit(&self.audit, actor_id, Action::ReportDetail).await;
        to_response(report).map_err(ApiError::from)
    }

    /// File paths for download orchestration by the caller.
    pub async fn files(&self, actor_id: &str, id: &str) -> Result<ReportFilesResponse, ApiError> {
        let report = self.find(id).await?;
        let file_paths = decode_file_paths(&report.file_paths)?;
        record_audit(&self.audit, actor_id, Action::ReportDownload).await;
        Ok(ReportFilesResponse {
            file_paths,
            report_type: report.report_type,
        })
    }

    pub async fn update_status(
        &self,
        actor_id: &str,
        id: &str,
        req: UpdateReportStatusRequest,
    ) -> Result<ReportResponse, ApiError> {
        let mut errors = Vec::new();
        errors.extend(fields::entity_id(id, "report"));
        if !STATUSES.contains(&req.status.as_str()) {
            errors.push("Status must be one of: pending, approved, rejected".to_string());
        }
        validation::finish(errors)?;

        self.find(id).await?;
        let updated = self
            .reports
            .update_status(id, &req.status, Utc::now().timestamp())
            .await?;
        record_audit(&self.audit, actor_id, Action::ReportStatusUpdate).await;
        to_response(updated).map_err(ApiError::from)
    }

    pub async fn delete(&self, actor_id: &str, id: &str) -> Result<MessageResponse, ApiError> {
        self.find(id).await?;
        self.reports.delete(id).await?;
        record_audit(&self.audit, actor_id, Action::ReportDelete).await;
        Ok(MessageResponse {
            message: "Report deleted successfully".to_string(),
        })
    }

    async fn find(&self, id: &str) -> Result<report::Model, ApiError> {
        validation::finish(fields::entity_id(id, "report").into_iter().collect())?;
        self.reports
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Report not found"))
    }
}

fn encode_file_paths(paths: &[String]) -> Result<String, ApiError> {
    serde_json::to_string(paths)
        .map_err(|e| InternalError::serialization("encode_file_paths", e.to_string()).into())
}

fn decode_file_paths(raw: &str) -> Result<Vec<String>, InternalError> {
    serde_json::from_str(raw)
        .map_err(|e| InternalError::serialization("decode_file_paths", e.to_string()))
}

fn to_response(report: report::Model) -> Result<ReportResponse, InternalError> {
    let file_paths = decode_file_paths(&report.file_paths)?;
    Ok(ReportResponse {
        id: report.id,
        org_id: report.org_id,
        submitted_by: report.submitted_by,
        report_type: report.report_type,
        file_paths,
        status: report.status,
        submitted_date: report.submitted_date,
        created_at: report.created_at,
        updated_at: report.updated_at,
    })
}
