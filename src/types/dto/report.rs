use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::dto::common::PageMeta;

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateReportRequest {
    pub org_id: String,
    /// One of actionPlan, bylaws, financial, proposal
    pub report_type: String,
    /// Stored file paths, each up to 255 characters
    pub file_paths: Vec<String>,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UpdateReportStatusRequest {
    /// One of pending, approved, rejected
    pub status: String,
}

#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct ReportResponse {
    pub id: String,
    pub org_id: String,
    pub submitted_by: String,
    pub report_type: String,
    pub file_paths: Vec<String>,
    pub status: String,
    pub submitted_date: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ReportListResponse {
    pub items: Vec<ReportResponse>,
    pub meta: PageMeta,
}

/// File paths for download orchestration
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ReportFilesResponse {
    pub file_paths: Vec<String>,
    pub report_type: String,
}
