// Services layer - business rules between the API and the stores.
// Each method validates input, checks referential and business
// constraints, performs the store operation, and records an audit row.
pub mod audit_log_service;
pub mod auth_service;
pub mod calendar_entry_service;
pub mod crypto;
pub mod event_notification_service;
pub mod officer_service;
pub mod organization_service;
pub mod otp_service;
pub mod report_service;
pub mod school_event_service;
pub mod token_service;
pub mod user_service;

pub use audit_log_service::AuditLogService;
pub use auth_service::AuthService;
pub use calendar_entry_service::CalendarEntryService;
pub use event_notification_service::EventNotificationService;
pub use officer_service::OfficerService;
pub use organization_service::OrganizationService;
pub use otp_service::OtpService;
pub use report_service::ReportService;
pub use school_event_service::SchoolEventService;
pub use token_service::TokenService;
pub use user_service::UserService;

use crate::stores::AuditStore;
use crate::types::internal::action::Action;

/// Record an audit row for a completed operation. Audit failures are
/// logged and swallowed; the operation itself already succeeded.
pub(crate) async fn record_audit(store: &AuditStore, user_id: &str, action: Action) {
    if let Err(err) = store.record(user_id, action).await {
        tracing::warn!(error = %err, action = %action, "failed to record audit entry");
    }
}
