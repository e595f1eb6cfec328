// API layer - poem-openapi endpoint structs, one per resource.
pub mod audit_logs;
pub mod auth;
pub mod calendar_entries;
pub mod event_notifications;
pub mod helpers;
pub mod officers;
pub mod organizations;
pub mod otp;
pub mod reports;
pub mod school_events;
pub mod users;

pub use audit_logs::AuditLogApi;
pub use auth::AuthApi;
pub use calendar_entries::CalendarEntryApi;
pub use event_notifications::EventNotificationApi;
pub use officers::OfficerApi;
pub use organizations::OrganizationApi;
pub use otp::OtpApi;
pub use reports::ReportApi;
pub use school_events::SchoolEventApi;
pub use users::UserApi;

use poem_openapi::{auth::Bearer, SecurityScheme, Tags};

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    key_name = "Authorization",
    key_in = "header",
    bearer_format = "JWT"
)]
pub struct BearerAuth(pub Bearer);

#[derive(Tags)]
pub enum ApiTags {
    /// Sign-up, sign-in, profile, and password reset
    Auth,
    /// One-time password lifecycle for password reset
    Otp,
    /// User account administration
    Users,
    /// Student organizations
    Organizations,
    /// Organization officers and terms
    Officers,
    /// School events and date-range queries
    SchoolEvents,
    /// Per-user event bookmarks
    CalendarEntries,
    /// SMS notifications for events
    EventNotifications,
    /// File-backed organization reports
    Reports,
    /// Append-only audit trail
    AuditLogs,
}
