// Stores layer - database access, one store per entity
pub mod audit_store;
pub mod calendar_entry_store;
pub mod event_notification_store;
pub mod officer_store;
pub mod organization_store;
pub mod otp_store;
pub mod report_store;
pub mod school_event_store;
pub mod user_store;

pub use audit_store::AuditStore;
pub use calendar_entry_store::CalendarEntryStore;
pub use event_notification_store::{EventNotificationStore, NotificationSortKey};
pub use officer_store::{OfficerFilter, OfficerSortKey, OfficerStore};
pub use organization_store::{OrganizationFilter, OrganizationStore};
pub use otp_store::OtpStore;
pub use report_store::{ReportFilter, ReportStore};
pub use school_event_store::{EventWindow, SchoolEventFilter, SchoolEventStore};
pub use user_store::{UserFilter, UserStore};
