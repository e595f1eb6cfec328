// Database entity types - SeaORM models
pub mod audit_log;
pub mod calendar_entry;
pub mod event_notification;
pub mod officer;
pub mod organization;
pub mod otp;
pub mod report;
pub mod school_event;
pub mod user;
