use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::providers::{EmailSender, SmsGateway};
use crate::services::{
    AuditLogService, AuthService, CalendarEntryService, EventNotificationService, OfficerService,
    OrganizationService, OtpService, ReportService, SchoolEventService, TokenService, UserService,
};
use crate::stores::{
    AuditStore, CalendarEntryStore, EventNotificationStore, OfficerStore, OrganizationStore,
    OtpStore, ReportStore, SchoolEventStore, UserStore,
};

/// Stores and services built once at startup and shared across the API
/// structs. Stores are created here so each service holds the same
/// `Arc` rather than its own copy.
pub struct AppData {
    pub token_service: Arc<TokenService>,
    pub auth_service: Arc<AuthService>,
    pub otp_service: Arc<OtpService>,
    pub user_service: Arc<UserService>,
    pub organization_service: Arc<OrganizationService>,
    pub officer_service: Arc<OfficerService>,
    pub school_event_service: Arc<SchoolEventService>,
    pub calendar_entry_service: Arc<CalendarEntryService>,
    pub event_notification_service: Arc<EventNotificationService>,
    pub report_service: Arc<ReportService>,
    pub audit_log_service: Arc<AuditLogService>,
}

impl AppData {
    pub fn init(
        db: DatabaseConnection,
        token_service: Arc<TokenService>,
        sms: Arc<dyn SmsGateway>,
        email: Arc<dyn EmailSender>,
    ) -> Self {
        let users = Arc::new(UserStore::new(db.clone()));
        let otps = Arc::new(OtpStore::new(db.clone()));
        let orgs = Arc::new(OrganizationStore::new(db.clone()));
        let officers = Arc::new(OfficerStore::new(db.clone()));
        let events = Arc::new(SchoolEventStore::new(db.clone()));
        let entries = Arc::new(CalendarEntryStore::new(db.clone()));
        let notifications = Arc::new(EventNotificationStore::new(db.clone()));
        let reports = Arc::new(ReportStore::new(db.clone()));
        let audit = Arc::new(AuditStore::new(db));

        Self {
            auth_service: Arc::new(AuthService::new(
                users.clone(),
                otps.clone(),
                audit.clone(),
                token_service.clone(),
            )),
            otp_service: Arc::new(OtpService::new(
                users.clone(),
                otps,
                audit.clone(),
                email,
            )),
            user_service: Arc::new(UserService::new(users.clone(), audit.clone())),
            organization_service: Arc::new(OrganizationService::new(
                orgs.clone(),
                users.clone(),
                audit.clone(),
            )),
            officer_service: Arc::new(OfficerService::new(
                officers,
                users.clone(),
                orgs.clone(),
                audit.clone(),
            )),
            school_event_service: Arc::new(SchoolEventService::new(
                events.clone(),
                audit.clone(),
            )),
            calendar_entry_service: Arc::new(CalendarEntryService::new(
                entries,
                events.clone(),
                users.clone(),
                audit.clone(),
            )),
            event_notification_service: Arc::new(EventNotificationService::new(
                notifications,
                events,
                users,
                audit.clone(),
                sms,
            )),
            report_service: Arc::new(ReportService::new(reports, orgs, audit.clone())),
            audit_log_service: Arc::new(AuditLogService::new(audit)),
            token_service,
        }
    }
}
