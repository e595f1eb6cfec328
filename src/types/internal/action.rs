use std::fmt;

/// Audit action types. One row is written per successful service operation;
/// the rendered form is the dotted string stored in audit_logs.action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SignUp,
    SignIn,
    ResetPassword,
    UserCreate,
    UserList,
    UserDetail,
    UserUpdate,
    UserDelete,
    OrgCreate,
    OrgList,
    OrgDetail,
    OrgUpdate,
    OrgDelete,
    OfficerCreate,
    OfficerList,
    OfficerDetail,
    OfficerUpdate,
    OfficerDelete,
    EventCreate,
    EventList,
    EventDetail,
    EventUpdate,
    EventDelete,
    EventFilterDateRange,
    CalendarCreate,
    CalendarList,
    CalendarDetail,
    CalendarUpdate,
    CalendarDelete,
    NotificationCreate,
    NotificationBulkCreate,
    NotificationList,
    NotificationDetail,
    NotificationUpdate,
    NotificationDelete,
    ReportCreate,
    ReportList,
    ReportDetail,
    ReportDownload,
    ReportStatusUpdate,
    ReportDelete,
    OtpSend,
    OtpResend,
    OtpVerify,
    OtpCleanup,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::SignUp => "auth.sign-up",
            Action::SignIn => "auth.sign-in",
            Action::ResetPassword => "auth.reset-password",
            Action::UserCreate => "user.create",
            Action::UserList => "user.list",
            Action::UserDetail => "user.detail",
            Action::UserUpdate => "user.update",
            Action::UserDelete => "user.delete",
            Action::OrgCreate => "org.create",
            Action::OrgList => "org.list",
            Action::OrgDetail => "org.detail",
            Action::OrgUpdate => "org.update",
            Action::OrgDelete => "org.delete",
            Action::OfficerCreate => "officer.create",
            Action::OfficerList => "officer.list",
            Action::OfficerDetail => "officer.detail",
            Action::OfficerUpdate => "officer.update",
            Action::OfficerDelete => "officer.delete",
            Action::EventCreate => "event.create",
            Action::EventList => "event.list",
            Action::EventDetail => "event.detail",
            Action::EventUpdate => "event.update",
            Action::EventDelete => "event.delete",
            Action::EventFilterDateRange => "event.filter.date-range",
            Action::CalendarCreate => "calendar.create",
            Action::CalendarList => "calendar.list",
            Action::CalendarDetail => "calendar.detail",
            Action::CalendarUpdate => "calendar.update",
            Action::CalendarDelete => "calendar.delete",
            Action::NotificationCreate => "notification.create",
            Action::NotificationBulkCreate => "notification.bulk-create",
            Action::NotificationList => "notification.list",
            Action::NotificationDetail => "notification.detail",
            Action::NotificationUpdate => "notification.update",
            Action::NotificationDelete => "notification.delete",
            Action::ReportCreate => "report.create",
            Action::ReportList => "report.list",
            Action::ReportDetail => "report.detail",
            Action::ReportDownload => "report.download",
            Action::ReportStatusUpdate => "report.status-update",
            Action::ReportDelete => "report.delete",
            Action::OtpSend => "otp.send",
            Action::OtpResend => "otp.resend",
            Action::OtpVerify => "otp.verify",
            Action::OtpCleanup => "otp.cleanup",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
