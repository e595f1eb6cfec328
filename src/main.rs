mod api;
mod app_data;
mod config;
mod errors;
mod providers;
mod services;
mod stores;
mod types;
mod validation;

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use poem::{listener::TcpListener, Route, Server};
use poem_openapi::OpenApiService;
use sea_orm::Database;

use api::{
    AuditLogApi, AuthApi, CalendarEntryApi, EventNotificationApi, OfficerApi, OrganizationApi,
    OtpApi, ReportApi, SchoolEventApi, UserApi,
};
use app_data::AppData;
use config::AppSettings;
use providers::{SemaphoreSmsGateway, SmtpEmailSender};
use services::TokenService;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    dotenv::dotenv().ok();
    config::init_logging();

    let settings = AppSettings::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "configuration error");
        std::process::exit(1);
    });

    let db = Database::connect(&settings.database_url)
        .await
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, url = %settings.database_url, "failed to connect to database");
            std::process::exit(1);
        });
    Migrator::up(&db, None).await.unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to run migrations");
        std::process::exit(1);
    });
    tracing::info!(url = %settings.database_url, "database ready");

    let token_service = Arc::new(TokenService::new(
        settings.jwt_secret.clone(),
        settings.jwt_issuer.clone(),
        settings.jwt_expiry_seconds,
    ));
    let sms = Arc::new(SemaphoreSmsGateway::new(
        settings.semaphore_api_key.clone(),
        settings.semaphore_sender_name.clone(),
    ));
    let email = Arc::new(
        SmtpEmailSender::new(
            &settings.smtp_host,
            settings.smtp_username.clone(),
            settings.smtp_password.clone(),
        )
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "failed to build SMTP transport");
            std::process::exit(1);
        }),
    );

    let data = AppData::init(db, token_service, sms, email);

    let api_service = OpenApiService::new(
        (
            AuthApi::new(data.auth_service.clone(), data.token_service.clone()),
            OtpApi::new(data.otp_service.clone(), data.token_service.clone()),
            UserApi::new(data.user_service.clone(), data.token_service.clone()),
            OrganizationApi::new(data.organization_service.clone(), data.token_service.clone()),
            OfficerApi::new(data.officer_service.clone(), data.token_service.clone()),
            SchoolEventApi::new(data.school_event_service.clone(), data.token_service.clone()),
            CalendarEntryApi::new(data.calendar_entry_service.clone(), data.token_service.clone()),
            EventNotificationApi::new(
                data.event_notification_service.clone(),
                data.token_service.clone(),
            ),
            ReportApi::new(data.report_service.clone(), data.token_service.clone()),
            AuditLogApi::new(data.audit_log_service.clone(), data.token_service.clone()),
        ),
        "CampusHub API",
        env!("CARGO_PKG_VERSION"),
    )
    .server(format!("http://localhost:{}/api", settings.port));

    let ui = api_service.swagger_ui();
    let app = Route::new().nest("/api", api_service).nest("/swagger", ui);

    let addr = format!("0.0.0.0:{}", settings.port);
    tracing::info!(%addr, "starting server");
    Server::new(TcpListener::bind(addr)).run(app).await
}
