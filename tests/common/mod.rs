// Common utilities for integration tests

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;

use campushub_backend::app_data::AppData;
use campushub_backend::errors::InternalError;
use campushub_backend::providers::{EmailSender, SmsGateway};
use campushub_backend::services::TokenService;
use campushub_backend::types::dto::user::CreateUserRequest;

/// Records OTP emails instead of delivering them, so tests can read the
/// code that would have been sent.
#[derive(Default)]
pub struct RecordingEmailSender {
    pub sent: Mutex<Vec<(String, String)>>,
}

impl RecordingEmailSender {
    pub fn last_code_for(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, code)| code.clone())
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send_otp_email(&self, to: &str, code: &str) -> Result<(), InternalError> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), code.to_string()));
        Ok(())
    }
}

/// SMS gateway double; flip `fail` to simulate delivery outages.
#[derive(Default)]
pub struct FakeSmsGateway {
    pub fail: AtomicBool,
    pub sent: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl SmsGateway for FakeSmsGateway {
    async fn send_sms(&self, to: &str, message: &str) -> Result<(), InternalError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(InternalError::provider("send_sms", "gateway down"));
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), message.to_string()));
        Ok(())
    }

    async fn balance(&self) -> Result<f64, InternalError> {
        Ok(42.0)
    }
}

pub struct TestApp {
    pub data: AppData,
    pub email: Arc<RecordingEmailSender>,
    pub sms: Arc<FakeSmsGateway>,
}

/// Full application wiring against an in-memory database with provider
/// doubles in place of the SMS gateway and SMTP transport.
pub async fn setup_app() -> TestApp {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let tokens = Arc::new(TokenService::new(
        "integration-test-secret-at-least-32-chars".to_string(),
        "campushub-test".to_string(),
        3600,
    ));
    let email = Arc::new(RecordingEmailSender::default());
    let sms = Arc::new(FakeSmsGateway::default());

    TestApp {
        data: AppData::init(db, tokens, sms.clone(), email.clone()),
        email,
        sms,
    }
}

pub fn user_request(username: &str, email: &str, role: &str) -> CreateUserRequest {
    CreateUserRequest {
        username: username.to_string(),
        email: email.to_string(),
        password: "correct-horse-battery".to_string(),
        role: Some(role.to_string()),
        phone_number: "+639171234567".to_string(),
    }
}
