use chrono::Utc;
use sea_orm::Set;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::providers::EmailSender;
use crate::services::{crypto, record_audit};
use crate::stores::{AuditStore, OtpStore, UserStore};
use crate::types::db::otp;
use crate::types::dto::otp::{
    CleanupOtpResponse, SendOtpRequest, SendOtpResponse, VerifyOtpRequest, VerifyOtpResponse,
};
use crate::types::internal::action::Action;
use crate::validation::{self, fields};

/// Codes are single-use, expire after five minutes, and tolerate at most
/// five verification attempts before every code for the email is purged.
pub const MAX_VERIFICATION_ATTEMPTS: i32 = 5;
const OTP_TTL_SECONDS: i64 = 5 * 60;

pub struct OtpService {
    users: Arc<UserStore>,
    otps: Arc<OtpStore>,
    audit: Arc<AuditStore>,
    email: Arc<dyn EmailSender>,
}

impl OtpService {
    pub fn new(
        users: Arc<UserStore>,
        otps: Arc<OtpStore>,
        audit: Arc<AuditStore>,
        email: Arc<dyn EmailSender>,
    ) -> Self {
        Self {
            users,
            otps,
            audit,
            email,
        }
    }

    pub async fn send(&self, req: SendOtpRequest) -> Result<SendOtpResponse, ApiError> {
        validation::finish(fields::email(&req.email).into_iter().collect())?;
        let email = fields::normalize_email(&req.email);
        let user = self.lookup_user(&email).await?;
        self.issue(&email, &user.id, Action::OtpSend).await
    }

    /// Same as send, except an unexpired pending code blocks reissue.
    pub async fn resend(&self, req: SendOtpRequest) -> Result<SendOtpResponse, ApiError> {
        validation::finish(fields::email(&req.email).into_iter().collect())?;
        let email = fields::normalize_email(&req.email);
        let user = self.lookup_user(&email).await?;

        if let Some(latest) = self.otps.find_latest_unverified(&email).await? {
            let now = Utc::now().timestamp();
            if latest.expires_at > now {
                let remaining_minutes = ((latest.expires_at - now) as u64).div_ceil(60);
                return Err(ApiError::too_many_requests(format!(
                    "An OTP was already sent. Please wait {remaining_minutes} minute(s) before requesting a new one."
                )));
            }
        }

        self.issue(&email, &user.id, Action::OtpResend).await
    }

    pub async fn verify(&self, req: VerifyOtpRequest) -> Result<VerifyOtpResponse, ApiError> {
        let mut errors = Vec::new();
        errors.extend(fields::email(&req.email));
        errors.extend(fields::otp_code(&req.otp));
        validation::finish(errors)?;

        let email = fields::normalize_email(&req.email);
        let user = self.lookup_user(&email).await?;
        let now = Utc::now().timestamp();

        let Some(record) = self.otps.find_valid(&email, &req.otp).await? else {
            // Wrong code: charge the attempt against the latest pending
            // code and purge everything once the cap is hit.
            if let Some(latest) = self.otps.find_latest_unverified(&email).await? {
                let latest = self.otps.increment_attempts(latest).await?;
                if latest.verification_attempts >= MAX_VERIFICATION_ATTEMPTS {
                    self.otps.delete_by_email(&email).await?;
                    return Err(ApiError::too_many_requests(
                        "OTP verification limit exceeded. Please request a new OTP.",
                    ));
                }
            }
            return Err(ApiError::validation("Invalid OTP"));
        };

        if record.verification_attempts >= MAX_VERIFICATION_ATTEMPTS {
            self.otps.delete_by_email(&email).await?;
            return Err(ApiError::too_many_requests(
                "OTP verification limit exceeded. Please request a new OTP.",
            ));
        }
        if record.expires_at < now {
            self.otps.delete_by_email(&email).await?;
            return Err(ApiError::validation(
                "OTP has expired. Please request a new one.",
            ));
        }

        self.otps.mark_verified(record).await?;
        self.otps.delete_unverified(&email).await?;
        record_audit(&self.audit, &user.id, Action::OtpVerify).await;

        Ok(VerifyOtpResponse {
            email,
            verified: true,
        })
    }

    /// Admin maintenance: drop every expired code.
    pub async fn cleanup(&self, actor_id: &str) -> Result<CleanupOtpResponse, ApiError> {
        let deleted_count = self.otps.delete_expired(Utc::now().timestamp()).await?;
        record_audit(&self.audit, actor_id, Action::OtpCleanup).await;
        Ok(CleanupOtpResponse {
            message: format!("Deleted {deleted_count} expired OTP(s)"),
            deleted_count,
        })
    }

    async fn lookup_user(&self, email: &str) -> Result<crate::types::db::user::Model, ApiError> {
        self.users
            .find_by_email(email)
            .await?
            .ok_or_else(|| ApiError::not_found("No user found with this email address"))
    }

    async fn issue(
        &self,
        email: &str,
        user_id: &str,
        action: Action,
    ) -> Result<SendOtpResponse, ApiError> {
        self.otps.delete_by_email(email).await?;

        let code = crypto::generate_otp_code();
        let now = Utc::now().timestamp();
        let expires_at = now + OTP_TTL_SECONDS;
        let record = otp::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            email: Set(email.to_string()),
            code: Set(code.clone()),
            expires_at: Set(expires_at),
            is_verified: Set(false),
            verified_at: Set(None),
            verification_attempts: Set(0),
            created_at: Set(now),
        };
        self.otps.insert(record).await?;

        self.email.send_otp_email(email, &code).await?;
        record_audit(&self.audit, user_id, action).await;

        Ok(SendOtpResponse {
            email: email.to_string(),
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::InternalError;
    use async_trait::async_trait;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;
    use std::sync::Mutex;

    /// Captures outbound codes instead of sending mail.
    struct RecordingEmailSender {
        sent: Mutex<Vec<(String, String)>>,
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

    async fn setup() -> (OtpService, Arc<RecordingEmailSender>) {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let users = Arc::new(UserStore::new(db.clone()));
        let sender = Arc::new(RecordingEmailSender {
            sent: Mutex::new(Vec::new()),
        });
        let service = OtpService::new(
            users.clone(),
            Arc::new(OtpStore::new(db.clone())),
            Arc::new(AuditStore::new(db)),
            sender.clone(),
        );

        let now = Utc::now().timestamp();
        users
            .insert(crate::types::db::user::ActiveModel {
                id: Set(Uuid::new_v4().to_string()),
                username: Set("alice".to_string()),
                email: Set("alice@example.com".to_string()),
                password_hash: Set("hash".to_string()),
                role: Set("student".to_string()),
                phone_number: Set(None),
                created_at: Set(now),
                updated_at: Set(now),
            })
            .await
            .unwrap();

        (service, sender)
    }

    fn send_request() -> SendOtpRequest {
        SendOtpRequest {
            email: "alice@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn send_emails_a_verifiable_code() {
        let (service, sender) = setup().await;
        service.send(send_request()).await.unwrap();

        let code = sender.sent.lock().unwrap()[0].1.clone();
        let response = service
            .verify(VerifyOtpRequest {
                email: "alice@example.com".to_string(),
                otp: code,
            })
            .await
            .unwrap();
        assert!(response.verified);
    }

    #[tokio::test]
    async fn send_requires_a_known_user() {
        let (service, _) = setup().await;
        let err = service
            .send(SendOtpRequest {
                email: "nobody@example.com".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.message(), "No user found with this email address");
    }

    #[tokio::test]
    async fn wrong_code_hits_the_attempt_cap() {
        let (service, sender) = setup().await;
        service.send(send_request()).await.unwrap();
        let real_code = sender.sent.lock().unwrap()[0].1.clone();
        let wrong_code = if real_code == "000000" { "000001" } else { "000000" };

        for _ in 0..MAX_VERIFICATION_ATTEMPTS - 1 {
            let err = service
                .verify(VerifyOtpRequest {
                    email: "alice@example.com".to_string(),
                    otp: wrong_code.to_string(),
                })
                .await
                .unwrap_err();
            assert_eq!(err.status_code(), 400);
            assert_eq!(err.message(), "Invalid OTP");
        }

        let err = service
            .verify(VerifyOtpRequest {
                email: "alice@example.com".to_string(),
                otp: wrong_code.to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 429);

        // Cap purges everything, including the real code.
        let err = service
            .verify(VerifyOtpRequest {
                email: "alice@example.com".to_string(),
                otp: real_code,
            })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn resend_is_throttled_while_a_code_is_live() {
        let (service, _) = setup().await;
        service.send(send_request()).await.unwrap();

        let err = service.resend(send_request()).await.unwrap_err();
        assert_eq!(err.status_code(), 429);
        assert!(err.message().contains("minute"));
    }

    #[tokio::test]
    async fn send_replaces_any_previous_code() {
        let (service, sender) = setup().await;
        service.send(send_request()).await.unwrap();
        service.send(send_request()).await.unwrap();

        let first_code = sender.sent.lock().unwrap()[0].1.clone();
        let second_code = sender.sent.lock().unwrap()[1].1.clone();

        if first_code != second_code {
            let err = service
                .verify(VerifyOtpRequest {
                    email: "alice@example.com".to_string(),
                    otp: first_code,
                })
                .await
                .unwrap_err();
            assert_eq!(err.message(), "Invalid OTP");
        }
        let response = service
            .verify(VerifyOtpRequest {
                email: "alice@example.com".to_string(),
                otp: second_code,
            })
            .await
            .unwrap();
        assert!(response.verified);
    }

    #[tokio::test]
    async fn cleanup_reports_the_deleted_count() {
        let (service, _) = setup().await;
        let response = service.cleanup("actor").await.unwrap();
        assert_eq!(response.deleted_count, 0);
        assert!(response.message.contains("0"));
    }
}
