use chrono::Utc;
use std::sync::Arc;

use crate::errors::ApiError;
use crate::services::user_service::create_user;
use crate::services::{crypto, record_audit, TokenService};
use crate::stores::{AuditStore, OtpStore, UserStore};
use crate::types::dto::auth::{ResetPasswordRequest, SignInRequest, SignInResponse};
use crate::types::dto::common::MessageResponse;
use crate::types::dto::user::{CreateUserRequest, UserResponse};
use crate::types::internal::action::Action;
use crate::types::internal::auth::AuthUser;
use crate::validation::{self, fields};

/// Sign-up, sign-in, profile lookup, and the OTP-backed password reset.
pub struct AuthService {
    users: Arc<UserStore>,
    otps: Arc<OtpStore>,
    audit: Arc<AuditStore>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(
        users: Arc<UserStore>,
        otps: Arc<OtpStore>,
        audit: Arc<AuditStore>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            users,
            otps,
            audit,
            tokens,
        }
    }

    /// Self-service registration. The audit row is attributed to the
    /// freshly created account.
    pub async fn sign_up(&self, req: CreateUserRequest) -> Result<UserResponse, ApiError> {
        let user = create_user(&self.users, &req).await?;
        record_audit(&self.audit, &user.id, Action::SignUp).await;
        Ok(user.into())
    }

    /// The identifier may be a username or an email. Unknown identifier
    /// and wrong password are indistinguishable to the caller.
    pub async fn sign_in(&self, req: SignInRequest) -> Result<SignInResponse, ApiError> {
        let mut errors = Vec::new();
        errors.extend(fields::required(&req.identifier, "Identifier"));
        errors.extend(fields::required(&req.password, "Password"));
        validation::finish(errors)?;

        let user = self
            .users
            .find_by_identifier(req.identifier.trim())
            .await?
            .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

        if !crypto::verify_password(&req.password, &user.password_hash)? {
            return Err(ApiError::unauthorized("Invalid credentials"));
        }

        let token = self.tokens.issue(&user)?;
        record_audit(&self.audit, &user.id, Action::SignIn).await;

        Ok(SignInResponse {
            user: user.into(),
            token,
        })
    }

    /// Current account as stored, resolved from the verified claims.
    pub async fn profile(&self, auth: &AuthUser) -> Result<UserResponse, ApiError> {
        let user = self
            .users
            .find_by_id(&auth.id)
            .await?
            .ok_or_else(|| ApiError::not_found("User not found"))?;
        Ok(user.into())
    }

    pub async fn reset_password(
        &self,
        req: ResetPasswordRequest,
    ) -> Result<MessageResponse, ApiError> {
        let mut errors = Vec::new();
        errors.extend(fields::email(&req.email));
        errors.extend(fields::otp_code(&req.otp));
        errors.extend(fields::password(&req.new_password));
        validation::finish(errors)?;

        let email = fields::normalize_email(&req.email);
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| ApiError::not_found("User not found"))?;

        let now = Utc::now().timestamp();
        let otp = self
            .otps
            .find_valid(&email, &req.otp)
            .await?
            .ok_or_else(|| ApiError::validation("Invalid OTP"))?;

        if otp.verification_attempts >= super::otp_service::MAX_VERIFICATION_ATTEMPTS {
            self.otps.delete_by_email(&email).await?;
            return Err(ApiError::too_many_requests(
                "OTP verification limit exceeded. Please request a new OTP.",
            ));
        }
        if otp.expires_at < now {
            self.otps.increment_attempts(otp).await?;
            return Err(ApiError::validation("OTP has expired"));
        }

        self.otps.mark_verified(otp).await?;
        let hash = crypto::hash_password(&req.new_password)?;
        self.users.update_password(&user.id, hash, now).await?;
        self.otps.delete_by_email(&email).await?;
        record_audit(&self.audit, &user.id, Action::ResetPassword).await;

        Ok(MessageResponse {
            message: "Password reset successfully".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn setup() -> AuthService {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");
        AuthService::new(
            Arc::new(UserStore::new(db.clone())),
            Arc::new(OtpStore::new(db.clone())),
            Arc::new(AuditStore::new(db)),
            Arc::new(TokenService::new(
                "test-secret-key-minimum-32-characters-long".to_string(),
                "campushub-test".to_string(),
                3600,
            )),
        )
    }

    fn sign_up_request() -> CreateUserRequest {
        CreateUserRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "password123".to_string(),
            role: None,
            phone_number: "+639123456789".to_string(),
        }
    }

    #[tokio::test]
    async fn sign_up_defaults_to_student_and_hides_the_hash() {
        let service = setup().await;
        let user = service.sign_up(sign_up_request()).await.unwrap();
        assert_eq!(user.role, "student");
        assert_eq!(user.email, "alice@example.com");

        let body = serde_json::to_string(&user).unwrap();
        assert!(!body.contains("password"));
    }

    #[tokio::test]
    async fn sign_in_works_with_username_or_email() {
        let service = setup().await;
        service.sign_up(sign_up_request()).await.unwrap();

        for identifier in ["alice", "alice@example.com"] {
            let response = service
                .sign_in(SignInRequest {
                    identifier: identifier.to_string(),
                    password: "password123".to_string(),
                })
                .await
                .unwrap();
            assert!(!response.token.is_empty());
            assert_eq!(response.user.username, "alice");
        }
    }

    #[tokio::test]
    async fn sign_in_failures_are_indistinguishable() {
        let service = setup().await;
        service.sign_up(sign_up_request()).await.unwrap();

        let wrong_password = service
            .sign_in(SignInRequest {
                identifier: "alice".to_string(),
                password: "not-the-password".to_string(),
            })
            .await
            .unwrap_err();
        let unknown_user = service
            .sign_in(SignInRequest {
                identifier: "mallory".to_string(),
                password: "password123".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(wrong_password.status_code(), 401);
        assert_eq!(unknown_user.status_code(), 401);
        assert_eq!(wrong_password.message(), unknown_user.message());
    }

    #[tokio::test]
    async fn reset_password_rejects_unknown_otp() {
        let service = setup().await;
        service.sign_up(sign_up_request()).await.unwrap();

        let err = service
            .reset_password(ResetPasswordRequest {
                email: "alice@example.com".to_string(),
                otp: "123456".to_string(),
                new_password: "newpassword1".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), "Invalid OTP");
    }
}
