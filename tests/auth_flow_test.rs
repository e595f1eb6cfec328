// End-to-end password lifecycle against the fully wired application.

mod common;

use campushub_backend::types::dto::auth::{ResetPasswordRequest, SignInRequest};
use campushub_backend::types::dto::otp::{SendOtpRequest, VerifyOtpRequest};
use campushub_backend::types::internal::auth::AuthUser;

use common::{setup_app, user_request};

#[tokio::test]
async fn sign_up_then_sign_in_with_username_or_email() {
    let app = setup_app().await;

    let created = app
        .data
        .auth_service
        .sign_up(user_request("mara", "mara@example.com", "student"))
        .await
        .unwrap();
    assert_eq!(created.role, "student");

    for identifier in ["mara", "mara@example.com"] {
        let signed_in = app
            .data
            .auth_service
            .sign_in(SignInRequest {
                identifier: identifier.to_string(),
                password: "correct-horse-battery".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(signed_in.user.id, created.id);

        let claims = app.data.token_service.verify(&signed_in.token).unwrap();
        assert_eq!(claims.sub, created.id);
        assert_eq!(claims.role, "student");

        let actor = AuthUser::from_claims(&claims).unwrap();
        let profile = app.data.auth_service.profile(&actor).await.unwrap();
        assert_eq!(profile.username, "mara");
    }
}

#[tokio::test]
async fn sign_in_rejects_wrong_identifier_and_wrong_password_alike() {
    let app = setup_app().await;
    app.data
        .auth_service
        .sign_up(user_request("mara", "mara@example.com", "student"))
        .await
        .unwrap();

    for (identifier, password) in [("nobody", "correct-horse-battery"), ("mara", "wrong")] {
        let err = app
            .data
            .auth_service
            .sign_in(SignInRequest {
                identifier: identifier.to_string(),
                password: password.to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 401);
        assert_eq!(err.message(), "Invalid credentials");
    }
}

#[tokio::test]
async fn otp_reset_changes_the_password_and_consumes_the_code() {
    let app = setup_app().await;
    app.data
        .auth_service
        .sign_up(user_request("mara", "mara@example.com", "student"))
        .await
        .unwrap();

    app.data
        .otp_service
        .send(SendOtpRequest {
            email: "mara@example.com".to_string(),
        })
        .await
        .unwrap();
    let code = app.email.last_code_for("mara@example.com").unwrap();
    assert_eq!(code.len(), 6);

    let err = app
        .data
        .auth_service
        .reset_password(ResetPasswordRequest {
            email: "mara@example.com".to_string(),
            otp: "000000".to_string(),
            new_password: "a-brand-new-password".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
    assert_eq!(err.message(), "Invalid OTP");

    app.data
        .auth_service
        .reset_password(ResetPasswordRequest {
            email: "mara@example.com".to_string(),
            otp: code.clone(),
            new_password: "a-brand-new-password".to_string(),
        })
        .await
        .unwrap();

    // Old password no longer works, new one does.
    let err = app
        .data
        .auth_service
        .sign_in(SignInRequest {
            identifier: "mara".to_string(),
            password: "correct-horse-battery".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 401);

    app.data
        .auth_service
        .sign_in(SignInRequest {
            identifier: "mara".to_string(),
            password: "a-brand-new-password".to_string(),
        })
        .await
        .unwrap();

    // The code was purged on success.
    let err = app
        .data
        .auth_service
        .reset_password(ResetPasswordRequest {
            email: "mara@example.com".to_string(),
            otp: code,
            new_password: "yet-another-password".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn resend_is_throttled_while_a_code_is_outstanding() {
    let app = setup_app().await;
    app.data
        .auth_service
        .sign_up(user_request("mara", "mara@example.com", "student"))
        .await
        .unwrap();

    let request = || SendOtpRequest {
        email: "mara@example.com".to_string(),
    };
    app.data.otp_service.send(request()).await.unwrap();

    let err = app.data.otp_service.resend(request()).await.unwrap_err();
    assert_eq!(err.status_code(), 429);
    assert!(err.message().starts_with("An OTP was already sent."));

    assert_eq!(app.email.sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn five_wrong_guesses_burn_the_code() {
    let app = setup_app().await;
    app.data
        .auth_service
        .sign_up(user_request("mara", "mara@example.com", "student"))
        .await
        .unwrap();

    app.data
        .otp_service
        .send(SendOtpRequest {
            email: "mara@example.com".to_string(),
        })
        .await
        .unwrap();
    let code = app.email.last_code_for("mara@example.com").unwrap();

    let wrong = || VerifyOtpRequest {
        email: "mara@example.com".to_string(),
        otp: "000000".to_string(),
    };
    for _ in 0..4 {
        let err = app.data.otp_service.verify(wrong()).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
    }
    let err = app.data.otp_service.verify(wrong()).await.unwrap_err();
    assert_eq!(err.status_code(), 429);

    // The correct code is gone too; everything was purged at the cap.
    let err = app
        .data
        .otp_service
        .verify(VerifyOtpRequest {
            email: "mara@example.com".to_string(),
            otp: code,
        })
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
}
