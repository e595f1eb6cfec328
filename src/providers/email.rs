use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::errors::InternalError;

/// Outbound email seam, used for OTP delivery.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_otp_email(&self, to: &str, code: &str) -> Result<(), InternalError>;
}

/// SMTP-backed email sender
pub struct SmtpEmailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpEmailSender {
    pub fn new(host: &str, username: String, password: String) -> Result<Self, InternalError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(host)
            .map_err(|e| InternalError::provider("smtp_connect", e.to_string()))?
            .credentials(Credentials::new(username.clone(), password))
            .build();

        Ok(Self {
            transport,
            from_address: username,
        })
    }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send_otp_email(&self, to: &str, code: &str) -> Result<(), InternalError> {
        let message = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|e| InternalError::provider("send_otp_email", format!("{e}")))?,
            )
            .to(to
                .parse()
                .map_err(|e| InternalError::provider("send_otp_email", format!("{e}")))?)
            .subject("Your OTP Verification Code")
            .header(ContentType::TEXT_PLAIN)
            .body(format!("Your OTP is: {code}"))
            .map_err(|e| InternalError::provider("send_otp_email", e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| InternalError::provider("send_otp_email", e.to_string()))?;

        Ok(())
    }
}
