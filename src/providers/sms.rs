use async_trait::async_trait;
use serde::Deserialize;

use crate::errors::InternalError;

/// Outbound SMS seam. Services depend on this trait so delivery can be
/// mocked in tests; the production implementation talks to Semaphore.
#[async_trait]
pub trait SmsGateway: Send + Sync {
    async fn send_sms(&self, to: &str, message: &str) -> Result<(), InternalError>;

    /// Remaining credit balance at the gateway.
    async fn balance(&self) -> Result<f64, InternalError>;
}

#[derive(Debug, Deserialize)]
struct AccountResponse {
    credit_balance: f64,
}

/// Semaphore SMS gateway client (https://semaphore.co/api/v4)
pub struct SemaphoreSmsGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    sender_name: String,
}

impl SemaphoreSmsGateway {
    pub fn new(api_key: String, sender_name: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: "https://semaphore.co/api/v4".to_string(),
            api_key,
            sender_name,
        }
    }

}

#[async_trait]
impl SmsGateway for SemaphoreSmsGateway {
    async fn send_sms(&self, to: &str, message: &str) -> Result<(), InternalError> {
        let params = [
            ("apikey", self.api_key.as_str()),
            ("number", to),
            ("message", message),
            ("sendername", self.sender_name.as_str()),
        ];

        let response = self
            .client
            .post(format!("{}/messages", self.base_url))
            .form(&params)
            .send()
            .await
            .map_err(|e| InternalError::provider("send_sms", e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(InternalError::provider(
                "send_sms",
                format!("gateway returned {status}: {body}"),
            ));
        }

        Ok(())
    }

    async fn balance(&self) -> Result<f64, InternalError> {
        let response = self
            .client
            .get(format!("{}/account", self.base_url))
            .query(&[("apikey", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| InternalError::provider("sms_balance", e.to_string()))?;

        if !response.status().is_success() {
            return Err(InternalError::provider(
                "sms_balance",
                format!("gateway returned {}", response.status()),
            ));
        }

        let account: AccountResponse = response
            .json()
            .await
            .map_err(|e| InternalError::provider("sms_balance", e.to_string()))?;

        Ok(account.credit_balance)
    }
}
