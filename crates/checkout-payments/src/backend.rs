//! HTTP Payment Backend
//!
//! `POST {api_url}/payment/create-payment-intent` with `{"email": ...}`;
//! a 2xx response must carry `{"clientSecret": ...}`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use checkout_core::config::PAYMENT_INTENT_PATH;
use checkout_core::{CheckoutConfig, ClientSecret, PaymentBackend};

use crate::error::{BackendError, Result};

#[derive(Debug, Serialize)]
struct CreatePaymentIntentRequest<'a> {
    email: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatePaymentIntentResponse {
    client_secret: String,
}

/// Error body shapes the backend may answer with
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
}

impl ErrorBody {
    /// `{"error": "..."}`, `{"error": {"message": "..."}}`, or `{"message": "..."}`
    fn into_message(self) -> Option<String> {
        let from_error = match self.error {
            Some(serde_json::Value::String(s)) => Some(s),
            Some(serde_json::Value::Object(obj)) => obj
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string),
            _ => None,
        };
        from_error.or(self.message).filter(|m| !m.is_empty())
    }
}

/// Payment backend reached over HTTP
#[derive(Clone, Debug)]
pub struct HttpPaymentBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpPaymentBackend {
    /// Create a backend client for a base URL such as `http://localhost:3001`
    pub fn new(api_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Create with a preconfigured `reqwest::Client`
    pub fn with_client(client: reqwest::Client, api_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}{PAYMENT_INTENT_PATH}", api_url.trim_end_matches('/')),
        }
    }

    /// Create from checkout configuration
    pub fn from_config(config: &CheckoutConfig) -> Self {
        Self::new(&config.api_url)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Request a payment intent and return its client secret
    pub async fn request_client_secret(&self, email: &str) -> Result<ClientSecret> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&CreatePaymentIntentRequest { email })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: ErrorBody = response.json().await.unwrap_or_default();
            let message = body
                .into_message()
                .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
            return Err(BackendError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let text = response.text().await?;
        let parsed: CreatePaymentIntentResponse =
            serde_json::from_str(&text).map_err(|e| BackendError::Decode(e.to_string()))?;

        if parsed.client_secret.is_empty() {
            return Err(BackendError::Decode("clientSecret is empty".into()));
        }

        Ok(ClientSecret::new(parsed.client_secret))
    }
}

#[async_trait(?Send)]
impl PaymentBackend for HttpPaymentBackend {
    async fn create_payment_intent(&self, email: &str) -> checkout_core::Result<ClientSecret> {
        self.request_client_secret(email).await.map_err(|e| {
            tracing::warn!(
                endpoint = %self.endpoint,
                status = ?e.status(),
                retryable = e.is_retryable(),
                error = %e,
                "Payment intent request failed"
            );
            e.into()
        })
    }
}
