//! Checkout Configuration
//!
//! Loaded from the environment by the server and handed to the browser as
//! JSON from `/api/config`.

use serde::{Deserialize, Serialize};

use crate::error::{CheckoutError, Result};
use crate::model::OrderTotal;
use crate::one_click::PaymentRequestOptions;

/// Path of the payment intent endpoint, relative to `api_url`
pub const PAYMENT_INTENT_PATH: &str = "/payment/create-payment-intent";

fn default_api_url() -> String {
    "http://localhost:3001".into()
}

fn default_country() -> String {
    "US".into()
}

fn default_total() -> OrderTotal {
    OrderTotal::new("Total", 66600, "usd")
}

/// Runtime configuration for one checkout page
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Base URL of the payment backend
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Publishable key for the hosted payment SDK
    pub publishable_key: String,

    /// Merchant country for wallet payments
    #[serde(default = "default_country")]
    pub country: String,

    /// Fixed order total
    #[serde(default = "default_total")]
    pub total: OrderTotal,
}

impl CheckoutConfig {
    pub fn new(publishable_key: impl Into<String>) -> Self {
        Self {
            api_url: default_api_url(),
            publishable_key: publishable_key.into(),
            country: default_country(),
            total: default_total(),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (environment, `.env`, test maps)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let publishable_key = lookup("STRIPE_PUBLISHABLE_KEY")
            .filter(|k| !k.is_empty())
            .ok_or_else(|| CheckoutError::Config("STRIPE_PUBLISHABLE_KEY not set".into()))?;

        let amount = match lookup("CHECKOUT_TOTAL_CENTS") {
            Some(raw) => raw.parse::<i64>().ok().filter(|a| *a > 0).ok_or_else(|| {
                CheckoutError::Config(format!("CHECKOUT_TOTAL_CENTS is not a positive integer: {raw}"))
            })?,
            None => default_total().amount,
        };

        Ok(Self {
            api_url: lookup("CHECKOUT_API_URL")
                .map_or_else(default_api_url, |url| url.trim_end_matches('/').to_string()),
            publishable_key,
            country: lookup("CHECKOUT_COUNTRY").unwrap_or_else(default_country),
            total: OrderTotal::new(
                lookup("CHECKOUT_TOTAL_LABEL").unwrap_or_else(|| "Total".into()),
                amount,
                lookup("CHECKOUT_CURRENCY").unwrap_or_else(|| "usd".into()),
            ),
        })
    }

    /// Full URL of the payment intent endpoint
    pub fn payment_intent_url(&self) -> String {
        format!("{}{PAYMENT_INTENT_PATH}", self.api_url.trim_end_matches('/'))
    }

    /// Wallet options for this page
    pub fn payment_request(&self) -> PaymentRequestOptions {
        PaymentRequestOptions::new(self.country.clone(), &self.total)
    }
}
