//! One-Click Payment
//!
//! Wallet payments (Apple Pay, Google Pay, ...) bypass the card fields: the
//! platform's own sheet produces a payment method and a payer email, and the
//! controller only runs the intent + confirm half of the protocol. The
//! platform must be told whether the payment went through so it can close
//! its sheet.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::controller::{CheckoutController, Submission};
use crate::error::Result;
use crate::model::{OrderTotal, SubmissionOutcome};

/// Amount line shown in the wallet sheet
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequestTotal {
    pub label: String,
    pub amount: i64,
}

/// Options passed to the platform's payment request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequestOptions {
    pub country: String,
    pub currency: String,
    pub total: PaymentRequestTotal,
    pub request_payer_name: bool,
    pub request_payer_email: bool,
}

impl PaymentRequestOptions {
    pub fn new(country: impl Into<String>, total: &OrderTotal) -> Self {
        Self {
            country: country.into(),
            currency: total.currency.clone(),
            total: PaymentRequestTotal {
                label: total.label.clone(),
                amount: total.amount,
            },
            request_payer_name: true,
            request_payer_email: true,
        }
    }
}

/// Platform capability check
#[async_trait(?Send)]
pub trait PaymentRequestProvider {
    /// Whether a wallet is available on this client
    async fn can_make_payment(&self, options: &PaymentRequestOptions) -> Result<bool>;
}

/// Status reported back to the platform's sheet
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionStatus {
    Success,
    Fail,
}

impl CompletionStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Fail => "fail",
        }
    }
}

/// Platform callback that closes the wallet sheet; called exactly once
pub trait PaymentCompletion {
    fn complete(self: Box<Self>, status: CompletionStatus);
}

impl<F: FnOnce(CompletionStatus)> PaymentCompletion for F {
    fn complete(self: Box<Self>, status: CompletionStatus) {
        (*self)(status);
    }
}

/// Delivered by the platform once the payer authorizes the sheet
pub struct PaymentMethodEvent {
    pub payer_email: String,
    pub payment_method_id: String,
    pub completion: Box<dyn PaymentCompletion>,
}

impl std::fmt::Debug for PaymentMethodEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentMethodEvent")
            .field("payer_email", &self.payer_email)
            .field("payment_method_id", &self.payment_method_id)
            .finish_non_exhaustive()
    }
}

/// The one-click entry point, present only when a wallet is available
pub struct PaymentButton {
    controller: Arc<CheckoutController>,
}

impl PaymentButton {
    /// Check availability once; `None` means the button is not shown
    pub async fn initialize(
        controller: Arc<CheckoutController>,
        provider: &dyn PaymentRequestProvider,
        options: &PaymentRequestOptions,
    ) -> Option<Self> {
        match provider.can_make_payment(options).await {
            Ok(true) => {
                tracing::info!(country = %options.country, "One-click payment available");
                Some(Self { controller })
            }
            Ok(false) => {
                tracing::debug!("One-click payment unavailable");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "One-click availability check failed");
                None
            }
        }
    }

    /// Run intent + confirm for a wallet-supplied payment method and report
    /// the result to the platform
    pub async fn handle_payment_method(&self, event: PaymentMethodEvent) -> Submission {
        let PaymentMethodEvent {
            payer_email,
            payment_method_id,
            completion,
        } = event;

        let submission = self
            .controller
            .submit_one_click(&payer_email, &payment_method_id)
            .await;

        let status = match &submission {
            Submission::Completed(SubmissionOutcome::Succeeded) => CompletionStatus::Success,
            _ => CompletionStatus::Fail,
        };
        tracing::debug!(status = status.as_str(), "Completing wallet sheet");
        completion.complete(status);

        submission
    }
}
