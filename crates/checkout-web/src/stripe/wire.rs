//! Shapes of the objects Stripe.js resolves and emits
//!
//! Decoded with `gloo_utils::format::JsValueSerdeExt::into_serde`; only the
//! fields the checkout reads are declared.

use serde::{Deserialize, Serialize};

use checkout_core::{
    CheckoutError, Field, FieldCompletionObserver, PaymentIntent, PaymentMethod, Result,
};

/// A declarative SDK error (`result.error`)
#[derive(Debug, Deserialize)]
pub struct StripeError {
    #[serde(default)]
    pub message: Option<String>,
}

impl StripeError {
    fn into_message(self) -> String {
        self.message
            .unwrap_or_else(|| "Your payment could not be processed.".into())
    }
}

#[derive(Debug, Deserialize)]
pub struct MethodRef {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct IntentRef {
    pub status: String,
}

/// `stripe.createPaymentMethod(...)` resolution
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodResult {
    #[serde(default)]
    pub error: Option<StripeError>,
    #[serde(default)]
    pub payment_method: Option<MethodRef>,
}

impl PaymentMethodResult {
    pub fn into_payment_method(self) -> Result<PaymentMethod> {
        match (self.error, self.payment_method) {
            (Some(error), _) => Err(CheckoutError::Validation(error.into_message())),
            (None, Some(method)) => Ok(PaymentMethod::new(method.id)),
            (None, None) => Err(CheckoutError::Unexpected("No payment method returned".into())),
        }
    }
}

/// `stripe.confirmCardPayment(...)` resolution
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmResult {
    #[serde(default)]
    pub error: Option<StripeError>,
    #[serde(default)]
    pub payment_intent: Option<IntentRef>,
}

impl ConfirmResult {
    pub fn into_intent(self) -> Result<PaymentIntent> {
        match (self.error, self.payment_intent) {
            (Some(error), _) => Err(CheckoutError::Confirmation(error.into_message())),
            (None, Some(intent)) => Ok(PaymentIntent::new(intent.status)),
            (None, None) => Err(CheckoutError::Unexpected("No payment intent returned".into())),
        }
    }
}

/// Second argument of `stripe.confirmCardPayment`
#[derive(Debug, Serialize)]
pub struct ConfirmData<'a> {
    pub payment_method: &'a str,
}

/// Payload of an element `change` event
#[derive(Debug, Default, Deserialize)]
pub struct ElementChange {
    #[serde(default)]
    pub complete: bool,
}

impl ElementChange {
    /// Forward the widget's completion flag
    pub fn report(&self, observer: &dyn FieldCompletionObserver, field: Field) {
        observer.on_completion_changed(field, self.complete);
    }
}

/// Payload of a payment request `paymentmethod` event
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletPaymentMethod {
    #[serde(default)]
    pub payer_email: Option<String>,
    pub payment_method: MethodRef,
}
