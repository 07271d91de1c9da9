//! Payment Collaborators
//!
//! The controller never talks to a payment SDK or a backend directly. It is
//! handed implementations of these traits at construction, so the hosted SDK
//! (Stripe.js in the browser), an HTTP backend, or test stubs can be swapped
//! freely.
//!
//! The traits are `?Send`: the checkout runs on a single-threaded UI event
//! loop and browser implementations await JS promises.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use checkout_core::CheckoutController;
//!
//! let controller = CheckoutController::new(sdk.clone(), Arc::new(backend), sdk);
//! controller.on_email_changed("mail@example.com");
//! let submission = controller.submit().await;
//! ```

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{ClientSecret, Field, PaymentIntent, PaymentMethod};

/// Turns the card input held by the payment SDK into a payment-method token
///
/// The implementation owns the card input handle. A rejected card should be
/// reported as [`CheckoutError::Validation`](crate::CheckoutError::Validation).
#[async_trait(?Send)]
pub trait PaymentMethodProvider {
    async fn create_payment_method(&self, billing_email: &str) -> Result<PaymentMethod>;
}

/// Issues a payment intent for a fixed, server-side amount
///
/// Failures should be reported as [`CheckoutError::Backend`](crate::CheckoutError::Backend).
#[async_trait(?Send)]
pub trait PaymentBackend {
    async fn create_payment_intent(&self, email: &str) -> Result<ClientSecret>;
}

/// Confirms a payment intent with a payment method
///
/// Declines should be reported as
/// [`CheckoutError::Confirmation`](crate::CheckoutError::Confirmation); a
/// returned intent carries the final status.
#[async_trait(?Send)]
pub trait PaymentConfirmer {
    async fn confirm_payment(
        &self,
        client_secret: &ClientSecret,
        payment_method_id: &str,
    ) -> Result<PaymentIntent>;
}

/// Receives per-field completion reports from the card widgets
pub trait FieldCompletionObserver {
    fn on_completion_changed(&self, field: Field, is_complete: bool);
}
