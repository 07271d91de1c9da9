//! # checkout-core
//!
//! Client-side checkout state machine with injected payment collaborators.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐ field events ┌──────────────────────┐
//! │ Presentation │─────────────▶│  CheckoutController  │
//! │    layer     │◀─────────────│  (watch<State>)      │
//! └──────────────┘   snapshots  └──────────┬───────────┘
//!                                          │ submit()
//!              ┌───────────────────────────┼─────────────────────────┐
//!              ▼                           ▼                         ▼
//!   ┌──────────────────────┐  ┌──────────────────────┐  ┌──────────────────────┐
//!   │ PaymentMethodProvider│  │    PaymentBackend    │  │   PaymentConfirmer   │
//!   │    (hosted SDK)      │  │   (HTTP service)     │  │    (hosted SDK)      │
//!   └──────────────────────┘  └──────────────────────┘  └──────────────────────┘
//! ```
//!
//! The `PaymentButton` (one-click wallets) skips the first collaborator and
//! shares the controller's in-flight guard and outcome.

pub mod config;
pub mod controller;
pub mod email;
pub mod error;
pub mod model;
pub mod one_click;
pub mod provider;

#[cfg(test)]
mod testing;

pub use config::CheckoutConfig;
pub use controller::{CheckoutController, RejectReason, Submission};
pub use email::is_valid_email;
pub use error::{CheckoutError, Result};
pub use model::{
    CheckoutState, ClientSecret, EmailAddress, Field, FieldCompletion, FocusState, IntentStatus,
    OrderTotal, PaymentIntent, PaymentMethod, SubmissionOutcome,
};
pub use one_click::{
    CompletionStatus, PaymentButton, PaymentCompletion, PaymentMethodEvent, PaymentRequestOptions,
    PaymentRequestProvider,
};
pub use provider::{
    FieldCompletionObserver, PaymentBackend, PaymentConfirmer, PaymentMethodProvider,
};
