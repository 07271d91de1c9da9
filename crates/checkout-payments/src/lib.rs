//! # checkout-payments
//!
//! Payment backend client for the card checkout.
//!
//! The backend owns payment-intent creation (amount, currency, customer);
//! this crate only asks it for a client secret:
//!
//! ```text
//! ┌──────────────────┐  POST /payment/create-payment-intent  ┌─────────────┐
//! │ CheckoutController│ ─────────── {"email": ...} ─────────▶│   Backend   │
//! │                  │ ◀──────── {"clientSecret": ...} ───── │             │
//! └──────────────────┘                                        └─────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use checkout_payments::HttpPaymentBackend;
//!
//! let backend = Arc::new(HttpPaymentBackend::from_config(&config));
//! let controller = CheckoutController::new(sdk.clone(), backend, sdk);
//! ```

mod backend;
mod error;

pub use backend::HttpPaymentBackend;
pub use error::{BackendError, Result};
