//! Error Types

use thiserror::Error;

/// Result type alias for checkout operations
pub type Result<T> = std::result::Result<T, CheckoutError>;

/// Checkout error types
///
/// Every submission failure ends up as one of the first four variants and is
/// surfaced to the user through [`CheckoutError::message`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// The payment SDK rejected the card input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Payment intent request failed (transport, status, or decode)
    #[error("Backend error: {0}")]
    Backend(String),

    /// The charge was declined or could not be confirmed
    #[error("Confirmation error: {0}")]
    Confirmation(String),

    /// Anything else raised during the sequence
    #[error("Unexpected error: {0}")]
    Unexpected(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CheckoutError {
    /// The bare message, without the kind prefix used by `Display`
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(msg)
            | Self::Backend(msg)
            | Self::Confirmation(msg)
            | Self::Unexpected(msg)
            | Self::Config(msg) => msg,
        }
    }

    /// Check if a fresh submission could succeed without user changes
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Backend(_) | Self::Unexpected(_))
    }

    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) | Self::Confirmation(msg) => msg.clone(),
            Self::Backend(_) => "We couldn't reach the payment service. Please try again.".into(),
            Self::Unexpected(_) => "An unexpected error occurred. Please try again.".into(),
            Self::Config(_) => "Checkout is not configured correctly.".into(),
        }
    }
}

impl From<serde_json::Error> for CheckoutError {
    fn from(err: serde_json::Error) -> Self {
        Self::Unexpected(err.to_string())
    }
}
