//! Backend Error Types

use checkout_core::CheckoutError;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, BackendError>;

/// Payment intent request errors
#[derive(Error, Debug)]
pub enum BackendError {
    /// Request never produced a response
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Response body was not the expected JSON
    #[error("Malformed payment intent response: {0}")]
    Decode(String),
}

impl BackendError {
    /// HTTP status, when the server answered
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            Self::Decode(_) => false,
        }
    }
}

impl From<BackendError> for CheckoutError {
    fn from(err: BackendError) -> Self {
        Self::Backend(err.to_string())
    }
}
