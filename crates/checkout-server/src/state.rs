//! Application State

use std::sync::Arc;

use checkout_core::CheckoutConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Page configuration handed to the browser
    pub config: Arc<CheckoutConfig>,
}

impl AppState {
    pub fn new(config: CheckoutConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}
