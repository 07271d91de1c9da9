//! HTTP Handlers

use axum::{Json, extract::State};
use serde::Serialize;

use checkout_core::CheckoutConfig;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Public checkout configuration for the frontend
pub async fn checkout_config(State(state): State<AppState>) -> Json<CheckoutConfig> {
    Json(CheckoutConfig::clone(&state.config))
}
