//! card-checkout HTTP Server
//!
//! Serves the compiled checkout frontend from `static/` and the runtime
//! configuration it boots from. Payment intents are created by the separate
//! payment backend at `CHECKOUT_API_URL`.

mod handlers;
mod state;

use axum::{Router, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use checkout_core::CheckoutConfig;

use crate::handlers::{checkout_config, health_check};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let config = CheckoutConfig::from_env()?;
    tracing::info!(
        api_url = %config.api_url,
        country = %config.country,
        total = %config.total.display(),
        "Checkout configured"
    );
    if config.publishable_key.starts_with("pk_live_") {
        tracing::warn!("Using a live publishable key");
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/api/config", get(checkout_config))
        // Static files (WASM frontend)
        .fallback_service(ServeDir::new("static"))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(config));

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Checkout server running on http://{}", addr);
    tracing::info!("  GET  /health     - Health check");
    tracing::info!("  GET  /api/config - Checkout configuration");

    axum::serve(listener, app).await?;

    Ok(())
}
