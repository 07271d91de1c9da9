//! card-checkout Web Frontend
//!
//! Leptos-based WASM checkout form. Card fields are Stripe.js elements;
//! all form state lives in `checkout_core::CheckoutController`.

mod api;
mod app;
mod components;
mod stripe;

pub use app::App;

use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt};
use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    // Browser console logging
    tracing_subscriber::registry()
        .with(LevelFilter::INFO)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .without_time()
                .with_writer(tracing_web::MakeWebConsoleWriter::new()),
        )
        .init();

    leptos::mount::mount_to_body(App);
}
