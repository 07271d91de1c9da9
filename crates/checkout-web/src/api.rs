//! API Client

use checkout_core::CheckoutConfig;

/// Origin the page was served from
fn origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| "http://localhost:3000".into())
}

/// Fetch the checkout configuration served next to the frontend
pub async fn fetch_config() -> Result<CheckoutConfig, String> {
    let response = reqwest::Client::new()
        .get(format!("{}/api/config", origin()))
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.status().is_success() {
        response
            .json::<CheckoutConfig>()
            .await
            .map_err(|e| e.to_string())
    } else {
        Err(format!(
            "Failed to load checkout configuration ({})",
            response.status()
        ))
    }
}
