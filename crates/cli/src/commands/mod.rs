//! CLI command implementations.

pub mod cart;
pub mod payment;
pub mod seed;

use std::time::Duration;

/// Default collaborator request timeout in seconds.
const DEFAULT_API_TIMEOUT_SECS: u64 = 10;

/// The API base URL, from `API_BASE_URL`.
pub(crate) fn api_base_url() -> Result<String, Box<dyn std::error::Error>> {
    std::env::var("API_BASE_URL").map_err(|_| "API_BASE_URL is not set".into())
}

/// Collaborator request timeout, from `API_TIMEOUT_SECS`.
pub(crate) fn api_timeout() -> Duration {
    let secs = std::env::var("API_TIMEOUT_SECS")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_API_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

/// The cart document path, from `STOREFRONT_CART_PATH`.
pub(crate) fn cart_path() -> String {
    std::env::var("STOREFRONT_CART_PATH").unwrap_or_else(|_| "data/cart.json".to_string())
}
