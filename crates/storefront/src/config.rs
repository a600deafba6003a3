//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_API_BASE_URL` - Base URL of the storefront REST API
//!   (falls back to the generic `API_BASE_URL`)
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_CART_PATH` - Device-local cart storage file
//!   (default: data/cart.json)
//! - `API_TIMEOUT_SECS` - Request timeout for collaborator calls (default: 10)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default collaborator request timeout in seconds.
const DEFAULT_API_TIMEOUT_SECS: u64 = 10;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// External storefront API configuration
    pub api: ApiConfig,
    /// Path of the device-local cart storage document
    pub cart_storage_path: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Connection settings for the external storefront API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL without a trailing slash (e.g., `http://localhost:5000`)
    base_url: String,
    /// Per-request timeout; bounds every collaborator call so a hung
    /// request cannot block the UI indefinitely
    pub timeout: Duration,
}

impl ApiConfig {
    /// Create an API configuration from a validated base URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` when the URL does not parse.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ConfigError> {
        Url::parse(base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("STOREFRONT_API_BASE_URL".to_string(), e.to_string())
        })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    fn from_env() -> Result<Self, ConfigError> {
        let base_url = get_api_base_url("STOREFRONT_API_BASE_URL")?;
        let timeout = get_timeout("API_TIMEOUT_SECS")?;
        Self::new(&base_url, timeout)
    }

    /// Build a full endpoint URL from an absolute API path.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let api = ApiConfig::from_env()?;
        let cart_storage_path =
            PathBuf::from(get_env_or_default("STOREFRONT_CART_PATH", "data/cart.json"));
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            host,
            port,
            api,
            cart_storage_path,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get the API base URL with fallback to the generic `API_BASE_URL`.
fn get_api_base_url(primary_key: &str) -> Result<String, ConfigError> {
    // Try primary key first (e.g., STOREFRONT_API_BASE_URL)
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(value);
    }
    // Fallback to generic API_BASE_URL shared with the admin console
    if let Ok(value) = std::env::var("API_BASE_URL") {
        return Ok(value);
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a timeout (in whole seconds) from the environment.
fn get_timeout(key: &str) -> Result<Duration, ConfigError> {
    let secs = get_env_or_default(key, &DEFAULT_API_TIMEOUT_SECS.to_string())
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_paths() {
        let api = ApiConfig::new("http://localhost:5000", Duration::from_secs(10)).unwrap();
        assert_eq!(
            api.endpoint("/api/products/featured"),
            "http://localhost:5000/api/products/featured"
        );
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let api = ApiConfig::new("http://localhost:5000/", Duration::from_secs(10)).unwrap();
        assert_eq!(
            api.endpoint("/api/categories"),
            "http://localhost:5000/api/categories"
        );
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = ApiConfig::new("not a url", Duration::from_secs(10));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            api: ApiConfig::new("http://localhost:5000", Duration::from_secs(10)).unwrap(),
            cart_storage_path: PathBuf::from("data/cart.json"),
            sentry_dsn: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }
}
