//! Admin console configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ADMIN_API_BASE_URL` - Base URL of the storefront REST API
//!   (falls back to the generic `API_BASE_URL`)
//!
//! ## Optional
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3001)
//! - `API_TIMEOUT_SECS` - Request timeout for collaborator calls (default: 10)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};
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

/// Admin console application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// External storefront API configuration
    pub api: ApiConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Connection settings for the external storefront API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL without a trailing slash (e.g., `http://localhost:5000`)
    base_url: String,
    /// Per-request timeout for collaborator calls
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
            ConfigError::InvalidEnvVar("ADMIN_API_BASE_URL".to_string(), e.to_string())
        })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    fn from_env() -> Result<Self, ConfigError> {
        let base_url = get_api_base_url("ADMIN_API_BASE_URL")?;
        let timeout = get_timeout("API_TIMEOUT_SECS")?;
        Self::new(&base_url, timeout)
    }

    /// Build a full endpoint URL from an absolute API path.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl AdminConfig {
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

        let host = get_env_or_default("ADMIN_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("ADMIN_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_PORT".to_string(), e.to_string()))?;
        let api = ApiConfig::from_env()?;
        let sentry_dsn = std::env::var("SENTRY_DSN").ok();

        Ok(Self {
            host,
            port,
            api,
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
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(value);
    }
    // Fallback to generic API_BASE_URL shared with the storefront
    if let Ok(value) = std::env::var("API_BASE_URL") {
        return Ok(value);
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
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
        let api = ApiConfig::new("http://localhost:5000/", Duration::from_secs(10)).unwrap();
        assert_eq!(
            api.endpoint("/api/admin/stats"),
            "http://localhost:5000/api/admin/stats"
        );
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        assert!(ApiConfig::new("nope", Duration::from_secs(10)).is_err());
    }
}
