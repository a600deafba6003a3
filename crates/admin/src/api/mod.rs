//! Admin client for the external storefront API.
//!
//! # Architecture
//!
//! - Plain JSON-over-HTTP via `reqwest`; the API is the source of truth
//! - The client keeps a cookie store so the collaborator's admin session
//!   survives across calls after a successful login
//! - Product management is an opaque CRUD boundary: payloads mirror the form
//!   fields and responses are not interpreted beyond success/error

mod client;
pub mod types;

pub use client::AdminApiClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when talking to the admin endpoints.
#[derive(Debug, Error)]
pub enum AdminApiError {
    /// HTTP transport failed (connection refused, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be decoded.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The collaborator rejected the credentials or session.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The collaborator answered with an error payload; message verbatim.
    #[error("{0}")]
    Rejected(String),
}

/// Error payload shape used by the collaborator on all endpoints.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    error: String,
}

/// Turn a non-success response into an [`AdminApiError`].
async fn error_from_response(response: reqwest::Response) -> AdminApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    let message = serde_json::from_str::<ErrorBody>(&body)
        .map_or_else(|_| format!("HTTP {status}"), |payload| payload.error);

    match status {
        reqwest::StatusCode::UNAUTHORIZED => AdminApiError::Unauthorized(message),
        reqwest::StatusCode::NOT_FOUND => AdminApiError::NotFound(message),
        _ => AdminApiError::Rejected(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            AdminApiError::Unauthorized("Invalid credentials".to_string()).to_string(),
            "Unauthorized: Invalid credentials"
        );
        assert_eq!(
            AdminApiError::Rejected("Missing required fields".to_string()).to_string(),
            "Missing required fields"
        );
    }
}
