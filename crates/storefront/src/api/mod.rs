//! REST clients for the external storefront API.
//!
//! # Architecture
//!
//! - Plain JSON-over-HTTP via `reqwest`; the API is the source of truth,
//!   there is no local sync
//! - In-memory caching via `moka` for catalog responses (5 minute TTL)
//! - Every client carries an explicit request timeout so a hung collaborator
//!   call cannot wedge the UI
//!
//! # Clients
//!
//! ## Catalog
//! - Products, featured products, categories, search
//! - Consumed read-only
//!
//! ## Payment
//! - Payment intent initialization and UPI verification
//! - Response payloads are opaque and forwarded to the UI
//!
//! # Example
//!
//! ```rust,ignore
//! use stark_storefront::api::CatalogClient;
//!
//! let catalog = CatalogClient::new(&config.api)?;
//!
//! let product = catalog.get_product(ProductId::new(1)).await?;
//! let featured = catalog.featured_products().await?;
//! ```

mod catalog;
mod payment;
pub mod types;

pub use catalog::CatalogClient;
pub use payment::{PaymentClient, PaymentReceipt};
pub use types::*;

use thiserror::Error;

/// Errors that can occur when talking to the storefront API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport failed (connection refused, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be decoded.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The collaborator answered with an error payload. The message is kept
    /// verbatim so the UI can surface exactly what the collaborator said.
    #[error("{0}")]
    Rejected(String),
}

impl ApiError {
    /// Whether this error is transport-level (retry-eligible by the user).
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Parse(_))
    }
}

/// Error payload shape used by the collaborator on all endpoints.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    error: String,
}

/// Turn a non-success response into an [`ApiError`].
///
/// The collaborator reports failures as `{"error": "..."}`; when the body is
/// not in that shape the status line is used instead.
async fn error_from_response(response: reqwest::Response) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    let message = serde_json::from_str::<ErrorBody>(&body)
        .map_or_else(|_| format!("HTTP {status}"), |payload| payload.error);

    if status == reqwest::StatusCode::NOT_FOUND {
        ApiError::NotFound(message)
    } else {
        ApiError::Rejected(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_is_verbatim() {
        let err = ApiError::Rejected("card declined".to_string());
        assert_eq!(err.to_string(), "card declined");
    }

    #[test]
    fn test_not_found_display() {
        let err = ApiError::NotFound("Product not found".to_string());
        assert_eq!(err.to_string(), "Not found: Product not found");
    }

    #[test]
    fn test_transport_classification() {
        assert!(!ApiError::Rejected("declined".to_string()).is_transport());
        assert!(!ApiError::NotFound("gone".to_string()).is_transport());
    }
}
