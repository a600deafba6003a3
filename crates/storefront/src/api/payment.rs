//! Payment collaborator client.
//!
//! Submits checkout intents and verifies UPI transactions. Response payloads
//! are opaque to this crate: whatever the collaborator returns (a client
//! secret, a processor order, a bare `{"success": true}`) is forwarded as-is.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use stark_core::{CheckoutIntent, PaymentMethod};

use crate::api::{ApiError, error_from_response};
use crate::config::ApiConfig;

/// Opaque receipt returned by the payment collaborator on success.
pub type PaymentReceipt = serde_json::Value;

/// Wire body for `POST /api/payment/initialize`.
///
/// Only order id, amount, and method travel to the collaborator; auxiliary
/// intent data (the UPI id) stays client-side.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InitializeRequest<'a> {
    order_id: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    method: PaymentMethod,
}

/// Wire body for `POST /api/payment/verify-upi`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyUpiRequest<'a> {
    transaction_id: &'a str,
}

/// Result of a UPI transaction verification.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct UpiVerification {
    /// Whether the transaction was captured by the processor.
    pub success: bool,
}

/// Client for the payment endpoints of the storefront API.
#[derive(Clone)]
pub struct PaymentClient {
    inner: Arc<PaymentClientInner>,
}

struct PaymentClientInner {
    client: reqwest::Client,
    api: ApiConfig,
}

impl PaymentClient {
    /// Create a new payment client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(api: &ApiConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(api.timeout).build()?;

        Ok(Self {
            inner: Arc::new(PaymentClientInner {
                client,
                api: api.clone(),
            }),
        })
    }

    /// Submit a payment intent to the collaborator.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] with the collaborator's message
    /// verbatim when the intent is declined, or a transport error when the
    /// call cannot complete.
    #[instrument(skip(self, intent), fields(order_id = %intent.order_id, method = %intent.method))]
    pub async fn initialize_payment(
        &self,
        intent: &CheckoutIntent,
    ) -> Result<PaymentReceipt, ApiError> {
        let url = self.inner.api.endpoint("/api/payment/initialize");
        let body = InitializeRequest {
            order_id: &intent.order_id,
            amount: intent.amount,
            method: intent.method,
        };

        let response = self.inner.client.post(url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        Ok(response.json().await?)
    }

    /// Verify a UPI transaction with the collaborator.
    ///
    /// # Errors
    ///
    /// Returns an error when the collaborator call fails or the transaction
    /// is unknown.
    #[instrument(skip(self))]
    pub async fn verify_upi(&self, transaction_id: &str) -> Result<UpiVerification, ApiError> {
        let url = self.inner.api.endpoint("/api/payment/verify-upi");
        let body = VerifyUpiRequest { transaction_id };

        let response = self.inner.client.post(url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        Ok(response.json().await?)
    }
}
