//! Payment collaborator utilities.

use stark_storefront::api::PaymentClient;
use stark_storefront::config::ApiConfig;

use crate::commands::{api_base_url, api_timeout};

/// Verify a UPI transaction and report the processor's verdict.
pub async fn verify_upi(transaction_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let api = ApiConfig::new(&api_base_url()?, api_timeout())?;
    let payments = PaymentClient::new(&api)?;

    let verification = payments.verify_upi(transaction_id).await?;
    if verification.success {
        tracing::info!("Transaction {transaction_id} is captured");
    } else {
        tracing::warn!("Transaction {transaction_id} is NOT captured");
    }
    Ok(())
}
