//! Application state shared across handlers.

use std::sync::Arc;

use crate::api::{CatalogClient, PaymentClient};
use crate::config::StorefrontConfig;
use crate::services::cart::{CartStore, JsonFileStorage};
use crate::services::checkout::CheckoutSubmitter;

/// Error creating application state.
#[derive(Debug, thiserror::Error)]
pub enum StateInitError {
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the cart store and API clients.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    payments: PaymentClient,
    cart: CartStore,
    checkout: CheckoutSubmitter,
}

impl AppState {
    /// Create a new application state with the default file-backed cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP clients cannot be constructed.
    pub fn new(config: StorefrontConfig) -> Result<Self, StateInitError> {
        let cart = CartStore::open(JsonFileStorage::new(&config.cart_storage_path));
        Self::assemble(config, cart)
    }

    /// Create application state around an existing cart store.
    ///
    /// Used by tests to run the full router against in-memory storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP clients cannot be constructed.
    pub fn assemble(config: StorefrontConfig, cart: CartStore) -> Result<Self, StateInitError> {
        let catalog = CatalogClient::new(&config.api)?;
        let payments = PaymentClient::new(&config.api)?;
        let checkout = CheckoutSubmitter::new(payments.clone());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                payments,
                cart,
                checkout,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the payment collaborator client.
    #[must_use]
    pub fn payments(&self) -> &PaymentClient {
        &self.inner.payments
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// Get a reference to the checkout submitter.
    #[must_use]
    pub fn checkout(&self) -> &CheckoutSubmitter {
        &self.inner.checkout
    }
}
