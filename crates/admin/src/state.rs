//! Application state shared across handlers.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::api::AdminApiClient;
use crate::config::AdminConfig;

/// Error creating application state.
#[derive(Debug, thiserror::Error)]
pub enum StateInitError {
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Application state shared across all handlers.
///
/// Authentication lives with the collaborator: the API client's cookie store
/// holds the admin session, and `authenticated` mirrors the collaborator's
/// last answer so route gating does not need a network call per request.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    api: AdminApiClient,
    authenticated: AtomicBool,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: AdminConfig) -> Result<Self, StateInitError> {
        let api = AdminApiClient::new(&config.api)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                api,
                authenticated: AtomicBool::new(false),
            }),
        })
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the admin API client.
    #[must_use]
    pub fn api(&self) -> &AdminApiClient {
        &self.inner.api
    }

    /// Whether the collaborator considers this console authenticated.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.authenticated.load(Ordering::Relaxed)
    }

    /// Record an authentication state change (login, logout).
    pub fn set_authenticated(&self, authenticated: bool) {
        self.inner
            .authenticated
            .store(authenticated, Ordering::Relaxed);
    }

    /// Poll the collaborator's check-auth endpoint and cache the answer.
    ///
    /// Called once at startup to gate the admin route subtree; an unreachable
    /// collaborator counts as unauthenticated.
    pub async fn refresh_auth(&self) {
        let authenticated = match self.api().check_auth().await {
            Ok(authenticated) => authenticated,
            Err(e) => {
                tracing::warn!("Auth check against collaborator failed: {e}");
                false
            }
        };
        self.set_authenticated(authenticated);
    }
}
