//! Admin API client implementation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use stark_core::ProductId;

use crate::api::types::{AdminProduct, AdminStats, Category, ProductPayload, RecentProduct};
use crate::api::{AdminApiError, error_from_response};
use crate::config::ApiConfig;

/// Body for `POST /api/admin/login`.
#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Body for `POST /api/admin/categories`.
#[derive(Debug, Serialize)]
struct CreateCategoryRequest<'a> {
    name: &'a str,
}

/// Response of `GET /api/admin/check-auth`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckAuthResponse {
    is_authenticated: bool,
}

/// Client for the admin endpoints of the storefront API.
///
/// Carries the collaborator's session cookie after a successful login, so a
/// single client instance is the unit of authentication.
#[derive(Clone)]
pub struct AdminApiClient {
    inner: Arc<AdminApiClientInner>,
}

struct AdminApiClientInner {
    client: reqwest::Client,
    api: ApiConfig,
}

impl AdminApiClient {
    /// Create a new admin API client with an empty cookie store.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(api: &ApiConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(api.timeout)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            inner: Arc::new(AdminApiClientInner {
                client,
                api: api.clone(),
            }),
        })
    }

    /// Log in against the collaborator, establishing the session cookie.
    ///
    /// # Errors
    ///
    /// Returns [`AdminApiError::Unauthorized`] for bad credentials.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<(), AdminApiError> {
        let url = self.inner.api.endpoint("/api/admin/login");
        let body = LoginRequest { username, password };

        let response = self.inner.client.post(url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(())
    }

    /// Log out, dropping the collaborator session.
    ///
    /// # Errors
    ///
    /// Returns an error when the collaborator call fails.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), AdminApiError> {
        let url = self.inner.api.endpoint("/api/admin/logout");
        let response = self.inner.client.post(url).send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(())
    }

    /// Ask the collaborator whether the current session is authenticated.
    ///
    /// # Errors
    ///
    /// Returns an error when the collaborator call fails.
    #[instrument(skip(self))]
    pub async fn check_auth(&self) -> Result<bool, AdminApiError> {
        let url = self.inner.api.endpoint("/api/admin/check-auth");
        let response = self.inner.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let payload: CheckAuthResponse = response.json().await?;
        Ok(payload.is_authenticated)
    }

    /// Fetch dashboard statistics.
    ///
    /// # Errors
    ///
    /// Returns an error when the collaborator call fails.
    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<AdminStats, AdminApiError> {
        self.get_json("/api/admin/stats").await
    }

    /// Fetch the recently added products.
    ///
    /// # Errors
    ///
    /// Returns an error when the collaborator call fails.
    #[instrument(skip(self))]
    pub async fn recent_products(&self) -> Result<Vec<RecentProduct>, AdminApiError> {
        self.get_json("/api/admin/products/recent").await
    }

    /// Fetch the full product listing.
    ///
    /// # Errors
    ///
    /// Returns an error when the collaborator call fails.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<AdminProduct>, AdminApiError> {
        self.get_json("/api/products").await
    }

    /// Fetch one product for editing.
    ///
    /// # Errors
    ///
    /// Returns [`AdminApiError::NotFound`] for an unknown product.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<AdminProduct, AdminApiError> {
        self.get_json(&format!("/api/products/{}", id.as_i32()))
            .await
    }

    /// Create a product listing.
    ///
    /// # Errors
    ///
    /// Returns an error when the collaborator rejects the payload.
    #[instrument(skip(self, payload), fields(name = %payload.name))]
    pub async fn create_product(&self, payload: &ProductPayload) -> Result<(), AdminApiError> {
        let url = self.inner.api.endpoint("/api/admin/products");
        let response = self.inner.client.post(url).json(payload).send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(())
    }

    /// Update a product listing.
    ///
    /// # Errors
    ///
    /// Returns an error when the collaborator rejects the payload.
    #[instrument(skip(self, payload), fields(name = %payload.name))]
    pub async fn update_product(
        &self,
        id: ProductId,
        payload: &ProductPayload,
    ) -> Result<(), AdminApiError> {
        let url = self
            .inner
            .api
            .endpoint(&format!("/api/admin/products/{}", id.as_i32()));
        let response = self.inner.client.put(url).json(payload).send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(())
    }

    /// Delete a product listing.
    ///
    /// # Errors
    ///
    /// Returns an error when the collaborator call fails.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId) -> Result<(), AdminApiError> {
        let url = self
            .inner
            .api
            .endpoint(&format!("/api/admin/products/{}", id.as_i32()));
        let response = self.inner.client.delete(url).send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(())
    }

    /// Fetch all categories.
    ///
    /// # Errors
    ///
    /// Returns an error when the collaborator call fails.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>, AdminApiError> {
        self.get_json("/api/categories").await
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns an error when the collaborator rejects the name.
    #[instrument(skip(self))]
    pub async fn create_category(&self, name: &str) -> Result<(), AdminApiError> {
        let url = self.inner.api.endpoint("/api/admin/categories");
        let body = CreateCategoryRequest { name };
        let response = self.inner.client.post(url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(())
    }

    /// GET an endpoint and decode its JSON body.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, AdminApiError> {
        let url = self.inner.api.endpoint(path);
        let response = self.inner.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(response.json().await?)
    }
}
