//! Product catalog client.
//!
//! Read-only access to products, featured listings, categories, and search.
//! Catalog responses change rarely, so they are cached with a 5-minute TTL;
//! search results are always fetched live.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, instrument};

use stark_core::ProductId;

use crate::api::types::{Category, FeaturedProduct, Product, SearchSuggestion};
use crate::api::{ApiError, error_from_response};
use crate::config::ApiConfig;

/// Cache key for catalog responses.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
enum CacheKey {
    Product(i32),
    Featured,
    Categories,
}

/// Cached value types.
#[derive(Debug, Clone)]
enum CacheValue {
    Product(Box<Product>),
    Featured(Vec<FeaturedProduct>),
    Categories(Vec<Category>),
}

/// Client for the product catalog endpoints of the storefront API.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    api: ApiConfig,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(api: &ApiConfig) -> Result<Self, reqwest::Error> {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        let client = reqwest::Client::builder().timeout(api.timeout).build()?;

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                api: api.clone(),
                cache,
            }),
        })
    }

    /// Fetch a single product by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown product, or a transport
    /// error when the collaborator is unreachable.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, ApiError> {
        let key = CacheKey::Product(id.as_i32());
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&key).await {
            debug!("catalog cache hit for product {id}");
            return Ok(*product);
        }

        let url = self
            .inner
            .api
            .endpoint(&format!("/api/products/{}", id.as_i32()));
        let response = self.inner.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let product: Product = response.json().await?;
        self.inner
            .cache
            .insert(key, CacheValue::Product(Box::new(product.clone())))
            .await;
        Ok(product)
    }

    /// Fetch the featured product listing for the home page.
    ///
    /// # Errors
    ///
    /// Returns an error when the collaborator call fails.
    #[instrument(skip(self))]
    pub async fn featured_products(&self) -> Result<Vec<FeaturedProduct>, ApiError> {
        if let Some(CacheValue::Featured(products)) =
            self.inner.cache.get(&CacheKey::Featured).await
        {
            debug!("catalog cache hit for featured products");
            return Ok(products);
        }

        let url = self.inner.api.endpoint("/api/products/featured");
        let response = self.inner.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let products: Vec<FeaturedProduct> = response.json().await?;
        self.inner
            .cache
            .insert(CacheKey::Featured, CacheValue::Featured(products.clone()))
            .await;
        Ok(products)
    }

    /// Fetch all categories.
    ///
    /// # Errors
    ///
    /// Returns an error when the collaborator call fails.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        if let Some(CacheValue::Categories(categories)) =
            self.inner.cache.get(&CacheKey::Categories).await
        {
            debug!("catalog cache hit for categories");
            return Ok(categories);
        }

        let url = self.inner.api.endpoint("/api/categories");
        let response = self.inner.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let categories: Vec<Category> = response.json().await?;
        self.inner
            .cache
            .insert(
                CacheKey::Categories,
                CacheValue::Categories(categories.clone()),
            )
            .await;
        Ok(categories)
    }

    /// Search products by name or description. Never cached.
    ///
    /// # Errors
    ///
    /// Returns an error when the collaborator call fails.
    #[instrument(skip(self))]
    pub async fn search_products(&self, query: &str) -> Result<Vec<Product>, ApiError> {
        let url = self.inner.api.endpoint("/api/products");
        let response = self
            .inner
            .client
            .get(url)
            .query(&[("search", query)])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        Ok(response.json().await?)
    }

    /// Typed suggestion list for the search box, capped at `limit` entries.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying search call fails.
    pub async fn suggestions(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SearchSuggestion>, ApiError> {
        let products = self.search_products(query).await?;
        Ok(products
            .iter()
            .take(limit)
            .map(SearchSuggestion::from)
            .collect())
    }
}
