//! Integration test harness for Stark Products.
//!
//! Spins up an in-process mock of the external REST API (the collaborator
//! every client in this workspace talks to) plus, when a test needs it, the
//! real storefront router backed by an in-memory cart store. Tests then
//! drive everything over real HTTP.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p stark-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};

use stark_storefront::services::cart::{CartStore, MemoryStorage};
use stark_storefront::state::AppState;

/// Cookie value the mock hands out on a successful admin login.
const ADMIN_COOKIE: &str = "admin_session=ok";

/// Demo credentials accepted by the mock.
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "repulsor-tech-7";

/// Shared, inspectable state of the mock collaborator.
#[derive(Debug)]
pub struct MockState {
    /// Bodies received on `POST /api/payment/initialize`, in order.
    initialize_calls: Mutex<Vec<Value>>,
    /// Status/body the initialize endpoint answers with.
    initialize_response: Mutex<(u16, Value)>,
    /// Artificial latency before the initialize endpoint answers.
    initialize_delay: Mutex<Duration>,
    /// Bodies received on `POST /api/admin/products`.
    created_products: Mutex<Vec<Value>>,
    /// Bodies received on `PUT /api/admin/products/{id}`.
    updated_products: Mutex<Vec<(i32, Value)>>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            initialize_calls: Mutex::new(Vec::new()),
            initialize_response: Mutex::new((200, json!({"success": true}))),
            initialize_delay: Mutex::new(Duration::ZERO),
            created_products: Mutex::new(Vec::new()),
            updated_products: Mutex::new(Vec::new()),
        }
    }
}

/// An in-process mock of the external REST API.
pub struct MockCollaborator {
    base_url: String,
    state: Arc<MockState>,
}

impl MockCollaborator {
    /// Bind an ephemeral port and serve the mock API on it.
    pub async fn spawn() -> Self {
        let state = Arc::new(MockState::default());
        let app = mock_router(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock collaborator");
        let addr = listener.local_addr().expect("mock local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock collaborator");
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    /// Base URL of the mock API.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Storefront API configuration pointing at the mock.
    #[must_use]
    pub fn storefront_api(&self) -> stark_storefront::config::ApiConfig {
        stark_storefront::config::ApiConfig::new(&self.base_url, Duration::from_secs(5))
            .expect("mock api config")
    }

    /// Admin API configuration pointing at the mock.
    #[must_use]
    pub fn admin_api(&self) -> stark_admin::config::ApiConfig {
        stark_admin::config::ApiConfig::new(&self.base_url, Duration::from_secs(5))
            .expect("mock admin api config")
    }

    /// Number of payment initializations received so far.
    #[must_use]
    pub fn initialize_call_count(&self) -> usize {
        self.state.initialize_calls.lock().unwrap().len()
    }

    /// Payment initialization bodies received so far.
    #[must_use]
    pub fn initialize_calls(&self) -> Vec<Value> {
        self.state.initialize_calls.lock().unwrap().clone()
    }

    /// Configure the initialize endpoint's answer.
    pub fn set_initialize_response(&self, status: u16, body: Value) {
        *self.state.initialize_response.lock().unwrap() = (status, body);
    }

    /// Configure artificial latency on the initialize endpoint.
    pub fn set_initialize_delay(&self, delay: Duration) {
        *self.state.initialize_delay.lock().unwrap() = delay;
    }

    /// Product payloads created through the admin endpoints.
    #[must_use]
    pub fn created_products(&self) -> Vec<Value> {
        self.state.created_products.lock().unwrap().clone()
    }

    /// Product payloads updated through the admin endpoints.
    #[must_use]
    pub fn updated_products(&self) -> Vec<(i32, Value)> {
        self.state.updated_products.lock().unwrap().clone()
    }
}

/// A running storefront instance backed by an in-memory cart.
pub struct StorefrontHandle {
    base_url: String,
    cart: CartStore,
}

impl StorefrontHandle {
    /// Base URL of the storefront under test.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The storefront's cart store, for direct assertions.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Absolute URL for a storefront path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Serve the real storefront router against the mock collaborator.
pub async fn spawn_storefront(mock: &MockCollaborator) -> StorefrontHandle {
    let config = stark_storefront::config::StorefrontConfig {
        host: "127.0.0.1".parse().expect("loopback"),
        port: 0,
        api: mock.storefront_api(),
        cart_storage_path: std::path::PathBuf::from("unused-in-tests.json"),
        sentry_dsn: None,
    };

    let cart = CartStore::open(MemoryStorage::new());
    let state = AppState::assemble(config, cart.clone()).expect("storefront state");
    let app = stark_storefront::routes::routes().with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind storefront");
    let addr = listener.local_addr().expect("storefront local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("storefront server");
    });

    StorefrontHandle {
        base_url: format!("http://{addr}"),
        cart,
    }
}

// =============================================================================
// Mock collaborator routes
// =============================================================================

fn mock_router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/api/products", get(list_products))
        .route("/api/products/featured", get(featured_products))
        .route("/api/products/{id}", get(get_product))
        .route("/api/categories", get(list_categories))
        .route("/api/payment/initialize", post(initialize_payment))
        .route("/api/payment/verify-upi", post(verify_upi))
        .route("/api/admin/login", post(admin_login))
        .route("/api/admin/logout", post(admin_logout))
        .route("/api/admin/check-auth", get(check_auth))
        .route("/api/admin/stats", get(admin_stats))
        .route("/api/admin/products/recent", get(recent_products))
        .route("/api/admin/products", post(create_product))
        .route(
            "/api/admin/products/{id}",
            axum::routing::put(update_product).delete(delete_product),
        )
        .route("/api/admin/categories", post(create_category))
        .with_state(state)
}

fn product_fixture(id: i32) -> Option<Value> {
    match id {
        1 => Some(json!({
            "id": 1,
            "name": "Arc Reactor Lamp",
            "description": "<p>Glows.</p>",
            "price": 10.0,
            "image_url": "https://cdn.example.com/arc.png",
            "stock": 12,
            "category": "Gadgets"
        })),
        2 => Some(json!({
            "id": 2,
            "name": "Stark Industries Mug",
            "description": "<p>Coffee first.</p>",
            "price": 5.0,
            "image_url": "https://cdn.example.com/mug.png",
            "stock": 100,
            "category": "Merch"
        })),
        _ => None,
    }
}

async fn get_product(Path(id): Path<i32>) -> Response {
    product_fixture(id).map_or_else(
        || {
            (
                StatusCode::NOT_FOUND,
                Json(json!({"error": "Product not found"})),
            )
                .into_response()
        },
        |product| Json(product).into_response(),
    )
}

#[derive(Debug, serde::Deserialize)]
struct ListQuery {
    #[serde(default)]
    search: String,
}

async fn list_products(Query(query): Query<ListQuery>) -> Json<Value> {
    let needle = query.search.to_lowercase();
    let products: Vec<Value> = [1, 2]
        .into_iter()
        .filter_map(product_fixture)
        .filter(|product| {
            needle.is_empty()
                || product["name"]
                    .as_str()
                    .unwrap_or_default()
                    .to_lowercase()
                    .contains(&needle)
        })
        .collect();
    Json(Value::Array(products))
}

async fn featured_products() -> Json<Value> {
    Json(json!([{
        "id": 1,
        "name": "Arc Reactor Lamp",
        "price": 10.0,
        "image_url": "https://cdn.example.com/arc.png",
        "description": "<p>Glows.</p>"
    }]))
}

async fn list_categories() -> Json<Value> {
    Json(json!([
        {"id": 1, "name": "Gadgets"},
        {"id": 2, "name": "Merch"}
    ]))
}

async fn initialize_payment(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    let delay = *state.initialize_delay.lock().unwrap();
    if delay > Duration::ZERO {
        tokio::time::sleep(delay).await;
    }

    state.initialize_calls.lock().unwrap().push(body);

    let (status, payload) = state.initialize_response.lock().unwrap().clone();
    (
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(payload),
    )
        .into_response()
}

async fn verify_upi(Json(body): Json<Value>) -> Response {
    let captured = body["transactionId"].as_str() == Some("txn_captured");
    if captured {
        Json(json!({"success": true})).into_response()
    } else {
        (StatusCode::BAD_REQUEST, Json(json!({"success": false}))).into_response()
    }
}

fn has_admin_cookie(headers: &HeaderMap) -> bool {
    headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|cookies| cookies.contains(ADMIN_COOKIE))
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "Unauthorized"})),
    )
        .into_response()
}

async fn admin_login(Json(body): Json<Value>) -> Response {
    let username = body["username"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    if username == ADMIN_USERNAME && password == ADMIN_PASSWORD {
        (
            [(header::SET_COOKIE, format!("{ADMIN_COOKIE}; Path=/"))],
            Json(json!({"message": "Login successful"})),
        )
            .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Invalid credentials"})),
        )
            .into_response()
    }
}

async fn admin_logout() -> Response {
    (
        [(
            header::SET_COOKIE,
            format!("{ADMIN_COOKIE}; Path=/; Max-Age=0"),
        )],
        Json(json!({"message": "Logged out successfully"})),
    )
        .into_response()
}

async fn check_auth(headers: HeaderMap) -> Json<Value> {
    Json(json!({"isAuthenticated": has_admin_cookie(&headers)}))
}

async fn admin_stats(headers: HeaderMap) -> Response {
    if !has_admin_cookie(&headers) {
        return unauthorized();
    }
    Json(json!({
        "totalProducts": 100,
        "totalOrders": 50,
        "totalRevenue": 5000.0,
        "lowStock": 5
    }))
    .into_response()
}

async fn recent_products(headers: HeaderMap) -> Response {
    if !has_admin_cookie(&headers) {
        return unauthorized();
    }
    Json(json!([
        {"id": 1, "name": "Arc Reactor Lamp", "price": 10.0, "stock": 12, "category": "Gadgets"}
    ]))
    .into_response()
}

async fn create_product(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !has_admin_cookie(&headers) {
        return unauthorized();
    }
    state.created_products.lock().unwrap().push(body);
    Json(json!({"message": "Product added successfully"})).into_response()
}

async fn update_product(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(body): Json<Value>,
) -> Response {
    if !has_admin_cookie(&headers) {
        return unauthorized();
    }
    state.updated_products.lock().unwrap().push((id, body));
    Json(json!({"message": "Product updated successfully"})).into_response()
}

async fn delete_product(headers: HeaderMap, Path(_id): Path<i32>) -> Response {
    if !has_admin_cookie(&headers) {
        return unauthorized();
    }
    Json(json!({"message": "Product deleted successfully"})).into_response()
}

async fn create_category(headers: HeaderMap, Json(_body): Json<Value>) -> Response {
    if !has_admin_cookie(&headers) {
        return unauthorized();
    }
    Json(json!({"message": "Category added successfully"})).into_response()
}
