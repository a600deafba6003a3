//! HTTP route handlers for the admin console.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//! GET  /login                  - Login page
//! POST /login                  - Login against the collaborator
//! POST /logout                 - Logout
//!
//! # Gated by RequireAuth
//! GET  /                       - Dashboard (stats, recent products)
//! GET  /products               - Product listing
//! GET  /products/new           - New product form
//! POST /products               - Create product
//! GET  /products/{id}/edit     - Edit product form
//! POST /products/{id}          - Update product
//! POST /products/{id}/delete   - Delete product
//! GET  /categories             - Category listing
//! POST /categories             - Create category
//! ```

pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product management routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list).post(products::create))
        .route("/new", get(products::new_form))
        .route("/{id}", post(products::update))
        .route("/{id}/edit", get(products::edit_form))
        .route("/{id}/delete", post(products::delete))
}

/// Create all routes for the admin console.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Dashboard
        .route("/", get(dashboard::show))
        // Product management
        .nest("/products", product_routes())
        // Category management
        .route(
            "/categories",
            get(categories::list).post(categories::create),
        )
        // Auth
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
}
