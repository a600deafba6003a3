//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (featured products)
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products/{id}          - Product detail
//!
//! # Search
//! GET  /search                 - Search results page
//! GET  /search/suggest         - Suggestion fragment (HTMX)
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add to cart (returns count, triggers cart-updated)
//! POST /cart/update            - Update quantity (returns cart_items fragment)
//! POST /cart/remove            - Remove item (returns cart_items fragment)
//! POST /cart/clear             - Empty the cart (returns cart_items fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Checkout
//! GET  /checkout               - Checkout form
//! POST /checkout               - Submit payment intent
//! GET  /order/success/{id}     - Order success page
//! ```

pub mod cart;
pub mod checkout;
pub mod home;
pub mod orders;
pub mod products;
pub mod search;

use axum::{
    Router,
    routing::{get, post},
};
use rust_decimal::Decimal;

use crate::state::AppState;

/// Format a decimal amount as a display price, rounded to two places.
///
/// Rounding happens here and only here; cart arithmetic keeps full precision.
pub(crate) fn format_price(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new().route("/{id}", get(products::show))
}

/// Create the search routes router.
pub fn search_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(search::search_page))
        .route("/suggest", get(search::suggest))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Product routes
        .nest("/products", product_routes())
        // Search routes
        .nest("/search", search_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout
        .route("/checkout", get(checkout::show).post(checkout::submit))
        .route("/order/success/{order_id}", get(orders::success))
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    #[test]
    fn test_format_price_rounds_for_display() {
        assert_eq!(format_price(dec!(25)), "$25.00");
        assert_eq!(format_price(dec!(0.315)), "$0.32");
        assert_eq!(format_price(dec!(19.99)), "$19.99");
    }
}
