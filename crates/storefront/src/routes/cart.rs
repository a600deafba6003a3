//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! All views render from the process-wide cart store; after a mutation the
//! `HX-Trigger: cart-updated` header fans the change out to the navbar badge
//! and any other subscribed fragment.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{AppendHeaders, Html, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use stark_core::{Cart, LineItem, ProductId};

use crate::filters;
use crate::routes::format_price;
use crate::services::cart::CartStoreError;
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub product_id: i32,
    pub name: String,
    pub unit_price: String,
    pub line_price: String,
    pub quantity: u32,
    pub image_ref: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: "$0.00".to_string(),
            item_count: 0,
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            subtotal: format_price(cart.total()),
            item_count: cart.item_count(),
        }
    }
}

impl From<&LineItem> for CartItemView {
    fn from(line: &LineItem) -> Self {
        Self {
            product_id: line.product_id.as_i32(),
            name: line.name.clone(),
            unit_price: format_price(line.unit_price),
            line_price: format_price(line.line_total()),
            quantity: line.quantity,
            image_ref: line.image_ref.clone(),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i32,
    pub quantity: Option<u32>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: i32,
    pub quantity: u32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: i32,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Display cart page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    CartShowTemplate {
        cart: CartView::from(&state.cart().snapshot()),
    }
}

/// Add item to cart (HTMX).
///
/// The product record (name, price, image) is looked up in the catalog so a
/// client cannot forge prices; only the product id and quantity come from the
/// form. Returns the count badge plus an HTMX trigger for dependent views.
#[instrument(skip(state))]
pub async fn add(State(state): State<AppState>, Form(form): Form<AddToCartForm>) -> Response {
    let quantity = form.quantity.unwrap_or(1);

    let product = match state.catalog().get_product(ProductId::new(form.product_id)).await {
        Ok(product) => product,
        Err(e) => {
            tracing::error!("Failed to fetch product for cart add: {e}");
            return (
                StatusCode::BAD_GATEWAY,
                Html("<span class=\"error\">Error adding to cart</span>"),
            )
                .into_response();
        }
    };

    match state.cart().add(
        product.id,
        product.name,
        product.price,
        quantity,
        product.image_url,
    ) {
        Ok(cart) => (
            AppendHeaders([("HX-Trigger", "cart-updated")]),
            CartCountTemplate {
                count: cart.item_count(),
            },
        )
            .into_response(),
        Err(e) => {
            tracing::warn!("Failed to add item to cart: {e}");
            cart_error_response(&e)
        }
    }
}

/// Update cart item quantity (HTMX).
///
/// A quantity of zero is rejected: the remove control is the only way to
/// drop a line.
#[instrument(skip(state))]
pub async fn update(State(state): State<AppState>, Form(form): Form<UpdateCartForm>) -> Response {
    match state
        .cart()
        .update_quantity(ProductId::new(form.product_id), form.quantity)
    {
        Ok(cart) => (
            AppendHeaders([("HX-Trigger", "cart-updated")]),
            CartItemsTemplate {
                cart: CartView::from(&cart),
            },
        )
            .into_response(),
        Err(e) => {
            tracing::warn!("Failed to update cart: {e}");
            cart_error_response(&e)
        }
    }
}

/// Remove item from cart (HTMX).
#[instrument(skip(state))]
pub async fn remove(State(state): State<AppState>, Form(form): Form<RemoveFromCartForm>) -> Response {
    match state.cart().remove(ProductId::new(form.product_id)) {
        Ok(cart) => (
            AppendHeaders([("HX-Trigger", "cart-updated")]),
            CartItemsTemplate {
                cart: CartView::from(&cart),
            },
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to remove from cart: {e}");
            cart_error_response(&e)
        }
    }
}

/// Empty the cart (HTMX).
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Response {
    match state.cart().clear() {
        Ok(cart) => (
            AppendHeaders([("HX-Trigger", "cart-updated")]),
            CartItemsTemplate {
                cart: CartView::from(&cart),
            },
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to clear cart: {e}");
            cart_error_response(&e)
        }
    }
}

/// Get cart count badge (HTMX).
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> impl IntoResponse {
    CartCountTemplate {
        count: state.cart().item_count(),
    }
}

/// Render a cart failure as an inline fragment with the right status.
fn cart_error_response(err: &CartStoreError) -> Response {
    let status = match err {
        CartStoreError::Cart(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Html(format!("<span class=\"error\">{err}</span>")),
    )
        .into_response()
}
