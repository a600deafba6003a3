//! Checkout route handlers.
//!
//! The checkout form reads the cart total and a freshly minted order id; the
//! POST handler drives the checkout submitter and performs the navigation
//! side effect on success. The submitted amount is always recomputed from
//! the cart store, never taken from the form.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use stark_core::PaymentMethod;

use crate::filters;
use crate::routes::format_price;
use crate::services::checkout::CheckoutSubmission;
use crate::state::AppState;

/// Checkout form template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub order_id: String,
    pub amount: String,
    pub error: Option<String>,
    /// Preserve the entered UPI id across a failed attempt.
    pub upi_id: String,
}

/// Checkout submit form data.
///
/// `method` arrives as its wire encoding and is parsed explicitly so an
/// unknown value is a validation failure, not a deserialization reject.
/// `card_token` is minted by the external payment-field widget before the
/// form posts; the raw card number never reaches this server.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    pub order_id: String,
    pub method: String,
    #[serde(default)]
    pub upi_id: Option<String>,
    #[serde(default)]
    pub card_token: Option<String>,
}

/// Display the checkout form.
///
/// An empty cart has nothing to pay for and redirects back to the cart page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Response {
    let cart = state.cart().snapshot();
    if cart.is_empty() {
        return Redirect::to("/cart").into_response();
    }

    CheckoutTemplate {
        order_id: Uuid::new_v4().to_string(),
        amount: format_price(cart.total()),
        error: None,
        upi_id: String::new(),
    }
    .into_response()
}

/// Submit a checkout intent.
///
/// On success the cart is cleared and the customer is redirected to the
/// order-success view. On failure the form is re-rendered with the reason
/// inline; validation problems, collaborator rejections, and network
/// failures all surface here, and a re-submit is the only retry mechanism.
#[instrument(skip(state, form), fields(order_id = %form.order_id, method = %form.method))]
pub async fn submit(State(state): State<AppState>, Form(form): Form<CheckoutForm>) -> Response {
    let cart = state.cart().snapshot();
    if cart.is_empty() {
        return Redirect::to("/cart").into_response();
    }

    let method = match form.method.parse::<PaymentMethod>() {
        Ok(method) => method,
        Err(e) => {
            return CheckoutTemplate {
                order_id: form.order_id,
                amount: format_price(cart.total()),
                error: Some(e.to_string()),
                upi_id: form.upi_id.unwrap_or_default(),
            }
            .into_response();
        }
    };

    let submission = CheckoutSubmission {
        order_id: form.order_id.clone(),
        amount: cart.total(),
        method,
        upi_id: form.upi_id.clone(),
        card_token: form.card_token,
    };

    match state.checkout().submit(&submission).await {
        Ok(receipt) => {
            tracing::info!(receipt = %receipt, "payment intent accepted");

            // A paid-for cart must not survive into the next session.
            if let Err(e) = state.cart().clear() {
                tracing::error!("Failed to clear cart after successful checkout: {e}");
            }

            Redirect::to(&format!("/order/success/{}", form.order_id)).into_response()
        }
        Err(e) => {
            tracing::warn!("Checkout submission failed: {e}");
            CheckoutTemplate {
                order_id: form.order_id,
                amount: format_price(cart.total()),
                error: Some(e.to_string()),
                upi_id: form.upi_id.unwrap_or_default(),
            }
            .into_response()
        }
    }
}
