//! Order result route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::Path, response::IntoResponse};
use tracing::instrument;

use crate::filters;

/// Order success page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/success.html")]
pub struct OrderSuccessTemplate {
    pub order_id: String,
}

/// Display the order success page.
#[instrument]
pub async fn success(Path(order_id): Path<String>) -> impl IntoResponse {
    OrderSuccessTemplate { order_id }
}
