//! Product detail route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use tracing::instrument;

use stark_core::ProductId;

use crate::api::types::Product;
use crate::error::Result;
use crate::filters;
use crate::routes::format_price;
use crate::state::AppState;

/// Product detail display data for templates.
#[derive(Clone)]
pub struct ProductDetailView {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image_url: String,
    pub stock: i64,
    pub in_stock: bool,
    pub category: String,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: format_price(product.price),
            image_url: product.image_url.clone(),
            stock: product.stock,
            in_stock: product.in_stock(),
            category: product.category.clone(),
        }
    }
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductDetailView,
}

/// Display a product detail page.
///
/// The quantity picker is bounded to the available stock; the add-to-cart
/// control is disabled when the product is out of stock.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ProductShowTemplate> {
    let product = state.catalog().get_product(ProductId::new(id)).await?;

    Ok(ProductShowTemplate {
        product: ProductDetailView::from(&product),
    })
}
