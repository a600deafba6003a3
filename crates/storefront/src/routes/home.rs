//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::api::types::FeaturedProduct;
use crate::filters;
use crate::routes::format_price;
use crate::state::AppState;

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: i32,
    pub name: String,
    pub price: String,
    pub image_url: String,
}

impl From<&FeaturedProduct> for ProductCardView {
    fn from(product: &FeaturedProduct) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            price: format_price(product.price),
            image_url: product.image_url.clone(),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    /// Featured products for the grid.
    pub featured_products: Vec<ProductCardView>,
}

/// Display the home page.
///
/// A catalog failure degrades to an empty grid rather than an error page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let featured_products = state.catalog().featured_products().await.map_or_else(
        |e| {
            tracing::error!("Failed to fetch featured products: {e}");
            Vec::new()
        },
        |products| products.iter().map(ProductCardView::from).collect(),
    );

    HomeTemplate { featured_products }
}
