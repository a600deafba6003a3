//! Admin dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::api::{AdminStats, RecentProduct};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Recent product display data for templates.
#[derive(Clone)]
pub struct RecentProductView {
    pub id: i32,
    pub name: String,
    pub price: String,
    pub stock: i64,
    pub category: String,
}

impl From<&RecentProduct> for RecentProductView {
    fn from(product: &RecentProduct) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            price: format!("${:.2}", product.price.round_dp(2)),
            stock: product.stock,
            category: product.category.clone(),
        }
    }
}

/// Dashboard statistic tiles.
#[derive(Clone)]
pub struct StatsView {
    pub total_products: i64,
    pub total_orders: i64,
    pub total_revenue: String,
    pub low_stock: i64,
}

impl From<&AdminStats> for StatsView {
    fn from(stats: &AdminStats) -> Self {
        Self {
            total_products: stats.total_products,
            total_orders: stats.total_orders,
            total_revenue: format!("${:.2}", stats.total_revenue.round_dp(2)),
            low_stock: stats.low_stock,
        }
    }
}

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub stats: StatsView,
    pub recent_products: Vec<RecentProductView>,
    pub error: Option<String>,
}

/// Display the dashboard.
///
/// A collaborator failure degrades to zeroed tiles with the reason inline.
#[instrument(skip(state))]
pub async fn show(_auth: RequireAuth, State(state): State<AppState>) -> impl IntoResponse {
    let (stats, error) = match state.api().stats().await {
        Ok(stats) => (StatsView::from(&stats), None),
        Err(e) => {
            tracing::error!("Failed to fetch dashboard stats: {e}");
            (StatsView::from(&AdminStats::default()), Some(e.to_string()))
        }
    };

    let recent_products = state.api().recent_products().await.map_or_else(
        |e| {
            tracing::error!("Failed to fetch recent products: {e}");
            Vec::new()
        },
        |products| products.iter().map(RecentProductView::from).collect(),
    );

    DashboardTemplate {
        stats,
        recent_products,
        error,
    }
}
