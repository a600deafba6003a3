//! Search route handlers.
//!
//! Search is a pass-through to the catalog collaborator. The suggestion
//! fragment carries an explicit record shape at the boundary instead of an
//! untyped item list.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use crate::api::types::{Product, SearchSuggestion};
use crate::filters;
use crate::routes::format_price;
use crate::state::AppState;

/// Maximum entries in the suggestion dropdown.
const SUGGESTION_LIMIT: usize = 5;

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Search result display data for templates.
#[derive(Clone)]
pub struct SearchResultView {
    pub id: i32,
    pub name: String,
    pub price: String,
    pub image_url: String,
    pub category: String,
}

impl From<&Product> for SearchResultView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            price: format_price(product.price),
            image_url: product.image_url.clone(),
            category: product.category.clone(),
        }
    }
}

/// Suggestion display data for templates.
#[derive(Clone)]
pub struct SuggestionView {
    pub id: i32,
    pub name: String,
}

impl From<&SearchSuggestion> for SuggestionView {
    fn from(suggestion: &SearchSuggestion) -> Self {
        Self {
            id: suggestion.id.as_i32(),
            name: suggestion.name.clone(),
        }
    }
}

/// Full search page template.
#[derive(Template, WebTemplate)]
#[template(path = "search.html")]
pub struct SearchPageTemplate {
    pub query: String,
    pub results: Vec<SearchResultView>,
    pub searched: bool,
}

/// Search suggestions template (HTMX fragment).
#[derive(Template, WebTemplate)]
#[template(path = "partials/search_suggestions.html")]
pub struct SuggestionsTemplate {
    pub suggestions: Vec<SuggestionView>,
}

/// Full search page.
///
/// A collaborator failure degrades to an empty result list.
#[instrument(skip(state))]
pub async fn search_page(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    let query_str = query.q.trim().to_string();

    let results = if query_str.is_empty() {
        Vec::new()
    } else {
        state
            .catalog()
            .search_products(&query_str)
            .await
            .map_or_else(
                |e| {
                    tracing::error!("Search failed: {e}");
                    Vec::new()
                },
                |products| products.iter().map(SearchResultView::from).collect(),
            )
    };

    SearchPageTemplate {
        searched: !query_str.is_empty(),
        query: query_str,
        results,
    }
}

/// Search suggestions endpoint (HTMX).
#[instrument(skip(state))]
pub async fn suggest(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    let query_str = query.q.trim();

    if query_str.is_empty() {
        return SuggestionsTemplate {
            suggestions: Vec::new(),
        };
    }

    let suggestions = state
        .catalog()
        .suggestions(query_str, SUGGESTION_LIMIT)
        .await
        .map_or_else(
            |e| {
                tracing::warn!("Suggestion lookup failed: {e}");
                Vec::new()
            },
            |suggestions| suggestions.iter().map(SuggestionView::from).collect(),
        );

    SuggestionsTemplate { suggestions }
}
