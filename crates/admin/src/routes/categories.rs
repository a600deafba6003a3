//! Category management route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::Redirect};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::routes::products::CategoryView;
use crate::state::AppState;

/// Category listing template.
#[derive(Template, WebTemplate)]
#[template(path = "categories.html")]
pub struct CategoryListTemplate {
    pub categories: Vec<CategoryView>,
}

/// New category form data.
#[derive(Debug, Deserialize)]
pub struct NewCategoryForm {
    pub name: String,
}

/// Display the category listing.
#[instrument(skip(state))]
pub async fn list(
    _auth: RequireAuth,
    State(state): State<AppState>,
) -> Result<CategoryListTemplate> {
    let categories = state.api().categories().await?;

    Ok(CategoryListTemplate {
        categories: categories.iter().map(CategoryView::from).collect(),
    })
}

/// Create a category from the posted form.
#[instrument(skip(state, form), fields(name = %form.name))]
pub async fn create(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Form(form): Form<NewCategoryForm>,
) -> Result<Redirect> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("category name is required".to_string()));
    }

    state.api().create_category(name).await?;
    Ok(Redirect::to("/categories"))
}
