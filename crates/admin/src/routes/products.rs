//! Product management route handlers.
//!
//! The form covers the whole collaborator payload. Structured sub-documents
//! (variants, specifications) are entered as JSON in textareas and validated
//! here before anything is sent; tags are a comma-separated line.

use std::collections::BTreeMap;
use std::str::FromStr;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use stark_core::{CategoryId, ProductId};

use crate::api::{AdminProduct, Category, ProductPayload, ProductVariant};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Product row display data for templates.
#[derive(Clone)]
pub struct ProductRowView {
    pub id: i32,
    pub name: String,
    pub price: String,
    pub stock: i64,
    pub category: String,
}

impl From<&AdminProduct> for ProductRowView {
    fn from(product: &AdminProduct) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            price: format!("${:.2}", product.price.round_dp(2)),
            stock: product.stock,
            category: product.category.clone(),
        }
    }
}

/// Category display data for templates.
#[derive(Clone)]
pub struct CategoryView {
    pub id: i32,
    pub name: String,
}

impl From<&Category> for CategoryView {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.as_i32(),
            name: category.name.clone(),
        }
    }
}

/// Prefilled form values; everything is a string at this level.
#[derive(Clone, Default)]
pub struct ProductFormView {
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock: String,
    pub category_id: i32,
    pub image: String,
    pub featured: bool,
}

impl From<&AdminProduct> for ProductFormView {
    fn from(product: &AdminProduct) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            stock: product.stock.to_string(),
            // The catalog record carries the category name, not its id; the
            // operator re-picks it in the select.
            category_id: 0,
            image: product.image_url.clone(),
            featured: false,
        }
    }
}

/// Product listing template.
#[derive(Template, WebTemplate)]
#[template(path = "products/list.html")]
pub struct ProductListTemplate {
    pub products: Vec<ProductRowView>,
}

/// Product create/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    pub heading: String,
    pub action: String,
    pub categories: Vec<CategoryView>,
    pub form: ProductFormView,
}

/// Product form data, as posted.
#[derive(Debug, Deserialize)]
pub struct ProductFormData {
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock: i64,
    pub category_id: i32,
    pub image: String,
    #[serde(default)]
    pub featured: Option<String>,
    #[serde(default)]
    pub seo_title: String,
    #[serde(default)]
    pub seo_description: String,
    /// Comma-separated tag line.
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub discount_price: String,
    #[serde(default)]
    pub discount_start: String,
    #[serde(default)]
    pub discount_end: String,
    /// JSON array of variant rows.
    #[serde(default)]
    pub variants: String,
    /// JSON object of specification key/values.
    #[serde(default)]
    pub specifications: String,
}

impl ProductFormData {
    /// Validate the form and build the collaborator payload.
    fn into_payload(self) -> Result<ProductPayload> {
        let price = parse_decimal("price", &self.price)?;
        let discount_price = parse_optional(&self.discount_price, |value| {
            parse_decimal("discount_price", value)
        })?;
        let discount_start = parse_optional(&self.discount_start, |value| {
            parse_date("discount_start", value)
        })?;
        let discount_end = parse_optional(&self.discount_end, |value| {
            parse_date("discount_end", value)
        })?;

        let variants: Vec<ProductVariant> = parse_optional(&self.variants, |value| {
            serde_json::from_str(value)
                .map_err(|e| AppError::BadRequest(format!("variants is not valid JSON: {e}")))
        })?
        .unwrap_or_default();

        let specifications: BTreeMap<String, String> =
            parse_optional(&self.specifications, |value| {
                serde_json::from_str(value).map_err(|e| {
                    AppError::BadRequest(format!("specifications is not valid JSON: {e}"))
                })
            })?
            .unwrap_or_default();

        let tags = self
            .tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(String::from)
            .collect();

        Ok(ProductPayload {
            name: self.name,
            description: self.description,
            price,
            stock: self.stock,
            category_id: CategoryId::new(self.category_id),
            image: self.image,
            featured: self.featured.is_some(),
            seo_title: none_if_empty(self.seo_title),
            seo_description: none_if_empty(self.seo_description),
            tags,
            discount_price,
            discount_start,
            discount_end,
            variants,
            specifications,
        })
    }
}

fn none_if_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Apply a parser to a form field, treating an empty field as absent.
fn parse_optional<T>(
    value: &str,
    parse: impl FnOnce(&str) -> Result<T>,
) -> Result<Option<T>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    parse(trimmed).map(Some)
}

fn parse_decimal(field: &str, value: &str) -> Result<Decimal> {
    Decimal::from_str(value.trim())
        .map_err(|e| AppError::BadRequest(format!("{field} is not a valid amount: {e}")))
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| AppError::BadRequest(format!("{field} is not a valid date: {e}")))
}

/// Display the product listing.
#[instrument(skip(state))]
pub async fn list(_auth: RequireAuth, State(state): State<AppState>) -> Result<ProductListTemplate> {
    let products = state.api().list_products().await?;

    Ok(ProductListTemplate {
        products: products.iter().map(ProductRowView::from).collect(),
    })
}

/// Display the empty product form.
#[instrument(skip(state))]
pub async fn new_form(
    _auth: RequireAuth,
    State(state): State<AppState>,
) -> Result<ProductFormTemplate> {
    let categories = state.api().categories().await?;

    Ok(ProductFormTemplate {
        heading: "Add New Product".to_string(),
        action: "/products".to_string(),
        categories: categories.iter().map(CategoryView::from).collect(),
        form: ProductFormView::default(),
    })
}

/// Display the form prefilled with an existing product.
#[instrument(skip(state))]
pub async fn edit_form(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ProductFormTemplate> {
    let product = state.api().get_product(ProductId::new(id)).await?;
    let categories = state.api().categories().await?;

    Ok(ProductFormTemplate {
        heading: "Edit Product".to_string(),
        action: format!("/products/{id}"),
        categories: categories.iter().map(CategoryView::from).collect(),
        form: ProductFormView::from(&product),
    })
}

/// Create a product from the posted form.
#[instrument(skip(state, form), fields(name = %form.name))]
pub async fn create(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Form(form): Form<ProductFormData>,
) -> Result<Redirect> {
    let payload = form.into_payload()?;
    state.api().create_product(&payload).await?;
    Ok(Redirect::to("/products"))
}

/// Update a product from the posted form.
#[instrument(skip(state, form), fields(name = %form.name))]
pub async fn update(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<ProductFormData>,
) -> Result<Redirect> {
    let payload = form.into_payload()?;
    state.api().update_product(ProductId::new(id), &payload).await?;
    Ok(Redirect::to("/products"))
}

/// Delete a product.
#[instrument(skip(state))]
pub async fn delete(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Redirect> {
    state.api().delete_product(ProductId::new(id)).await?;
    Ok(Redirect::to("/products"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    fn base_form() -> ProductFormData {
        ProductFormData {
            name: "Arc Reactor Lamp".to_string(),
            description: "Glows.".to_string(),
            price: "49.99".to_string(),
            stock: 12,
            category_id: 1,
            image: "arc.png".to_string(),
            featured: Some("on".to_string()),
            seo_title: String::new(),
            seo_description: String::new(),
            tags: String::new(),
            discount_price: String::new(),
            discount_start: String::new(),
            discount_end: String::new(),
            variants: String::new(),
            specifications: String::new(),
        }
    }

    #[test]
    fn test_minimal_form_builds_payload() {
        let payload = base_form().into_payload().unwrap();
        assert_eq!(payload.price, dec!(49.99));
        assert!(payload.featured);
        assert!(payload.tags.is_empty());
        assert_eq!(payload.discount_price, None);
        assert!(payload.variants.is_empty());
    }

    #[test]
    fn test_tags_split_and_trimmed() {
        let mut form = base_form();
        form.tags = "lamp, gift , ,desk".to_string();
        let payload = form.into_payload().unwrap();
        assert_eq!(payload.tags, vec!["lamp", "gift", "desk"]);
    }

    #[test]
    fn test_discount_window_parsed() {
        let mut form = base_form();
        form.discount_price = "39.99".to_string();
        form.discount_start = "2025-11-24".to_string();
        form.discount_end = "2025-12-01".to_string();
        let payload = form.into_payload().unwrap();
        assert_eq!(payload.discount_price, Some(dec!(39.99)));
        assert_eq!(
            payload.discount_start,
            NaiveDate::from_ymd_opt(2025, 11, 24)
        );
    }

    #[test]
    fn test_variants_json_parsed() {
        let mut form = base_form();
        form.variants = r#"[{"color": "gold", "stock": 3, "price": 59.99}]"#.to_string();
        let payload = form.into_payload().unwrap();
        assert_eq!(payload.variants.len(), 1);
        assert_eq!(payload.variants[0].color.as_deref(), Some("gold"));
    }

    #[test]
    fn test_bad_price_rejected() {
        let mut form = base_form();
        form.price = "a lot".to_string();
        assert!(matches!(
            form.into_payload().unwrap_err(),
            AppError::BadRequest(_)
        ));
    }

    #[test]
    fn test_bad_variants_json_rejected() {
        let mut form = base_form();
        form.variants = "not json".to_string();
        assert!(matches!(
            form.into_payload().unwrap_err(),
            AppError::BadRequest(_)
        ));
    }
}
