//! Domain types for the storefront API.
//!
//! These types mirror the collaborator's JSON payloads. Prices arrive as
//! JSON numbers and are decoded into [`Decimal`] at the boundary.

use rust_decimal::Decimal;
use serde::Deserialize;

use stark_core::{CategoryId, ProductId};

/// A product record from `GET /api/products/{id}` and search listings.
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    /// Catalog product id.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Rich-text description (HTML from the catalog).
    pub description: String,
    /// Price in the store currency.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Primary product image URL.
    pub image_url: String,
    /// Units available; 0 means out of stock.
    pub stock: i64,
    /// Category name the product belongs to.
    pub category: String,
}

impl Product {
    /// Whether any stock is available.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// A product record from `GET /api/products/featured`.
///
/// The featured listing is a slimmer shape than the full product record.
#[derive(Debug, Clone, Deserialize)]
pub struct FeaturedProduct {
    pub id: ProductId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image_url: String,
    pub description: String,
}

/// A category from `GET /api/categories`.
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// One entry in the search suggestion list.
///
/// The suggestion record has an explicit shape at this boundary; suggestions
/// are derived from product search results, not an untyped passthrough.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSuggestion {
    pub id: ProductId,
    pub name: String,
}

impl From<&Product> for SearchSuggestion {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_decodes_collaborator_payload() {
        let product: Product = serde_json::from_str(
            r#"{
                "id": 3,
                "name": "Arc Reactor Lamp",
                "description": "<p>Glows.</p>",
                "price": 49.99,
                "image_url": "https://cdn.example.com/arc.png",
                "stock": 12,
                "category": "Lighting"
            }"#,
        )
        .expect("deserialize");

        assert_eq!(product.id, ProductId::new(3));
        assert_eq!(product.price.to_string(), "49.99");
        assert!(product.in_stock());
    }

    #[test]
    fn test_out_of_stock() {
        let product: Product = serde_json::from_str(
            r#"{
                "id": 1,
                "name": "Sold Out",
                "description": "",
                "price": 1.0,
                "image_url": "",
                "stock": 0,
                "category": "Misc"
            }"#,
        )
        .expect("deserialize");
        assert!(!product.in_stock());
    }
}
