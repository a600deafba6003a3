//! Wire types for the admin endpoints.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stark_core::{CategoryId, ProductId};

/// Dashboard statistics from `GET /api/admin/stats`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_products: i64,
    pub total_orders: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
    pub low_stock: i64,
}

/// A slim product record from `GET /api/admin/products/recent`.
#[derive(Debug, Clone, Deserialize)]
pub struct RecentProduct {
    pub id: ProductId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock: i64,
    pub category: String,
}

/// A full product record from the catalog listing.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminProduct {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image_url: String,
    pub stock: i64,
    pub category: String,
}

/// A category from `GET /api/categories`.
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// A size/color variant row in the product payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub stock: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// Body for `POST /api/admin/products` and `PUT /api/admin/products/{id}`.
///
/// Mirrors the product form fields one-to-one; the collaborator treats the
/// richer fields (SEO, tags, discount window, variants, specifications) as
/// an opaque document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPayload {
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock: i64,
    pub category_id: CategoryId,
    pub image: String,
    pub featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub discount_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_start: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_end: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<ProductVariant>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub specifications: BTreeMap<String, String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    #[test]
    fn test_stats_decode() {
        let stats: AdminStats = serde_json::from_str(
            r#"{"totalProducts": 100, "totalOrders": 50, "totalRevenue": 5000.0, "lowStock": 5}"#,
        )
        .unwrap();
        assert_eq!(stats.total_products, 100);
        assert_eq!(stats.total_revenue, dec!(5000));
    }

    #[test]
    fn test_product_payload_minimal_shape() {
        let payload = ProductPayload {
            name: "Repulsor Glove".to_string(),
            description: "Left hand only.".to_string(),
            price: dec!(99.95),
            stock: 4,
            category_id: CategoryId::new(2),
            image: "https://cdn.example.com/glove.png".to_string(),
            featured: false,
            seo_title: None,
            seo_description: None,
            tags: Vec::new(),
            discount_price: None,
            discount_start: None,
            discount_end: None,
            variants: Vec::new(),
            specifications: BTreeMap::new(),
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Repulsor Glove",
                "description": "Left hand only.",
                "price": 99.95,
                "stock": 4,
                "category_id": 2,
                "image": "https://cdn.example.com/glove.png",
                "featured": false,
            })
        );
    }

    #[test]
    fn test_product_payload_full_shape() {
        let payload = ProductPayload {
            name: "Arc Reactor Lamp".to_string(),
            description: "Glows.".to_string(),
            price: dec!(49.99),
            stock: 12,
            category_id: CategoryId::new(1),
            image: "arc.png".to_string(),
            featured: true,
            seo_title: Some("Arc Reactor Lamp".to_string()),
            seo_description: Some("A desk lamp.".to_string()),
            tags: vec!["lamp".to_string(), "gift".to_string()],
            discount_price: Some(dec!(39.99)),
            discount_start: NaiveDate::from_ymd_opt(2025, 11, 24),
            discount_end: NaiveDate::from_ymd_opt(2025, 12, 1),
            variants: vec![ProductVariant {
                size: None,
                color: Some("gold".to_string()),
                stock: 3,
                price: dec!(59.99),
            }],
            specifications: BTreeMap::from([("power".to_string(), "USB-C".to_string())]),
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["tags"], serde_json::json!(["lamp", "gift"]));
        assert_eq!(json["discount_start"], "2025-11-24");
        assert_eq!(json["variants"][0]["color"], "gold");
        assert_eq!(json["specifications"]["power"], "USB-C");
    }
}
