//! Demo data seeding through the admin API.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, dec};
use secrecy::{ExposeSecret, SecretString};

use stark_admin::api::{AdminApiClient, ProductPayload};
use stark_admin::config::ApiConfig;
use stark_core::CategoryId;

use crate::commands::{api_base_url, api_timeout};

/// A demo product row.
struct DemoProduct {
    name: &'static str,
    description: &'static str,
    price: Decimal,
    stock: i64,
    category_id: i32,
    image: &'static str,
    featured: bool,
}

fn demo_products() -> Vec<DemoProduct> {
    vec![
        DemoProduct {
            name: "Arc Reactor Lamp",
            description: "<p>A palladium-free desk lamp with a soft blue glow.</p>",
            price: dec!(49.99),
            stock: 12,
            category_id: 1,
            image: "https://cdn.example.com/products/arc-lamp.png",
            featured: true,
        },
        DemoProduct {
            name: "Repulsor Glove",
            description: "<p>Left hand only. Batteries not included.</p>",
            price: dec!(99.95),
            stock: 4,
            category_id: 1,
            image: "https://cdn.example.com/products/repulsor-glove.png",
            featured: false,
        },
        DemoProduct {
            name: "Stark Industries Mug",
            description: "<p>Holds 400ml of coffee. Genius not guaranteed.</p>",
            price: dec!(14.50),
            stock: 120,
            category_id: 2,
            image: "https://cdn.example.com/products/mug.png",
            featured: true,
        },
    ]
}

/// Log in with `ADMIN_USERNAME`/`ADMIN_PASSWORD` and create demo products.
pub async fn products() -> Result<(), Box<dyn std::error::Error>> {
    let username =
        std::env::var("ADMIN_USERNAME").map_err(|_| "ADMIN_USERNAME is not set")?;
    let password = SecretString::from(
        std::env::var("ADMIN_PASSWORD").map_err(|_| "ADMIN_PASSWORD is not set")?,
    );

    let api = ApiConfig::new(&api_base_url()?, api_timeout())?;
    let client = AdminApiClient::new(&api)?;

    client.login(&username, password.expose_secret()).await?;
    tracing::info!("Logged in as {username}");

    for demo in demo_products() {
        let payload = ProductPayload {
            name: demo.name.to_string(),
            description: demo.description.to_string(),
            price: demo.price,
            stock: demo.stock,
            category_id: CategoryId::new(demo.category_id),
            image: demo.image.to_string(),
            featured: demo.featured,
            seo_title: None,
            seo_description: None,
            tags: vec!["demo".to_string()],
            discount_price: None,
            discount_start: None,
            discount_end: None,
            variants: Vec::new(),
            specifications: BTreeMap::new(),
        };

        client.create_product(&payload).await?;
        tracing::info!("Created product {}", demo.name);
    }

    tracing::info!("Seeding complete");
    Ok(())
}
