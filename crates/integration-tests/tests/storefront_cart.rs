//! Cart flow tests against the real storefront router.

#![allow(clippy::unwrap_used)]

use rust_decimal::dec;

use stark_core::ProductId;
use stark_integration_tests::{MockCollaborator, spawn_storefront};

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn test_add_merges_lines_and_updates_badge() {
    let mock = MockCollaborator::spawn().await;
    let storefront = spawn_storefront(&mock).await;
    let client = client();

    for _ in 0..3 {
        let response = client
            .post(storefront.url("/cart/add"))
            .form(&[("product_id", "1"), ("quantity", "2")])
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
    }

    // Three adds of the same product collapse into one line of six units.
    let cart = storefront.cart().snapshot();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.items()[0].quantity, 6);

    let badge = client
        .get(storefront.url("/cart/count"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(badge.trim(), "6");
}

#[tokio::test]
async fn test_cart_page_shows_rounded_total() {
    let mock = MockCollaborator::spawn().await;
    let storefront = spawn_storefront(&mock).await;
    let client = client();

    // Two of product 1 (10.00 each) and one of product 2 (5.00).
    client
        .post(storefront.url("/cart/add"))
        .form(&[("product_id", "1"), ("quantity", "2")])
        .send()
        .await
        .unwrap();
    client
        .post(storefront.url("/cart/add"))
        .form(&[("product_id", "2"), ("quantity", "1")])
        .send()
        .await
        .unwrap();

    assert_eq!(storefront.cart().total(), dec!(25));

    let body = client
        .get(storefront.url("/cart"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("$25.00"));
}

#[tokio::test]
async fn test_update_to_zero_is_rejected() {
    let mock = MockCollaborator::spawn().await;
    let storefront = spawn_storefront(&mock).await;
    let client = client();

    client
        .post(storefront.url("/cart/add"))
        .form(&[("product_id", "1"), ("quantity", "2")])
        .send()
        .await
        .unwrap();

    let response = client
        .post(storefront.url("/cart/update"))
        .form(&[("product_id", "1"), ("quantity", "0")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    // The line still has its old quantity; zero never removes.
    assert_eq!(storefront.cart().snapshot().items()[0].quantity, 2);
}

#[tokio::test]
async fn test_remove_and_clear_fragments() {
    let mock = MockCollaborator::spawn().await;
    let storefront = spawn_storefront(&mock).await;
    let client = client();

    client
        .post(storefront.url("/cart/add"))
        .form(&[("product_id", "1"), ("quantity", "1")])
        .send()
        .await
        .unwrap();
    client
        .post(storefront.url("/cart/add"))
        .form(&[("product_id", "2"), ("quantity", "1")])
        .send()
        .await
        .unwrap();

    let body = client
        .post(storefront.url("/cart/remove"))
        .form(&[("product_id", "1")])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Stark Industries Mug"));
    assert!(!body.contains("Arc Reactor Lamp"));

    // Removing the same product again is a no-op, not an error.
    let response = client
        .post(storefront.url("/cart/remove"))
        .form(&[("product_id", "1")])
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let body = client
        .post(storefront.url("/cart/clear"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Your cart is empty"));
    assert!(storefront.cart().snapshot().is_empty());
}

#[tokio::test]
async fn test_add_unknown_product_fails_without_mutation() {
    let mock = MockCollaborator::spawn().await;
    let storefront = spawn_storefront(&mock).await;
    let client = client();

    let response = client
        .post(storefront.url("/cart/add"))
        .form(&[("product_id", "404"), ("quantity", "1")])
        .send()
        .await
        .unwrap();
    assert!(response.status().is_server_error() || response.status().is_client_error());

    assert!(storefront.cart().snapshot().is_empty());
    assert!(!storefront
        .cart()
        .snapshot()
        .items()
        .iter()
        .any(|item| item.product_id == ProductId::new(404)));
}
