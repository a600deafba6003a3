//! Client-level tests for the catalog and payment collaborators.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use rust_decimal::dec;
use serde_json::json;

use stark_core::{CheckoutIntent, PaymentMethod, ProductId};
use stark_integration_tests::MockCollaborator;
use stark_storefront::api::{ApiError, CatalogClient, PaymentClient};
use stark_storefront::config::ApiConfig;

fn intent(method: PaymentMethod) -> CheckoutIntent {
    CheckoutIntent {
        order_id: "order-77".to_string(),
        amount: dec!(25.00),
        method,
        upi_id: None,
    }
}

#[tokio::test]
async fn test_initialize_payment_wire_shape() {
    let mock = MockCollaborator::spawn().await;
    let payments = PaymentClient::new(&mock.storefront_api()).unwrap();

    let receipt = payments
        .initialize_payment(&intent(PaymentMethod::CashOnDelivery))
        .await
        .unwrap();
    assert_eq!(receipt, json!({"success": true}));

    let calls = mock.initialize_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0],
        json!({"orderId": "order-77", "amount": 25.0, "method": "cod"})
    );
}

#[tokio::test]
async fn test_rejected_payment_keeps_message_verbatim() {
    let mock = MockCollaborator::spawn().await;
    mock.set_initialize_response(500, json!({"error": "processor exploded"}));

    let payments = PaymentClient::new(&mock.storefront_api()).unwrap();
    let err = payments
        .initialize_payment(&intent(PaymentMethod::Card))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Rejected(_)));
    assert_eq!(err.to_string(), "processor exploded");
}

#[tokio::test]
async fn test_unreachable_collaborator_is_transport_error() {
    // Nothing listens on this port.
    let api = ApiConfig::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
    let payments = PaymentClient::new(&api).unwrap();

    let err = payments
        .initialize_payment(&intent(PaymentMethod::CashOnDelivery))
        .await
        .unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_verify_upi() {
    let mock = MockCollaborator::spawn().await;
    let payments = PaymentClient::new(&mock.storefront_api()).unwrap();

    let verification = payments.verify_upi("txn_captured").await.unwrap();
    assert!(verification.success);

    // An uncaptured transaction is an error response from the collaborator.
    assert!(payments.verify_upi("txn_unknown").await.is_err());
}

#[tokio::test]
async fn test_catalog_product_fetch_and_not_found() {
    let mock = MockCollaborator::spawn().await;
    let catalog = CatalogClient::new(&mock.storefront_api()).unwrap();

    let product = catalog.get_product(ProductId::new(1)).await.unwrap();
    assert_eq!(product.name, "Arc Reactor Lamp");
    assert_eq!(product.price, dec!(10));
    assert!(product.in_stock());

    let err = catalog.get_product(ProductId::new(99)).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
    assert_eq!(err.to_string(), "Not found: Product not found");
}

#[tokio::test]
async fn test_catalog_featured_and_categories() {
    let mock = MockCollaborator::spawn().await;
    let catalog = CatalogClient::new(&mock.storefront_api()).unwrap();

    let featured = catalog.featured_products().await.unwrap();
    assert_eq!(featured.len(), 1);
    assert_eq!(featured[0].name, "Arc Reactor Lamp");

    let categories = catalog.categories().await.unwrap();
    let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Gadgets", "Merch"]);
}

#[tokio::test]
async fn test_search_and_typed_suggestions() {
    let mock = MockCollaborator::spawn().await;
    let catalog = CatalogClient::new(&mock.storefront_api()).unwrap();

    let results = catalog.search_products("mug").await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "Stark Industries Mug");

    let suggestions = catalog.suggestions("arc", 5).await.unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].id, ProductId::new(1));
    assert_eq!(suggestions[0].name, "Arc Reactor Lamp");

    // The limit caps the list.
    let capped = catalog.suggestions("", 1).await.unwrap();
    assert_eq!(capped.len(), 1);
}
