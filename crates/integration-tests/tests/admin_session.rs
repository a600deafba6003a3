//! Admin API client session tests.
//!
//! The collaborator owns the admin session; the client's cookie store must
//! carry it across calls.

#![allow(clippy::unwrap_used)]

use std::collections::BTreeMap;

use rust_decimal::dec;
use serde_json::json;

use stark_admin::api::{AdminApiClient, AdminApiError, ProductPayload};
use stark_core::{CategoryId, ProductId};
use stark_integration_tests::{ADMIN_PASSWORD, ADMIN_USERNAME, MockCollaborator};

fn payload(name: &str) -> ProductPayload {
    ProductPayload {
        name: name.to_string(),
        description: "A product.".to_string(),
        price: dec!(19.99),
        stock: 7,
        category_id: CategoryId::new(1),
        image: "p.png".to_string(),
        featured: false,
        seo_title: None,
        seo_description: None,
        tags: Vec::new(),
        discount_price: None,
        discount_start: None,
        discount_end: None,
        variants: Vec::new(),
        specifications: BTreeMap::new(),
    }
}

#[tokio::test]
async fn test_check_auth_reflects_login_state() {
    let mock = MockCollaborator::spawn().await;
    let client = AdminApiClient::new(&mock.admin_api()).unwrap();

    // Fresh client, fresh cookie store: not authenticated.
    assert!(!client.check_auth().await.unwrap());

    client.login(ADMIN_USERNAME, ADMIN_PASSWORD).await.unwrap();

    // The session cookie from login is presented on the next call.
    assert!(client.check_auth().await.unwrap());
}

#[tokio::test]
async fn test_bad_credentials_are_unauthorized() {
    let mock = MockCollaborator::spawn().await;
    let client = AdminApiClient::new(&mock.admin_api()).unwrap();

    let err = client.login(ADMIN_USERNAME, "wrong").await.unwrap_err();
    assert!(matches!(err, AdminApiError::Unauthorized(_)));
    assert_eq!(err.to_string(), "Unauthorized: Invalid credentials");
}

#[tokio::test]
async fn test_product_crud_requires_session() {
    let mock = MockCollaborator::spawn().await;
    let client = AdminApiClient::new(&mock.admin_api()).unwrap();

    // Without a session every admin mutation is rejected.
    let err = client.create_product(&payload("Ghost")).await.unwrap_err();
    assert!(matches!(err, AdminApiError::Unauthorized(_)));
    assert!(mock.created_products().is_empty());

    client.login(ADMIN_USERNAME, ADMIN_PASSWORD).await.unwrap();

    client.create_product(&payload("Arc Reactor Lamp")).await.unwrap();
    client
        .update_product(ProductId::new(3), &payload("Arc Reactor Lamp v2"))
        .await
        .unwrap();
    client.delete_product(ProductId::new(3)).await.unwrap();

    let created = mock.created_products();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0]["name"], json!("Arc Reactor Lamp"));
    assert_eq!(created[0]["price"], json!(19.99));

    let updated = mock.updated_products();
    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0].0, 3);
}

#[tokio::test]
async fn test_stats_and_recent_products() {
    let mock = MockCollaborator::spawn().await;
    let client = AdminApiClient::new(&mock.admin_api()).unwrap();
    client.login(ADMIN_USERNAME, ADMIN_PASSWORD).await.unwrap();

    let stats = client.stats().await.unwrap();
    assert_eq!(stats.total_products, 100);
    assert_eq!(stats.total_revenue, dec!(5000));
    assert_eq!(stats.low_stock, 5);

    let recent = client.recent_products().await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].name, "Arc Reactor Lamp");
}

#[tokio::test]
async fn test_admin_routes_gated_until_login() {
    let mock = MockCollaborator::spawn().await;

    // Run the real admin console against the mock collaborator.
    let config = stark_admin::config::AdminConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        api: mock.admin_api(),
        sentry_dsn: None,
    };
    let state = stark_admin::state::AppState::new(config).unwrap();
    state.refresh_auth().await;
    let app = stark_admin::routes::routes().with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    // The whole gated subtree bounces to the login page.
    for path in ["/", "/products", "/categories"] {
        let response = client
            .get(format!("http://{addr}{path}"))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_redirection(), "{path} not gated");
        assert_eq!(
            response
                .headers()
                .get(reqwest::header::LOCATION)
                .and_then(|value| value.to_str().ok()),
            Some("/login")
        );
    }

    // Logging in through the console flips the gate.
    let response = client
        .post(format!("http://{addr}/login"))
        .form(&[("username", ADMIN_USERNAME), ("password", ADMIN_PASSWORD)])
        .send()
        .await
        .unwrap();
    assert!(response.status().is_redirection());

    let response = client.get(format!("http://{addr}/")).send().await.unwrap();
    assert!(response.status().is_success());
    let body = response.text().await.unwrap();
    assert!(body.contains("Total Products"));
}

#[tokio::test]
async fn test_logout_drops_session() {
    let mock = MockCollaborator::spawn().await;
    let client = AdminApiClient::new(&mock.admin_api()).unwrap();

    client.login(ADMIN_USERNAME, ADMIN_PASSWORD).await.unwrap();
    assert!(client.check_auth().await.unwrap());

    client.logout().await.unwrap();
    assert!(!client.check_auth().await.unwrap());
}
