//! Integration tests for the admin dashboard routes.
//!
//! These tests require a running server, a migrated and seeded database,
//! and session tokens for the seeded accounts (`PASEO_TEST_USER_TOKEN`,
//! `PASEO_TEST_ADMIN_TOKEN`).
//!
//! Run with: `cargo test -p paseo-integration-tests -- --ignored`

use paseo_integration_tests::{admin_token, base_url, client, user_token, with_token};
use reqwest::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

#[tokio::test]
#[ignore = "Requires running server, seeded database, and session tokens"]
async fn dashboard_is_gated_by_role() {
    let base = base_url();
    let client = client();

    // No session at all
    let resp = client
        .get(format!("{base}/dashboard/products"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Customer session
    let resp = with_token(client.get(format!("{base}/dashboard/products")), &user_token())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // Admin session
    let resp = with_token(client.get(format!("{base}/dashboard/products")), &admin_token())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running server, seeded database, and session tokens"]
async fn product_crud_lifecycle() {
    let base = base_url();
    let client = client();
    let token = admin_token();

    let categories: Value = with_token(client.get(format!("{base}/dashboard/categories")), &token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let category_id = categories[0]["id"].as_i64().unwrap();

    // Create
    let name = format!("Test Product {}", Uuid::new_v4());
    let resp = with_token(client.post(format!("{base}/dashboard/products")), &token)
        .json(&json!({
            "name": name,
            "price": "49.99",
            "stock": 10,
            "sizes": ["40", "41"],
            "categoryId": category_id
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = resp.json().await.unwrap();
    let product_id = created["id"].as_i64().unwrap();
    assert_eq!(created["name"], name.as_str());
    assert_eq!(created["stock"], 10);
    assert_eq!(created["category"]["id"].as_i64(), Some(category_id));

    // Partial update leaves other fields untouched
    let resp = with_token(
        client.patch(format!("{base}/dashboard/products/{product_id}")),
        &token,
    )
    .json(&json!({ "stock": 5 }))
    .send()
    .await
    .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["stock"], 5);
    assert_eq!(updated["name"], name.as_str());
    assert_eq!(updated["price"], "49.99");

    // Delete
    let resp = with_token(
        client.delete(format!("{base}/dashboard/products/{product_id}")),
        &token,
    )
    .send()
    .await
    .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client
        .get(format!("{base}/products/{product_id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running server, seeded database, and session tokens"]
async fn product_creation_requires_name_price_and_category() {
    let base = base_url();
    let client = client();

    let resp = with_token(client.post(format!("{base}/dashboard/products")), &admin_token())
        .json(&json!({ "description": "no name, price, or category" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running server, seeded database, and session tokens"]
async fn stats_and_analytics_have_expected_shape() {
    let base = base_url();
    let client = client();
    let token = admin_token();

    let stats: Value = with_token(client.get(format!("{base}/dashboard/stats")), &token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(stats["totalProducts"].as_i64().unwrap() >= 0);
    assert!(stats["totalOrders"].as_i64().unwrap() >= 0);
    assert!(stats["totalRevenue"].is_string());
    assert!(stats["recentOrders"].as_array().unwrap().len() <= 5);
    assert!(stats["topProducts"].as_array().unwrap().len() <= 5);

    let analytics: Value = with_token(client.get(format!("{base}/dashboard/analytics")), &token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(analytics["salesByMonth"].is_array());
    assert!(analytics["salesByCategory"].is_array());
    assert!(analytics["topProducts"].as_array().unwrap().len() <= 10);
}

#[tokio::test]
#[ignore = "Requires running server, seeded database, and session tokens"]
async fn order_status_walks_the_state_machine() {
    let base = base_url();
    let client = client();
    let user = user_token();
    let admin = admin_token();

    // Place an order to work with
    let products: Value = client
        .get(format!("{base}/products?limit=100"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let product = products["products"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["stock"].as_i64().unwrap() >= 1)
        .unwrap();
    with_token(client.post(format!("{base}/cart")), &user)
        .json(&json!({
            "productId": product["id"],
            "size": product["sizes"][0],
            "quantity": 1
        }))
        .send()
        .await
        .unwrap();
    let checkout: Value = with_token(client.post(format!("{base}/checkout")), &user)
        .json(&json!({
            "shippingAddress": { "street": "Calle Mayor 1", "city": "Madrid", "zipCode": "28001" },
            "paymentMethod": "card"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let order_id = checkout["orderId"].as_i64().unwrap();

    let patch_status = |status: &str| {
        let client = client.clone();
        let admin = admin.clone();
        let url = format!("{base}/dashboard/orders/{order_id}/status");
        let body = json!({ "status": status });
        async move {
            with_token(client.patch(url), &admin)
                .json(&body)
                .send()
                .await
                .unwrap()
        }
    };

    // Skipping a step is rejected
    let resp = patch_status("DELIVERED").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // The forward path works
    let resp = patch_status("PROCESSING").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let order: Value = resp.json().await.unwrap();
    assert_eq!(order["status"], "PROCESSING");

    // Cancellation from a non-terminal state works
    let resp = patch_status("CANCELLED").await;
    assert_eq!(resp.status(), StatusCode::OK);

    // Cancelled is absorbing
    let resp = patch_status("PROCESSING").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Customers cannot drive transitions
    let resp = with_token(
        client.patch(format!("{base}/dashboard/orders/{order_id}/status")),
        &user,
    )
    .json(&json!({ "status": "PROCESSING" }))
    .send()
    .await
    .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}
