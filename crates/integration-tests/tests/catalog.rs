//! Integration tests for the public catalog.
//!
//! These tests require a running server with a migrated, seeded database.
//! Run with: `cargo test -p paseo-integration-tests -- --ignored`

use paseo_integration_tests::{base_url, client};
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn health_endpoints_respond() {
    let base = base_url();
    let client = client();

    let resp = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base}/health/ready"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn product_listing_is_paginated() {
    let base = base_url();
    let client = client();

    let body: Value = client
        .get(format!("{base}/products?page=1&limit=2"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let products = body["products"].as_array().expect("products array");
    assert!(products.len() <= 2);
    assert_eq!(body["page"], 1);
    assert!(body["total"].as_i64().unwrap() >= products.len() as i64);
    assert!(body["totalPages"].as_i64().unwrap() >= 1);

    // Every product embeds its category
    for product in products {
        assert!(product["category"]["slug"].is_string());
        assert!(product["price"].is_string());
    }
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn product_listing_filters_by_category() {
    let base = base_url();
    let client = client();

    let body: Value = client
        .get(format!("{base}/products?category=deportivos"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    for product in body["products"].as_array().unwrap() {
        assert_eq!(product["category"]["slug"], "deportivos");
    }
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn missing_product_is_404() {
    let base = base_url();
    let client = client();

    let resp = client
        .get(format!("{base}/products/999999999"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn categories_are_listed() {
    let base = base_url();
    let client = client();

    let body: Value = client
        .get(format!("{base}/categories"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let categories = body.as_array().expect("categories array");
    assert!(!categories.is_empty());
    assert!(categories.iter().any(|c| c["slug"] == "deportivos"));
}
