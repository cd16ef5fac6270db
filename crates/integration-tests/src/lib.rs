//! Integration tests for Paseo.
//!
//! # Running Tests
//!
//! These tests exercise a running server against a migrated, seeded
//! database and are `#[ignore]`d by default:
//!
//! ```bash
//! cargo run -p paseo-cli -- migrate
//! cargo run -p paseo-cli -- seed
//! cargo run -p paseo-server &
//!
//! # Mint tokens for the seeded accounts and export them:
//! cargo run -p paseo-cli -- session issue -e user@example.com
//! cargo run -p paseo-cli -- session issue -e admin@example.com
//! export PASEO_TEST_USER_TOKEN=...
//! export PASEO_TEST_ADMIN_TOKEN=...
//!
//! cargo test -p paseo-integration-tests -- --ignored
//! ```

use reqwest::{Client, RequestBuilder};

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("PASEO_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Plain HTTP client.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn client() -> Client {
    Client::builder().build().expect("Failed to create HTTP client")
}

/// Session token for the seeded customer account.
///
/// # Panics
///
/// Panics when `PASEO_TEST_USER_TOKEN` is unset; the ignored tests need it.
#[must_use]
pub fn user_token() -> String {
    std::env::var("PASEO_TEST_USER_TOKEN").expect("PASEO_TEST_USER_TOKEN not set")
}

/// Session token for the seeded admin account.
///
/// # Panics
///
/// Panics when `PASEO_TEST_ADMIN_TOKEN` is unset; the ignored tests need it.
#[must_use]
pub fn admin_token() -> String {
    std::env::var("PASEO_TEST_ADMIN_TOKEN").expect("PASEO_TEST_ADMIN_TOKEN not set")
}

/// Attach a bearer token to a request.
#[must_use]
pub fn with_token(request: RequestBuilder, token: &str) -> RequestBuilder {
    request.header("authorization", format!("Bearer {token}"))
}
