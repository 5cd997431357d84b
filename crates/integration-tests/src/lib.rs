//! End-to-end test helpers for Roastery.
//!
//! # Running Tests
//!
//! ```bash
//! # Start PostgreSQL and the server
//! cargo run -p roastery-server
//!
//! # Run the ignored end-to-end tests
//! cargo test -p roastery-integration-tests -- --ignored
//! ```
//!
//! Tests create users and products with unique random names, so they can be
//! re-run against the same database without cleanup.

use reqwest::Client;
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the server (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("ROASTERY_BASE_URL").unwrap_or_else(|_| "http://localhost:8000".to_string())
}

/// A unique name for this test run, e.g. `alice-9f2c...`.
#[must_use]
pub fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

/// Register a user and return the response body.
///
/// # Panics
///
/// Panics if the request fails or returns a non-success status.
pub async fn register(client: &Client, username: &str, password: &str) -> Value {
    let resp = client
        .post(format!("{}/users/", base_url()))
        .json(&json!({
            "username": username,
            "email": format!("{username}@x.com"),
            "password": password,
        }))
        .send()
        .await
        .expect("Failed to register user");

    assert!(resp.status().is_success(), "registration failed");
    resp.json().await.expect("Failed to parse user body")
}

/// Log in and return a bearer token.
///
/// # Panics
///
/// Panics if the request fails or returns a non-success status.
pub async fn login(client: &Client, username: &str, password: &str) -> String {
    let resp = client
        .post(format!("{}/token", base_url()))
        .form(&[("username", username), ("password", password)])
        .send()
        .await
        .expect("Failed to request token");

    assert!(resp.status().is_success(), "login failed");
    let body: Value = resp.json().await.expect("Failed to parse token body");
    assert_eq!(body["token_type"], "bearer");
    body["access_token"]
        .as_str()
        .expect("missing access_token")
        .to_string()
}

/// Create a product and return its id.
///
/// # Panics
///
/// Panics if the request fails or returns a non-success status.
pub async fn create_product(client: &Client, token: &str, name: &str, price: f64) -> i64 {
    let resp = client
        .post(format!("{}/products/", base_url()))
        .bearer_auth(token)
        .json(&json!({
            "name": name,
            "description": "test product",
            "price": price,
            "category": "coffee",
            "image_url": "https://example.invalid/latte.png",
        }))
        .send()
        .await
        .expect("Failed to create product");

    assert!(resp.status().is_success(), "product creation failed");
    let body: Value = resp.json().await.expect("Failed to parse product body");
    body["id"].as_i64().expect("missing product id")
}

/// Read a decimal JSON value that may be serialized as a string or a number.
///
/// # Panics
///
/// Panics if the value is neither.
#[must_use]
pub fn decimal_field(value: &Value) -> f64 {
    value.as_f64().unwrap_or_else(|| {
        value
            .as_str()
            .and_then(|s| s.parse().ok())
            .expect("not a decimal value")
    })
}
