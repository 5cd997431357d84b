//! End-to-end tests for the Roastery HTTP API.
//!
//! These tests require:
//! - A running `PostgreSQL` database
//! - The server running (cargo run -p roastery-server)
//!
//! Run with: cargo test -p roastery-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use roastery_integration_tests::{base_url, create_product, decimal_field, login, register, unique};

// ============================================================================
// Auth
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_register_login_me_roundtrip() {
    let client = Client::new();
    let username = unique("alice");

    let user = register(&client, &username, "pw123").await;
    assert_eq!(user["username"], username.as_str());
    assert_eq!(user["is_active"], true);
    assert!(user.get("password").is_none());
    assert!(user.get("password_hash").is_none());

    let token = login(&client, &username, "pw123").await;

    // The token resolves back to the identity that authenticated
    let me: Value = client
        .get(format!("{}/users/me/", base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to get /users/me/")
        .json()
        .await
        .expect("Failed to parse body");

    assert_eq!(me["username"], username.as_str());
    assert_eq!(me["id"], user["id"]);
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_duplicate_username_rejected() {
    let client = Client::new();
    let username = unique("bob");

    register(&client, &username, "pw123").await;

    let resp = client
        .post(format!("{}/users/", base_url()))
        .json(&json!({
            "username": username,
            "email": "other@x.com",
            "password": "different",
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // The first registration is unaffected
    login(&client, &username, "pw123").await;
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_bad_credentials_unauthorized() {
    let client = Client::new();
    let username = unique("carol");
    register(&client, &username, "pw123").await;

    let resp = client
        .post(format!("{}/token", base_url()))
        .form(&[("username", username.as_str()), ("password", "wrong")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        resp.headers()
            .get("www-authenticate")
            .and_then(|v| v.to_str().ok()),
        Some("Bearer")
    );
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_garbage_token_rejected() {
    let client = Client::new();

    let resp = client
        .get(format!("{}/users/me/", base_url()))
        .bearer_auth("not.a.token")
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Catalog
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_product_create_and_public_list() {
    let client = Client::new();
    let username = unique("dave");
    register(&client, &username, "pw123").await;
    let token = login(&client, &username, "pw123").await;

    let name = unique("Latte");
    let product_id = create_product(&client, &token, &name, 120.0).await;

    // Listing is public: no token
    let products: Vec<Value> = client
        .get(format!("{}/products/?skip=0&limit=1000000", base_url()))
        .send()
        .await
        .expect("Failed to list products")
        .json()
        .await
        .expect("Failed to parse body");

    let found = products
        .iter()
        .find(|p| p["id"].as_i64() == Some(product_id))
        .expect("created product missing from listing");
    assert_eq!(found["name"], name.as_str());
    assert_eq!(found["is_available"], true);
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_product_create_requires_token() {
    let client = Client::new();

    let resp = client
        .post(format!("{}/products/", base_url()))
        .json(&json!({
            "name": "Sneaky",
            "description": "no auth",
            "price": 1,
            "category": "coffee",
            "image_url": "",
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Orders
// ============================================================================

/// The worked example: alice buys two lattes at 120 each.
#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_order_snapshots_prices() {
    let client = Client::new();
    let username = unique("alice");
    let user = register(&client, &username, "pw123").await;
    let token = login(&client, &username, "pw123").await;

    let product_id = create_product(&client, &token, &unique("Latte"), 120.0).await;

    let order: Value = client
        .post(format!("{}/orders/", base_url()))
        .bearer_auth(&token)
        .json(&json!({
            "user_id": user["id"],
            "total_amount": 240,
            "status": "pending",
            "items": [{"product_id": product_id, "quantity": 2}],
        }))
        .send()
        .await
        .expect("Failed to create order")
        .json()
        .await
        .expect("Failed to parse order body");

    assert_eq!(order["user_id"], user["id"]);
    assert_eq!(order["status"], "pending");
    assert!((decimal_field(&order["total_amount"]) - 240.0).abs() < f64::EPSILON);

    let items = order["items"].as_array().expect("missing items");
    assert_eq!(items.len(), 1);
    let item = &items[0];
    assert_eq!(item["quantity"], 2);
    assert!((decimal_field(&item["unit_price"]) - 120.0).abs() < f64::EPSILON);
    assert!((decimal_field(&item["subtotal"]) - 240.0).abs() < f64::EPSILON);

    // The order shows up in the caller's listing, items included
    let orders: Vec<Value> = client
        .get(format!("{}/orders/", base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to list orders")
        .json()
        .await
        .expect("Failed to parse body");

    let listed = orders
        .iter()
        .find(|o| o["id"] == order["id"])
        .expect("created order missing from listing");
    assert_eq!(listed["items"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_missing_product_aborts_whole_order() {
    let client = Client::new();
    let username = unique("erin");
    register(&client, &username, "pw123").await;
    let token = login(&client, &username, "pw123").await;

    // One resolvable line, one unresolvable line
    let product_id = create_product(&client, &token, &unique("Mocha"), 95.5).await;

    let resp = client
        .post(format!("{}/orders/", base_url()))
        .bearer_auth(&token)
        .json(&json!({
            "total_amount": 100,
            "status": "pending",
            "items": [
                {"product_id": product_id, "quantity": 1},
                {"product_id": 2_000_000_000, "quantity": 1},
            ],
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Nothing was persisted, not even the resolvable half
    let orders: Vec<Value> = client
        .get(format!("{}/orders/", base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to list orders")
        .json()
        .await
        .expect("Failed to parse body");

    assert!(orders.is_empty(), "partial order was persisted");
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_empty_and_invalid_quantity_rejected() {
    let client = Client::new();
    let username = unique("frank");
    register(&client, &username, "pw123").await;
    let token = login(&client, &username, "pw123").await;
    let product_id = create_product(&client, &token, &unique("Espresso"), 60.0).await;

    let empty = client
        .post(format!("{}/orders/", base_url()))
        .bearer_auth(&token)
        .json(&json!({"total_amount": 0, "status": "pending", "items": []}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(empty.status(), StatusCode::BAD_REQUEST);

    let zero_qty = client
        .post(format!("{}/orders/", base_url()))
        .bearer_auth(&token)
        .json(&json!({
            "total_amount": 0,
            "status": "pending",
            "items": [{"product_id": product_id, "quantity": 0}],
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(zero_qty.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_orders_isolated_between_users() {
    let client = Client::new();

    let user_a = unique("grace");
    register(&client, &user_a, "pw123").await;
    let token_a = login(&client, &user_a, "pw123").await;
    let product_id = create_product(&client, &token_a, &unique("Flat-White"), 110.0).await;

    let order: Value = client
        .post(format!("{}/orders/", base_url()))
        .bearer_auth(&token_a)
        .json(&json!({
            "total_amount": 110,
            "status": "pending",
            "items": [{"product_id": product_id, "quantity": 1}],
        }))
        .send()
        .await
        .expect("Failed to create order")
        .json()
        .await
        .expect("Failed to parse order body");

    let user_b = unique("heidi");
    register(&client, &user_b, "pw123").await;
    let token_b = login(&client, &user_b, "pw123").await;

    let orders_b: Vec<Value> = client
        .get(format!("{}/orders/", base_url()))
        .bearer_auth(&token_b)
        .send()
        .await
        .expect("Failed to list orders")
        .json()
        .await
        .expect("Failed to parse body");

    assert!(
        orders_b.iter().all(|o| o["id"] != order["id"]),
        "user B can see user A's order"
    );
    assert!(orders_b.is_empty());
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_caller_supplied_total_stored_verbatim() {
    let client = Client::new();
    let username = unique("ivan");
    register(&client, &username, "pw123").await;
    let token = login(&client, &username, "pw123").await;
    let product_id = create_product(&client, &token, &unique("Cortado"), 85.0).await;

    // The server does not recompute the total; 999 sticks even though the
    // single line sums to 85.
    let order: Value = client
        .post(format!("{}/orders/", base_url()))
        .bearer_auth(&token)
        .json(&json!({
            "total_amount": 999,
            "status": "pending",
            "items": [{"product_id": product_id, "quantity": 1}],
        }))
        .send()
        .await
        .expect("Failed to create order")
        .json()
        .await
        .expect("Failed to parse order body");

    assert!((decimal_field(&order["total_amount"]) - 999.0).abs() < f64::EPSILON);
    assert!((decimal_field(&order["items"][0]["subtotal"]) - 85.0).abs() < f64::EPSILON);
}
