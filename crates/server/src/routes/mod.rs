//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! POST /token       - Exchange form credentials for a bearer token
//! POST /users/      - Register a new user
//! GET  /users/me/   - Current user (bearer token)
//! POST /products/   - Create a product (bearer token)
//! GET  /products/   - List products (public, ?skip=&limit=)
//! POST /orders/     - Create an order with items (bearer token)
//! GET  /orders/     - List the caller's orders (bearer token, ?skip=&limit=)
//! ```

pub mod auth;
pub mod orders;
pub mod products;
pub mod users;

use axum::{
    Router,
    routing::{get, post},
};
use serde::Deserialize;

use crate::state::AppState;

/// Offset/limit pagination query using `skip`/`limit` parameter names.
///
/// No total count or cursor; this is a bounded window, nothing more.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

const fn default_limit() -> i64 {
    100
}

/// Create all routes for the server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/token", post(auth::issue_token))
        .route("/users/", post(users::create_user))
        .route("/users/me/", get(users::me))
        .route(
            "/products/",
            post(products::create_product).get(products::list_products),
        )
        .route(
            "/orders/",
            post(orders::create_order).get(orders::list_orders),
        )
}
