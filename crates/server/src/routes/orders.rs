//! Order endpoints.

use axum::{
    Json,
    extract::{Query, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;

use roastery_core::{ProductId, UserId};

use crate::db::orders::OrderLine;
use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::models::Order;
use crate::services::OrderService;
use crate::state::AppState;

use super::Page;

/// One requested line item.
#[derive(Debug, Deserialize)]
pub struct OrderItemRequest {
    pub product_id: ProductId,
    pub quantity: i32,
}

/// Order creation request body.
///
/// `user_id` is accepted for wire compatibility but the created order is
/// always bound to the token identity. `total_amount` and `status` are stored
/// verbatim.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    #[allow(dead_code)]
    pub user_id: Option<UserId>,
    pub total_amount: Decimal,
    pub status: String,
    pub items: Vec<OrderItemRequest>,
}

/// Create an order with its line items.
///
/// POST /orders/ (bearer token required)
///
/// # Errors
///
/// Returns 400 on an empty item list or a quantity below 1, and 404 if any
/// product id does not resolve; in every failure case nothing is persisted.
pub async fn create_order(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CreateOrderRequest>,
) -> Result<Json<Order>> {
    let lines: Vec<OrderLine> = req
        .items
        .iter()
        .map(|item| OrderLine {
            product_id: item.product_id,
            quantity: item.quantity,
        })
        .collect();

    let order = OrderService::new(state.pool())
        .create(user.id, req.total_amount, &req.status, &lines)
        .await?;

    Ok(Json(order))
}

/// List the caller's orders with items.
///
/// GET /orders/?skip=&limit= (bearer token required)
///
/// # Errors
///
/// Returns 500 if the query fails.
pub async fn list_orders(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(page): Query<Page>,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderService::new(state.pool())
        .list_for_user(user.id, page.skip, page.limit)
        .await?;

    Ok(Json(orders))
}
