//! Product endpoints.

use axum::{
    Json,
    extract::{Query, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::db::products::{NewProduct, ProductRepository};
use crate::error::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::models::Product;
use crate::state::AppState;

use super::Page;

/// Product creation request body.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub image_url: String,
}

/// Create a catalog entry.
///
/// POST /products/ (bearer token required)
///
/// # Errors
///
/// Returns 400 on a negative price, 401 without a valid token.
pub async fn create_product(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Json(req): Json<CreateProductRequest>,
) -> Result<Json<Product>> {
    if req.price < Decimal::ZERO {
        return Err(AppError::BadRequest("price must be non-negative".into()));
    }

    let product = ProductRepository::new(state.pool())
        .create(&NewProduct {
            name: req.name,
            description: req.description,
            price: req.price,
            category: req.category,
            image_url: req.image_url,
        })
        .await?;

    Ok(Json(product))
}

/// List the catalog.
///
/// GET /products/?skip=&limit= (public)
///
/// # Errors
///
/// Returns 500 if the query fails.
pub async fn list_products(
    State(state): State<AppState>,
    Query(page): Query<Page>,
) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool())
        .list(page.skip, page.limit)
        .await?;

    Ok(Json(products))
}
