//! Order workflow: validation in front of the transactional repository.
//!
//! The consistency contract lives in [`crate::db::orders`]; this layer rejects
//! structurally invalid requests before a transaction is ever opened, and
//! folds the repository's errors into one client-facing error type.

use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;

use roastery_core::{ProductId, UserId};

use crate::db::RepositoryError;
use crate::db::orders::{OrderCreateError, OrderLine, OrderRepository};
use crate::models::Order;

/// Errors from the order workflow.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The request contained no items.
    #[error("order must contain at least one item")]
    EmptyOrder,

    /// A line's quantity was below 1.
    #[error("quantity must be at least 1 (got {0})")]
    InvalidQuantity(i32),

    /// A requested product id did not resolve; nothing was persisted.
    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    /// The underlying repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<OrderCreateError> for OrderError {
    fn from(e: OrderCreateError) -> Self {
        match e {
            OrderCreateError::ProductNotFound(id) => Self::ProductNotFound(id),
            OrderCreateError::Repository(e) => Self::Repository(e),
        }
    }
}

/// Order workflow service.
pub struct OrderService<'a> {
    orders: OrderRepository<'a>,
}

impl<'a> OrderService<'a> {
    /// Create a new order service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            orders: OrderRepository::new(pool),
        }
    }

    /// Create an order for `user_id` from the requested lines.
    ///
    /// The order is bound to the authenticated identity regardless of what the
    /// request body claims; `total_amount` and `status` pass through verbatim.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::EmptyOrder` or `OrderError::InvalidQuantity` for
    /// structurally invalid requests (nothing is persisted), and
    /// `OrderError::ProductNotFound` if any product fails to resolve (the
    /// whole transaction is rolled back).
    pub async fn create(
        &self,
        user_id: UserId,
        total_amount: Decimal,
        status: &str,
        lines: &[OrderLine],
    ) -> Result<Order, OrderError> {
        validate_lines(lines)?;

        let order = self
            .orders
            .create(user_id, total_amount, status, lines)
            .await?;

        Ok(order)
    }

    /// List the caller's orders, items included.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Repository` if the query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Order>, OrderError> {
        let orders = self.orders.list_by_user(user_id, offset, limit).await?;
        Ok(orders)
    }
}

/// Reject empty orders and non-positive quantities.
fn validate_lines(lines: &[OrderLine]) -> Result<(), OrderError> {
    if lines.is_empty() {
        return Err(OrderError::EmptyOrder);
    }

    for line in lines {
        if line.quantity < 1 {
            return Err(OrderError::InvalidQuantity(line.quantity));
        }
    }

    Ok(())
}
