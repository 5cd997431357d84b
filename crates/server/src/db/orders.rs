//! Order repository: the transactional heart of the order workflow.
//!
//! An order header and all of its line items are written inside one
//! transaction. Product prices are resolved inside that same transaction, so
//! the `unit_price` snapshot and the existence check see a single consistent
//! catalog state, and a missing product rolls back everything including the
//! header.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;

use roastery_core::{OrderId, ProductId, UserId};

use super::RepositoryError;
use crate::models::{Order, OrderItem};

/// One requested (product, quantity) pair, already validated by the service
/// layer: `quantity >= 1`.
#[derive(Debug, Clone, Copy)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: i32,
}

/// Errors from the transactional order creation.
#[derive(Debug, Error)]
pub enum OrderCreateError {
    /// A requested product id did not resolve; nothing was persisted.
    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    /// The transaction failed for a non-domain reason.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<sqlx::Error> for OrderCreateError {
    fn from(e: sqlx::Error) -> Self {
        Self::Repository(RepositoryError::Database(e))
    }
}

/// Raw `orders` row, without items.
#[derive(sqlx::FromRow)]
struct OrderHeaderRow {
    id: i32,
    user_id: i32,
    total_amount: Decimal,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderHeaderRow {
    fn into_order(self, items: Vec<OrderItem>) -> Order {
        Order {
            id: OrderId::new(self.id),
            user_id: UserId::new(self.user_id),
            total_amount: self.total_amount,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
            items,
        }
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create an order header and all of its items as one atomic unit.
    ///
    /// Every line's product is resolved inside the transaction; its current
    /// price becomes the line's frozen `unit_price` and the line's `subtotal`
    /// is `unit_price * quantity`. Any unresolvable product aborts the whole
    /// operation.
    ///
    /// `total_amount` and `status` are caller-supplied and stored verbatim.
    ///
    /// # Errors
    ///
    /// Returns `OrderCreateError::ProductNotFound` if any requested product id
    /// does not exist; the transaction is rolled back and no rows remain.
    /// Returns `OrderCreateError::Repository` for database failures.
    pub async fn create(
        &self,
        user_id: UserId,
        total_amount: Decimal,
        status: &str,
        lines: &[OrderLine],
    ) -> Result<Order, OrderCreateError> {
        let mut tx = self.pool.begin().await?;

        let header: OrderHeaderRow = sqlx::query_as(
            r"
            INSERT INTO orders (user_id, total_amount, status)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, total_amount, status, created_at, updated_at
            ",
        )
        .bind(user_id)
        .bind(total_amount)
        .bind(status)
        .fetch_one(&mut *tx)
        .await?;

        let order_id = OrderId::new(header.id);
        let mut items = Vec::with_capacity(lines.len());

        for line in lines {
            let price: Option<(Decimal,)> = sqlx::query_as(
                r"
                SELECT price
                FROM products
                WHERE id = $1
                ",
            )
            .bind(line.product_id)
            .fetch_optional(&mut *tx)
            .await?;

            // Dropping the transaction on this early return rolls back the
            // header and any items inserted so far.
            let Some((unit_price,)) = price else {
                return Err(OrderCreateError::ProductNotFound(line.product_id));
            };

            let subtotal = unit_price * Decimal::from(line.quantity);

            let item: OrderItem = sqlx::query_as(
                r"
                INSERT INTO order_items (order_id, product_id, quantity, unit_price, subtotal)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, order_id, product_id, quantity, unit_price, subtotal
                ",
            )
            .bind(order_id)
            .bind(line.product_id)
            .bind(line.quantity)
            .bind(unit_price)
            .bind(subtotal)
            .fetch_one(&mut *tx)
            .await?;

            items.push(item);
        }

        tx.commit().await?;

        Ok(header.into_order(items))
    }

    /// List a user's orders in primary-key order, items eagerly loaded.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any query fails.
    pub async fn list_by_user(
        &self,
        user_id: UserId,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Order>, RepositoryError> {
        let headers: Vec<OrderHeaderRow> = sqlx::query_as(
            r"
            SELECT id, user_id, total_amount, status, created_at, updated_at
            FROM orders
            WHERE user_id = $1
            ORDER BY id
            OFFSET $2 LIMIT $3
            ",
        )
        .bind(user_id)
        .bind(offset)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        if headers.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<i32> = headers.iter().map(|h| h.id).collect();

        let all_items: Vec<OrderItem> = sqlx::query_as(
            r"
            SELECT id, order_id, product_id, quantity, unit_price, subtotal
            FROM order_items
            WHERE order_id = ANY($1)
            ORDER BY id
            ",
        )
        .bind(&order_ids)
        .fetch_all(self.pool)
        .await?;

        let mut orders: Vec<Order> = headers
            .into_iter()
            .map(|h| h.into_order(Vec::new()))
            .collect();

        for item in all_items {
            if let Some(order) = orders.iter_mut().find(|o| o.id == item.order_id) {
                order.items.push(item);
            }
        }

        Ok(orders)
    }
}
