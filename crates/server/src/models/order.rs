//! Order and line-item domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use roastery_core::{OrderId, OrderItemId, ProductId, UserId};

/// An order header together with its eagerly loaded line items.
///
/// Orders are created in one transaction and are read-only afterwards; readers
/// never observe a header without its full item set.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Owning user.
    pub user_id: UserId,
    /// Caller-supplied total, stored verbatim.
    pub total_amount: Decimal,
    /// Caller-supplied status label, stored verbatim.
    pub status: String,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
    /// When the order row was last written.
    pub updated_at: DateTime<Utc>,
    /// Line items, in insertion order.
    pub items: Vec<OrderItem>,
}

/// One (product, quantity, price-snapshot) entry within an order.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrderItem {
    /// Unique line-item ID.
    pub id: OrderItemId,
    /// Owning order.
    pub order_id: OrderId,
    /// Referenced product.
    pub product_id: ProductId,
    /// Requested quantity, always >= 1.
    pub quantity: i32,
    /// The product's price at the moment the order was placed. Later catalog
    /// price changes never touch this value.
    pub unit_price: Decimal,
    /// `unit_price * quantity`, computed server-side at creation.
    pub subtotal: Decimal,
}
