//! Product domain type.

use rust_decimal::Decimal;
use serde::Serialize;

use roastery_core::ProductId;

/// A purchasable catalog entry.
///
/// `price` is the live catalog price. Orders never reference it after
/// creation; they carry their own frozen copy per line item.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name (e.g., "Latte").
    pub name: String,
    /// Longer description for the storefront.
    pub description: String,
    /// Current unit price.
    pub price: Decimal,
    /// Category label (e.g., "coffee", "pastry").
    pub category: String,
    /// Image reference for the storefront.
    pub image_url: String,
    /// Whether the product is currently offered.
    pub is_available: bool,
}
