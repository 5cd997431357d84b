//! Product repository: read (and seed) access to the catalog.

use rust_decimal::Decimal;
use sqlx::PgPool;

use roastery_core::ProductId;

use super::RepositoryError;
use crate::models::Product;

/// Fields required to create a catalog entry.
///
/// `is_available` is not part of the creation contract; new products default
/// to available.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub image_url: String,
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        let created: Product = sqlx::query_as(
            r"
            INSERT INTO products (name, description, price, category, image_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, price, category, image_url, is_available
            ",
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.category)
        .bind(&product.image_url)
        .fetch_one(self.pool)
        .await?;

        Ok(created)
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product: Option<Product> = sqlx::query_as(
            r"
            SELECT id, name, description, price, category, image_url, is_available
            FROM products
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// List products in primary-key order, bounded by offset and limit.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Product>, RepositoryError> {
        let products: Vec<Product> = sqlx::query_as(
            r"
            SELECT id, name, description, price, category, image_url, is_available
            FROM products
            ORDER BY id
            OFFSET $1 LIMIT $2
            ",
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }
}
