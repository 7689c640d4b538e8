//! # Product Repository
//!
//! Database operations for products and their categories.
//!
//! Stock is mutated only by the order workflows ([`crate::placement`] and
//! the add_order_item routine), never directly through this repository;
//! the price update here is the one standalone product mutation the shell
//! exposes.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use store_core::{Money, Product, ProductListing};

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists all products joined with their category names.
    pub async fn list(&self) -> DbResult<Vec<ProductListing>> {
        let products: Vec<ProductListing> = sqlx::query_as(
            r#"
            SELECT
                p.id,
                p.name,
                p.price_cents,
                p.stock_qty,
                c.name AS category_name
            FROM products p
            JOIN categories c ON c.id = p.category_id
            ORDER BY p.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Gets a product by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product: Option<Product> = sqlx::query_as(
            r#"
            SELECT id, name, price_cents, stock_qty, category_id
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a new product and returns the storage-assigned id.
    pub async fn insert(
        &self,
        name: &str,
        price: Money,
        stock_qty: i64,
        category_id: i64,
    ) -> DbResult<i64> {
        debug!(name = %name, price = %price, "Inserting product");

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO products (name, price_cents, stock_qty, category_id)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(price.cents())
        .bind(stock_qty)
        .bind(category_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Inserts a category and returns its id.
    ///
    /// Categories are otherwise read-only here; this exists for seeding
    /// and tests.
    pub async fn insert_category(&self, name: &str) -> DbResult<i64> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO categories (name) VALUES (?1) RETURNING id
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Updates a product's unit price.
    ///
    /// Existing order items keep the price captured when they were
    /// written; this only affects future orders.
    ///
    /// ## Errors
    /// `DbError::NotFound` when no product has the given id.
    pub async fn update_price(&self, id: i64, price: Money) -> DbResult<()> {
        debug!(id = %id, price = %price, "Updating product price");

        let result = sqlx::query(
            r#"
            UPDATE products SET price_cents = ?2 WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(price.cents())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }
}
