//! # Order Repository
//!
//! Read operations over orders (listings, items, ledger, reporting view)
//! and the `add_order_item` routine.
//!
//! Placing a new order is not here: that is the multi-step transaction in
//! [`crate::placement`]. This repository only appends a line to an order
//! that already exists.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use store_core::{
    LedgerEntry, Money, Order, OrderItem, OrderListing, OrderStatus, OrderSummaryRow,
};

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Lists all orders joined with their customer names.
    pub async fn list(&self) -> DbResult<Vec<OrderListing>> {
        let orders: Vec<OrderListing> = sqlx::query_as(
            r#"
            SELECT
                o.id,
                o.placed_at,
                o.total_cents,
                o.status,
                c.name AS customer_name
            FROM orders o
            JOIN customers c ON c.id = o.customer_id
            ORDER BY o.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// Gets an order by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Order>> {
        let order: Option<Order> = sqlx::query_as(
            r#"
            SELECT id, placed_at, total_cents, status, customer_id
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Gets all line items for an order.
    pub async fn items(&self, order_id: i64) -> DbResult<Vec<OrderItem>> {
        let items: Vec<OrderItem> = sqlx::query_as(
            r#"
            SELECT id, order_id, product_id, quantity, unit_price_cents
            FROM order_items
            WHERE order_id = ?1
            ORDER BY id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Gets the ledger entries booked against an order.
    pub async fn ledger_for_order(&self, order_id: i64) -> DbResult<Vec<LedgerEntry>> {
        let entries: Vec<LedgerEntry> = sqlx::query_as(
            r#"
            SELECT id, entry_at, amount_cents, order_id
            FROM ledger_entries
            WHERE order_id = ?1
            ORDER BY id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Reads the `order_summary` reporting view.
    ///
    /// Storage-computed projection; nothing is cached or owned here.
    pub async fn order_summary(&self) -> DbResult<Vec<OrderSummaryRow>> {
        let rows: Vec<OrderSummaryRow> = sqlx::query_as(
            r#"
            SELECT order_id, customer_name, total_items, total_amount_cents
            FROM order_summary
            ORDER BY order_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Appends a line item to an existing order.
    ///
    /// Stand-in for the legacy `add_order_item` stored routine (SQLite has
    /// no stored procedures). The routine's consistency work runs in one
    /// transaction:
    ///
    /// 1. order must exist and still be `Pending`
    /// 2. product price is captured and the line inserted at that price
    /// 3. stock is decremented (the `CHECK (stock_qty >= 0)` constraint
    ///    rejects overdraw)
    /// 4. the order total is increased by the line total
    ///
    /// Any failure rolls the whole transaction back; the dropped
    /// transaction guard discards all writes.
    pub async fn add_order_item(
        &self,
        order_id: i64,
        product_id: i64,
        quantity: i64,
    ) -> DbResult<()> {
        debug!(order_id = %order_id, product_id = %product_id, quantity = %quantity, "Adding order item");

        let mut tx = self.pool.begin().await?;

        let status: Option<OrderStatus> =
            sqlx::query_scalar("SELECT status FROM orders WHERE id = ?1")
                .bind(order_id)
                .fetch_optional(&mut *tx)
                .await?;

        match status {
            None => return Err(DbError::not_found("Order", order_id)),
            Some(OrderStatus::Pending) => {}
            Some(_) => {
                return Err(DbError::QueryFailed {
                    code: None,
                    message: format!("order {order_id} is no longer pending"),
                })
            }
        }

        let unit_price_cents: i64 =
            sqlx::query_scalar("SELECT price_cents FROM products WHERE id = ?1")
                .bind(product_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(DbError::not_found("Product", product_id))?;

        // Same exact-arithmetic rule as order placement: an overflowing
        // line total fails the routine instead of wrapping into the order.
        let line_total = Money::from_cents(unit_price_cents)
            .multiply_quantity(quantity)
            .ok_or_else(|| DbError::QueryFailed {
                code: None,
                message: format!(
                    "line total overflows for product {product_id} x {quantity}"
                ),
            })?;

        sqlx::query(
            r#"
            INSERT INTO order_items (order_id, product_id, quantity, unit_price_cents)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(order_id)
        .bind(product_id)
        .bind(quantity)
        .bind(unit_price_cents)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE products SET stock_qty = stock_qty - ?1 WHERE id = ?2")
            .bind(quantity)
            .bind(product_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE orders SET total_cents = total_cents + ?1 WHERE id = ?2")
            .bind(line_total.cents())
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}
