//! # Order Placement Transaction Manager
//!
//! The one multi-statement workflow in the system: placing an order. All
//! reads and writes run on a single connection inside one explicit
//! transaction and either all commit or all roll back.
//!
//! ## Protocol
//! ```text
//! Start              begin explicit transaction on one pooled connection
//!   │
//! ValidateCustomer   SELECT customer by id          absent -> CustomerNotFound
//!   │
//! ValidateProduct    SELECT price, stock by id      absent -> ProductNotFound
//!   │                (price captured HERE, reused below)
//! ValidateQuantity   qty <= 0      -> InvalidQuantity
//!   │                qty > stock   -> InsufficientStock
//! ComputeTotal       total = captured price x qty (exact integer cents)
//!   │
//! InsertOrder        INSERT ... RETURNING id        no key -> OrderCreationFailed
//!   │
//! InsertOrderItem    line written at the captured price
//!   │
//! DecrementStock     stock_qty = stock_qty - qty
//!   │
//! InsertLedgerEntry  amount = total, references the new order
//!   │
//! Commit             terminal success: return the new order id
//!
//! Abort              any failure above rolls back every write;
//!                    rollback failures are reported, never mask the cause
//! Cleanup            the transaction guard returns the connection on
//!                    every path (drop rolls back if neither commit nor
//!                    rollback ran)
//! ```
//!
//! ## Concurrency
//! No application-level row locking. Another client may change price or
//! stock between our reads and our commit; correctness rests on the
//! storage engine's transaction isolation, and the financial record is
//! immune to concurrent price changes because the unit price is captured
//! once at ValidateProduct and reused for the total, the line item, and
//! the ledger amount. The `CHECK (stock_qty >= 0)` constraint is the
//! storage-level backstop should isolation admit a racing decrement.

use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::error::DbError;
use store_core::{Money, OrderStatus};

// =============================================================================
// Error Taxonomy
// =============================================================================

/// Failure modes of the order placement protocol.
///
/// Every variant triggers Abort: the transaction is rolled back and
/// storage is left exactly as it was before Start.
#[derive(Debug, Error)]
pub enum OrderError {
    /// No customer row with the given id.
    #[error("customer not found: {0}")]
    CustomerNotFound(i64),

    /// No product row with the given id.
    #[error("product not found: {0}")]
    ProductNotFound(i64),

    /// Requested quantity is zero, negative, or yields an
    /// unrepresentable total.
    #[error("quantity must be a positive integer, got {0}")]
    InvalidQuantity(i64),

    /// Requested quantity exceeds the stock read at validation time.
    #[error("not enough stock: available {available}, requested {requested}")]
    InsufficientStock { available: i64, requested: i64 },

    /// The order insert did not hand back a storage-assigned id.
    #[error("failed to obtain a new order id")]
    OrderCreationFailed,

    /// A storage-layer error during any step, including commit.
    #[error(transparent)]
    Storage(#[from] DbError),
}

// =============================================================================
// Transaction Manager
// =============================================================================

/// Orchestrates the atomic order placement workflow.
#[derive(Debug, Clone)]
pub struct OrderPlacement {
    pool: SqlitePool,
}

impl OrderPlacement {
    /// Creates a new OrderPlacement manager.
    pub fn new(pool: SqlitePool) -> Self {
        OrderPlacement { pool }
    }

    /// Places an order: validates, writes the order, its line item, the
    /// stock decrement, and the ledger entry as one unit, and returns the
    /// storage-assigned order id.
    ///
    /// On any failure every write is rolled back; partial application is
    /// never observable. A rollback failure is logged at error level but
    /// the original failure is what the caller sees.
    pub async fn place_order(
        &self,
        customer_id: i64,
        product_id: i64,
        quantity: i64,
    ) -> Result<i64, OrderError> {
        // Start: one connection, explicit transaction scope.
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        match run_protocol(&mut tx, customer_id, product_id, quantity).await {
            Ok(order_id) => {
                tx.commit().await.map_err(DbError::from)?;
                info!(order_id = %order_id, customer_id = %customer_id, "Order placed");
                Ok(order_id)
            }
            Err(err) => {
                warn!(error = %err, "Order placement failed, rolling back");
                if let Err(rollback_err) = tx.rollback().await {
                    // Reported independently; the triggering error still wins.
                    error!(error = %rollback_err, "Rollback failed");
                }
                Err(err)
            }
        }
    }
}

/// Steps ValidateCustomer through InsertLedgerEntry.
///
/// Runs entirely on the caller's transaction; the caller owns commit and
/// rollback. Step order is load-bearing: an unknown customer must fail
/// before any product read, and the quantity check uses the stock read in
/// ValidateProduct.
async fn run_protocol(
    tx: &mut Transaction<'_, Sqlite>,
    customer_id: i64,
    product_id: i64,
    quantity: i64,
) -> Result<i64, OrderError> {
    // ValidateCustomer
    let customer: Option<i64> = sqlx::query_scalar("SELECT id FROM customers WHERE id = ?1")
        .bind(customer_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(DbError::from)?;

    if customer.is_none() {
        return Err(OrderError::CustomerNotFound(customer_id));
    }

    // ValidateProduct: the price captured here is the one the order,
    // the line item, and the ledger entry all record.
    let product: Option<(i64, i64)> =
        sqlx::query_as("SELECT price_cents, stock_qty FROM products WHERE id = ?1")
            .bind(product_id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(DbError::from)?;

    let (unit_price_cents, stock_qty) = match product {
        Some(row) => row,
        None => return Err(OrderError::ProductNotFound(product_id)),
    };

    // ValidateQuantity
    if quantity <= 0 {
        return Err(OrderError::InvalidQuantity(quantity));
    }
    if quantity > stock_qty {
        return Err(OrderError::InsufficientStock {
            available: stock_qty,
            requested: quantity,
        });
    }

    // ComputeTotal: exact integer-cent arithmetic, never recomputed from
    // a later price.
    let total = Money::from_cents(unit_price_cents)
        .multiply_quantity(quantity)
        .ok_or(OrderError::InvalidQuantity(quantity))?;

    // InsertOrder
    let placed_at = Utc::now();
    let order_id: Option<i64> = sqlx::query_scalar(
        r#"
        INSERT INTO orders (placed_at, total_cents, status, customer_id)
        VALUES (?1, ?2, ?3, ?4)
        RETURNING id
        "#,
    )
    .bind(placed_at)
    .bind(total.cents())
    .bind(OrderStatus::Pending)
    .bind(customer_id)
    .fetch_optional(&mut **tx)
    .await
    .map_err(DbError::from)?;

    let order_id = order_id.ok_or(OrderError::OrderCreationFailed)?;

    // InsertOrderItem: unit price from ValidateProduct, not re-read.
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
    .execute(&mut **tx)
    .await
    .map_err(DbError::from)?;

    // DecrementStock
    sqlx::query("UPDATE products SET stock_qty = stock_qty - ?1 WHERE id = ?2")
        .bind(quantity)
        .bind(product_id)
        .execute(&mut **tx)
        .await
        .map_err(DbError::from)?;

    // InsertLedgerEntry
    sqlx::query(
        r#"
        INSERT INTO ledger_entries (entry_at, amount_cents, order_id)
        VALUES (?1, ?2, ?3)
        "#,
    )
    .bind(Utc::now())
    .bind(total.cents())
    .bind(order_id)
    .execute(&mut **tx)
    .await
    .map_err(DbError::from)?;

    Ok(order_id)
}
