//! # Domain Types
//!
//! Persisted entities and display projections for the online store.
//!
//! ## Entity Relationships
//! ```text
//! Category 1──* Product 1──* OrderItem *──1 Order *──1 Customer
//!                                            │
//!                                            1
//!                                            │
//!                                       LedgerEntry
//! ```
//!
//! ## Identity
//! Every entity key is a storage-assigned `INTEGER PRIMARY KEY`; the
//! database hands the id back on insert. No ids are generated in the
//! application.
//!
//! All monetary columns are integer cents (see [`crate::money::Money`]);
//! the `*_cents` fields map 1:1 to columns and the accessor methods wrap
//! them in `Money`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Customer
// =============================================================================

/// A registered customer.
///
/// Created by insert; mutated only via email update; never deleted by
/// this system. Email is unique at the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub address: String,
}

// =============================================================================
// Category
// =============================================================================

/// A product category. Read-only from this system's perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    pub id: i64,
    pub name: String,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
///
/// Mutated by price updates and by the stock decrement during order
/// placement. Stock must never go negative; the schema carries a
/// `CHECK (stock_qty >= 0)` backing that invariant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Unit price in cents.
    pub price_cents: i64,
    /// Units currently on hand.
    pub stock_qty: i64,
    pub category_id: i64,
}

impl Product {
    /// Returns the unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// Lifecycle status of an order.
///
/// This system only ever writes `Pending`; the other states exist for
/// fulfilment tooling that shares the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "PascalCase"))]
pub enum OrderStatus {
    Pending,
    Shipped,
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Cancelled => "Cancelled",
        };
        f.write_str(s)
    }
}

// =============================================================================
// Order
// =============================================================================

/// A placed order.
///
/// Created exactly once per successful placement transaction; never
/// mutated afterwards by this system. `total_cents` is the sum of line
/// totals at placement time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub placed_at: DateTime<Utc>,
    pub total_cents: i64,
    pub status: OrderStatus,
    pub customer_id: i64,
}

impl Order {
    /// Returns the order total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A line item in an order.
///
/// Uses the snapshot pattern: `unit_price_cents` is the product price
/// captured when the line was written, decoupled from the current
/// product price.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    /// Unit price in cents at order time (frozen).
    pub unit_price_cents: i64,
}

impl OrderItem {
    /// Returns the captured unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Line total: captured unit price times quantity.
    ///
    /// Saturates at the i64 boundary; the write paths reject overflowing
    /// totals before anything reaches storage, so saturation here only
    /// guards display math.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.unit_price_cents.saturating_mul(self.quantity))
    }
}

// =============================================================================
// Ledger Entry
// =============================================================================

/// An append-only record of a completed financial event.
///
/// Exists 1:1 with a successfully placed order; `amount_cents` equals the
/// order total.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct LedgerEntry {
    pub id: i64,
    pub entry_at: DateTime<Utc>,
    pub amount_cents: i64,
    pub order_id: i64,
}

impl LedgerEntry {
    /// Returns the booked amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

// =============================================================================
// Display Projections
// =============================================================================

/// Product row joined with its category name, for listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductListing {
    pub id: i64,
    pub name: String,
    pub price_cents: i64,
    pub stock_qty: i64,
    pub category_name: String,
}

impl ProductListing {
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// Order row joined with its customer name, for listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderListing {
    pub id: i64,
    pub placed_at: DateTime<Utc>,
    pub total_cents: i64,
    pub status: OrderStatus,
    pub customer_name: String,
}

impl OrderListing {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// One row of the `order_summary` reporting view.
///
/// Derived, storage-computed projection; not separately owned data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderSummaryRow {
    pub order_id: i64,
    pub customer_name: String,
    pub total_items: i64,
    pub total_amount_cents: i64,
}

impl OrderSummaryRow {
    #[inline]
    pub fn total_amount(&self) -> Money {
        Money::from_cents(self.total_amount_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_default() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_line_total_uses_frozen_price() {
        let item = OrderItem {
            id: 1,
            order_id: 10,
            product_id: 7,
            quantity: 3,
            unit_price_cents: 1999,
        };
        assert_eq!(item.line_total().cents(), 5997);
    }

    #[test]
    fn test_line_total_saturates_instead_of_wrapping() {
        let item = OrderItem {
            id: 1,
            order_id: 10,
            product_id: 7,
            quantity: 2,
            unit_price_cents: i64::MAX,
        };
        assert_eq!(item.line_total().cents(), i64::MAX);
    }
}
