//! # store-core: Pure Domain Logic for the Online Store
//!
//! This crate contains the business rules of the store as pure functions
//! and plain types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! apps/cli (interactive shell)
//!     │
//!     ▼
//! crates/store-db (SQLite queries, repositories, order placement)
//!     │
//!     ▼
//! crates/store-core (THIS CRATE)
//!     money  •  types  •  validation
//!     NO I/O  •  NO DATABASE  •  PURE FUNCTIONS
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Customer, Product, Order, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: deterministic, same input = same output
//! 2. **Integer money**: all monetary values are in cents (i64)
//! 3. **Explicit errors**: typed error enums, never strings or panics
//!
//! ## Example
//!
//! ```rust
//! use store_core::money::Money;
//!
//! let price = Money::parse("19.99").unwrap();
//! let total = price.multiply_quantity(3).unwrap();
//! assert_eq!(total.cents(), 5997);
//! assert_eq!(total.to_string(), "$59.97");
//! ```

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

pub use error::ValidationError;
pub use money::Money;
pub use types::*;

/// Maximum quantity accepted for a single order line.
///
/// Guards against fat-fingered input (1000 instead of 10) before any
/// database work happens. The stock check is still the real limit.
pub const MAX_ORDER_QUANTITY: i64 = 999;
