//! # Repository Module
//!
//! Repository implementations for each entity.
//!
//! ## Repository Pattern
//! ```text
//! Shell menu choice
//!     │   db.customers().list()
//!     ▼
//! CustomerRepository
//!     │   parameterized SQL (placeholders only, never concatenation)
//!     ▼
//! SQLite
//! ```
//!
//! Every method checks a connection out of the pool for the duration of
//! one statement and returns it when the call ends, on every path. All
//! statements here are single statements, so a failure has no partial
//! effect; the multi-statement order placement lives in
//! [`crate::placement`] instead.
//!
//! ## Available Repositories
//!
//! - [`customer::CustomerRepository`] - customer listing and mutation
//! - [`product::ProductRepository`] - product listing and mutation
//! - [`order::OrderRepository`] - order listings, reporting view,
//!   add_order_item routine

pub mod customer;
pub mod order;
pub mod product;
