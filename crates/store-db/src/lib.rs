//! # store-db: Database Layer for the Online Store
//!
//! SQLite access via sqlx: pooled connections, embedded migrations,
//! repositories for each entity, and the order placement transaction.
//!
//! ## Data Flow
//! ```text
//! Shell menu choice
//!     │
//!     ▼
//! Database handle (pool.rs)
//!     ├── customers()  -> CustomerRepository    plain parameterized CRUD
//!     ├── products()   -> ProductRepository     plain parameterized CRUD
//!     ├── orders()     -> OrderRepository       listings, view, add_order_item
//!     └── placement()  -> OrderPlacement        the atomic multi-step
//!                                               order transaction
//!     │
//!     ▼
//! SQLite (WAL mode, foreign keys ON)
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//! - [`placement`] - Order placement transaction manager
//!
//! ## Usage
//!
//! ```rust,ignore
//! use store_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("store.db")).await?;
//! let order_id = db.placement().place_order(1, 7, 3).await?;
//! ```

pub mod error;
pub mod migrations;
pub mod placement;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use placement::{OrderError, OrderPlacement};
pub use pool::{Database, DbConfig};

pub use repository::customer::CustomerRepository;
pub use repository::order::OrderRepository;
pub use repository::product::ProductRepository;
