//! # Database Error Types
//!
//! ## Error Flow
//! ```text
//! SQLite error (sqlx::Error)
//!     │
//!     ▼
//! DbError (this module)  - adds context and categorization,
//!     │                    carries the vendor error code where available
//!     ▼
//! Shell prints a diagnostic and returns to the menu
//! ```

use thiserror::Error;

/// Database operation errors.
///
/// Wraps sqlx errors and adds context for diagnostics. Single-statement
/// operations have no partial effect on failure; the placement protocol
/// maps these into its own rollback handling.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found (by id).
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// Unique constraint violation (e.g. duplicate customer email).
    #[error("unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    /// Foreign key constraint violation.
    #[error("foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// Cannot open or reach the database.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed at startup.
    #[error("migration failed: {0}")]
    MigrationFailed(String),

    /// Storage rejected a statement. Carries the vendor error code when
    /// the driver reports one.
    #[error("query failed ({}): {message}", code.as_deref().unwrap_or("no code"))]
    QueryFailed {
        code: Option<String>,
        message: String,
    },

    /// All pooled connections are in use.
    #[error("connection pool exhausted")]
    PoolExhausted,

    /// Anything else from the driver.
    #[error("internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        DbError::NotFound { entity, id }
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Mapping
/// ```text
/// sqlx::Error::RowNotFound   -> Internal (repositories use fetch_optional)
/// sqlx::Error::Database      -> constraint kind from the driver, else
///                               QueryFailed with the vendor code
/// sqlx::Error::PoolTimedOut  -> PoolExhausted
/// other                      -> Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let message = db_err.message().to_string();

                if db_err.is_unique_violation() {
                    DbError::UniqueViolation {
                        constraint: message,
                    }
                } else if db_err.is_foreign_key_violation() {
                    DbError::ForeignKeyViolation { message }
                } else {
                    DbError::QueryFailed {
                        code: db_err.code().map(|c| c.into_owned()),
                        message,
                    }
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("pool is closed".to_string()),

            sqlx::Error::Io(io_err) => DbError::ConnectionFailed(io_err.to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
