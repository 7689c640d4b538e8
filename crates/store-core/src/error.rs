//! # Error Types
//!
//! Domain-level error types for store-core.
//!
//! ## Error Hierarchy
//! ```text
//! store-core (this file)
//! └── ValidationError   - console input fails a business rule
//!
//! store-db (separate crate)
//! ├── DbError           - storage/driver failures
//! └── OrderError        - order placement protocol failures
//! ```
//!
//! ## Design Principles
//! 1. `thiserror` derive macros, not manual impls
//! 2. Context in messages (field names, limits)
//! 3. Enum variants, never bare strings

use thiserror::Error;

/// Input validation errors.
///
/// Raised before any database work when user input doesn't meet
/// requirements.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (bad email, malformed decimal, ...).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");

        let err = ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: 999,
        };
        assert_eq!(err.to_string(), "quantity must be between 1 and 999");
    }
}
