//! # Validation Module
//!
//! Input validation for values typed at the shell prompt.
//!
//! ## Validation Strategy
//! ```text
//! Layer 1: Shell prompt        - re-prompts on non-integer/non-decimal input
//! Layer 2: THIS MODULE         - business rule validation
//! Layer 3: Database (SQLite)   - NOT NULL, UNIQUE, CHECK, FK constraints
//!
//! Defense in depth: each layer catches different mistakes.
//! ```
//!
//! The quantity check here covers only the prompt-side sanity limit; the
//! order placement transaction re-validates quantity against live stock
//! inside its own transaction scope.

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::MAX_ORDER_QUANTITY;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a customer or product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 200 characters
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - At most 254 characters
/// - Must contain one `@` with characters on both sides
///
/// Uniqueness is enforced by the storage layer, not here.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    if email.len() > 254 {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: 254,
        });
    }

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "expected name@domain".to_string(),
        }),
    }
}

/// Validates a postal address.
pub fn validate_address(address: &str) -> ValidationResult<()> {
    let address = address.trim();

    if address.is_empty() {
        return Err(ValidationError::Required {
            field: "address".to_string(),
        });
    }

    if address.len() > 500 {
        return Err(ValidationError::TooLong {
            field: "address".to_string(),
            max: 500,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an order-line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_ORDER_QUANTITY`]
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ORDER_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ORDER_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (zero allowed for promotional items)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
