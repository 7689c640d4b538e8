//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! In floating point:  0.1 + 0.2 = 0.30000000000000004   WRONG
//! In integer cents:   10 + 20   = 30                    exact
//! ```
//!
//! Every price, line total, order total, and ledger amount in the system
//! flows through this type. The database stores cents, the shell parses
//! user input like `19.99` into cents, and only `Display` converts back
//! to dollars.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;
use thiserror::Error;

/// Error produced when a decimal string cannot be parsed into [`Money`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyParseError {
    /// Input was empty or not a decimal number.
    #[error("'{0}' is not a valid decimal amount (e.g. 19.99)")]
    Invalid(String),

    /// More than two fractional digits were given.
    #[error("'{0}' has more than two decimal places")]
    TooPrecise(String),

    /// The amount does not fit in 64-bit cents.
    #[error("'{0}' is out of range")]
    OutOfRange(String),
}

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: allows negative values for corrections/refunds
/// - **Single field tuple struct**: zero-cost abstraction over i64
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use store_core::money::Money;
    ///
    /// let price = Money::from_cents(1999); // $19.99
    /// assert_eq!(price.cents(), 1999);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity, exactly.
    ///
    /// Returns `None` when the result does not fit in 64-bit cents.
    /// Used to compute `order total = unit price x quantity`; the result
    /// is never recomputed from a later price.
    ///
    /// ```rust
    /// use store_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(1999); // $19.99
    /// let total = unit_price.multiply_quantity(3).unwrap();
    /// assert_eq!(total.cents(), 5997); // $59.97
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> Option<Self> {
        self.0.checked_mul(qty).map(Money)
    }

    /// Parses a decimal string such as `19.99`, `5`, or `0.5` into Money.
    ///
    /// At most two fractional digits are accepted; `0.5` means fifty
    /// cents. This is the console-input path, mirroring how prices are
    /// typed at the prompt.
    pub fn parse(input: &str) -> Result<Self, MoneyParseError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(MoneyParseError::Invalid(input.to_string()));
        }

        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (major_str, minor_str) = match digits.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (digits, ""),
        };

        if minor_str.len() > 2 {
            return Err(MoneyParseError::TooPrecise(input.to_string()));
        }
        if major_str.is_empty() && minor_str.is_empty() {
            return Err(MoneyParseError::Invalid(input.to_string()));
        }
        if !major_str.chars().all(|c| c.is_ascii_digit())
            || !minor_str.chars().all(|c| c.is_ascii_digit())
        {
            return Err(MoneyParseError::Invalid(input.to_string()));
        }

        let major: i64 = if major_str.is_empty() {
            0
        } else {
            major_str
                .parse()
                .map_err(|_| MoneyParseError::OutOfRange(input.to_string()))?
        };

        // Right-pad so "5" and "50" both mean the written fraction:
        // ".5" -> 50 cents, ".05" -> 5 cents.
        let minor: i64 = match minor_str.len() {
            0 => 0,
            1 => minor_str.parse::<i64>().unwrap_or(0) * 10,
            _ => minor_str.parse::<i64>().unwrap_or(0),
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(|| MoneyParseError::OutOfRange(input.to_string()))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse(s)
    }
}

/// Human-readable `$D.CC` rendering for console output.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1999);
        assert_eq!(money.cents(), 1999);
        assert_eq!(money.dollars(), 19);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1999)), "$19.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_parse_whole_and_fractional() {
        assert_eq!(Money::parse("19.99").unwrap().cents(), 1999);
        assert_eq!(Money::parse("19").unwrap().cents(), 1900);
        assert_eq!(Money::parse("0.5").unwrap().cents(), 50);
        assert_eq!(Money::parse("0.05").unwrap().cents(), 5);
        assert_eq!(Money::parse(".99").unwrap().cents(), 99);
        assert_eq!(Money::parse(" 12.00 ").unwrap().cents(), 1200);
        assert_eq!(Money::parse("-5.50").unwrap().cents(), -550);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("19.999").is_err());
        assert!(Money::parse(".").is_err());
        assert!(Money::parse("12,50").is_err());
    }

    #[test]
    fn test_parse_round_trips_display() {
        let m = Money::parse("59.97").unwrap();
        assert_eq!(m.to_string(), "$59.97");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
    }

    /// Scenario from the order workflow: $19.99 x 3 = $59.97 exactly.
    #[test]
    fn test_multiply_quantity_exact() {
        let unit_price = Money::from_cents(1999);
        let total = unit_price.multiply_quantity(3).unwrap();
        assert_eq!(total.cents(), 5997);
    }

    #[test]
    fn test_multiply_quantity_overflow() {
        let huge = Money::from_cents(i64::MAX);
        assert!(huge.multiply_quantity(2).is_none());
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_negative());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
    }
}
