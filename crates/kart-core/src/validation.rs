//! # Validation Module
//!
//! The parse boundary between raw shopper input and typed cart values.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Input → Typed Value                                │
//! │                                                                         │
//! │  Quantity box: "3"  ──► parse_quantity() ──► Ok(Quantity(3))           │
//! │                "0"  ──►                  ──► Err(MustBePositive)       │
//! │                "x"  ──►                  ──► Err(NotANumber)           │
//! │                                                                         │
//! │  Discount box: ""    ──► parse_discount() ──► Ok(None)                 │
//! │                "10"  ──►                  ──► Ok(Some(10%))            │
//! │                "150" ──►                  ──► Err(OutOfRange)          │
//! │                                                                         │
//! │  The engine decides what an Err means:                                 │
//! │  • quantity → silent no-op                                             │
//! │  • discount → error message shown, discount treated as zero            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Parsing is strict: `"10abc"` is not a number, even though a browser's
//! `parseFloat` would read it as 10.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::types::{Percentage, Quantity};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numbers
// =============================================================================

/// Reads `raw` as a decimal number.
///
/// Surrounding whitespace is ignored. Plain (`12.5`) and scientific (`1e2`)
/// notation are accepted.
pub fn parse_number(field: &str, raw: &str) -> ValidationResult<Decimal> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| ValidationError::NotANumber {
            field: field.to_string(),
            input: raw.to_string(),
        })
}

// =============================================================================
// Quantity
// =============================================================================

/// Parses a quantity typed by the shopper.
///
/// ## Rules
/// - Must be a number
/// - Must be at least 1 (fractions such as `2.5` are fine)
///
/// ## Example
/// ```rust
/// use kart_core::validation::parse_quantity;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(parse_quantity(" 3 ").unwrap().value(), dec!(3));
/// assert_eq!(parse_quantity("2.5").unwrap().value(), dec!(2.5));
/// assert!(parse_quantity("0").is_err());
/// assert!(parse_quantity("-2").is_err());
/// assert!(parse_quantity("").is_err());
/// assert!(parse_quantity("two").is_err());
/// ```
pub fn parse_quantity(raw: &str) -> ValidationResult<Quantity> {
    Quantity::new(parse_number("quantity", raw)?)
}

// =============================================================================
// Discount
// =============================================================================

/// Parses the discount percentage box.
///
/// ## Returns
/// - `Ok(None)` for an empty box (no discount, no error)
/// - `Ok(Some(rate))` for a number in `0 ..= 100`
/// - `Err(_)` for anything else, including whitespace-only text
///
/// ## Example
/// ```rust
/// use kart_core::validation::parse_discount;
///
/// assert!(parse_discount("").unwrap().is_none());
/// assert!(parse_discount("10").unwrap().is_some());
/// assert!(parse_discount("150").is_err());
/// assert!(parse_discount("abc").is_err());
/// ```
pub fn parse_discount(raw: &str) -> ValidationResult<Option<Percentage>> {
    if raw.is_empty() {
        return Ok(None);
    }

    let value = parse_number("discount", raw)?;
    Percentage::new(value).map(Some)
}

// =============================================================================
// Unit Tests
// =============================================================================
