//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With binary floats:                                                    │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Integer paise fix sums, but not percentages:                           │
//! │    12.5% of ₹0.01 = 0.125 paise → rounding inside the math             │
//! │                                                                         │
//! │  OUR SOLUTION: 96-bit Decimal (rust_decimal)                           │
//! │    Every sum and percentage is exact; rounding to two fraction         │
//! │    digits happens once, at display time.                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kart_core::money::Money;
//!
//! let price = Money::from_paise(1099); // ₹10.99
//! let doubled = price + price;
//! assert_eq!(doubled, Money::from_paise(2198));
//! ```
//!
//! ## Wire Format
//! The persisted snapshot stores prices as plain JSON numbers (`50`, `49.99`).
//! `Money` serializes whole amounts as integers and everything else as the
//! shortest float that reads back to the same decimal. An amount no float
//! can hold exactly is written as a numeric string instead, so a snapshot
//! always reloads to the value it was written from.
//!
//! ## Overflow
//! `Decimal` arithmetic panics on overflow. Cart math goes through the
//! `checked_*` methods; the operator impls are for amounts known to be small.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

use crate::types::{Percentage, Quantity};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in rupees, held as an exact decimal.
///
/// ## Design Decisions
/// - **Decimal (signed)**: a discount is subtracted, so intermediate values
///   may be negative
/// - **No float constructor**: floats only appear at the JSON boundary
/// - **Equality is numeric**: `₹50` equals `₹50.00`
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  LineItem.unit_price ──► line total ──► subtotal                        │
/// │                                            │                            │
/// │                     discount % ────────────┼──► discount amount         │
/// │                                            ▼                            │
/// │                                       final total ──► format_inr()      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    /// Zero rupees.
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Largest representable amount.
    pub const MAX: Money = Money(Decimal::MAX);

    /// Wraps an exact decimal amount of rupees.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// ```rust
    /// use kart_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupees(50), Money::from_paise(5000));
    /// ```
    #[inline]
    pub fn from_rupees(rupees: i64) -> Self {
        Money(Decimal::from(rupees))
    }

    /// Creates a Money value from paise (the smallest currency unit).
    #[inline]
    pub fn from_paise(paise: i64) -> Self {
        Money(Decimal::new(paise, 2))
    }

    /// Returns the exact amount in rupees.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money::ZERO
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Adds two amounts, or `None` if the sum overflows.
    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Multiplies a unit price by a quantity, or `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use kart_core::money::Money;
    /// use kart_core::types::Quantity;
    ///
    /// let unit_price = Money::from_paise(299); // ₹2.99
    /// let quantity = Quantity::units(3).unwrap();
    /// assert_eq!(unit_price.checked_multiply_quantity(quantity), Some(Money::from_paise(897)));
    ///
    /// assert_eq!(Money::MAX.checked_multiply_quantity(quantity), None);
    /// ```
    #[inline]
    pub fn checked_multiply_quantity(&self, quantity: Quantity) -> Option<Self> {
        self.0.checked_mul(quantity.value()).map(Money)
    }

    /// Returns `rate` percent of this amount, unrounded.
    ///
    /// The rate is scaled to a fraction first, so the product never exceeds
    /// the amount itself.
    ///
    /// ## Example
    /// ```rust
    /// use kart_core::money::Money;
    /// use kart_core::types::Percentage;
    /// use rust_decimal_macros::dec;
    ///
    /// let subtotal = Money::from_rupees(80);
    /// let rate = Percentage::new(dec!(10)).unwrap();
    /// assert_eq!(subtotal.percentage(rate), Some(Money::from_rupees(8)));
    /// ```
    pub fn percentage(&self, rate: Percentage) -> Option<Self> {
        self.0.checked_mul(rate.fraction()).map(Money)
    }

    /// Rounds to whole paise, half away from zero.
    ///
    /// This matches how browsers round currency for display. Only the
    /// presentation layer should need it; pricing stays exact.
    pub fn round_to_paise(&self) -> Self {
        Money(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain two-digit rendering, for logs and debugging.
///
/// Use [`crate::format::format_inr`] for anything a shopper sees.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rounded = self.round_to_paise().0;
        rounded.rescale(2);
        write!(f, "{}", rounded)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
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

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

// =============================================================================
// Serde (JSON number <-> Decimal)
// =============================================================================

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_decimal(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DecimalVisitor).map(Money)
    }
}

/// Writes a decimal as the JSON number that reads back to exactly the same
/// value, falling back to a numeric string when no such number exists.
pub(crate) fn serialize_decimal<S: Serializer>(
    value: &Decimal,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    if value.fract().is_zero() {
        if let Some(whole) = value.to_i64() {
            return serializer.serialize_i64(whole);
        }
    }

    if let Some(float) = value.to_f64() {
        if float.is_finite() && decimal_from_f64(float).as_ref() == Some(value) {
            return serializer.serialize_f64(float);
        }
    }

    serializer.collect_str(&value.normalize())
}

/// `f64`'s Display is the shortest text that reads back to the same float,
/// so 49.99 becomes exactly 49.99 rather than 49.9899999...
fn decimal_from_f64(value: f64) -> Option<Decimal> {
    Decimal::from_str(&value.to_string()).ok()
}

/// Reads a decimal from a JSON/TOML number or a numeric string.
pub(crate) struct DecimalVisitor;

impl<'de> Visitor<'de> for DecimalVisitor {
    type Value = Decimal;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or numeric string")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Decimal, E> {
        Ok(Decimal::from(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Decimal, E> {
        Ok(Decimal::from(value))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Decimal, E> {
        if !value.is_finite() {
            return Err(E::custom("number must be finite"));
        }
        decimal_from_f64(value).ok_or_else(|| E::custom(format!("number {} is out of range", value)))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Decimal, E> {
        Decimal::from_str(value.trim())
            .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn money(text: &str) -> Money {
        Money::new(Decimal::from_str(text).unwrap())
    }

    #[test]
    fn test_from_paise_and_rupees() {
        assert_eq!(Money::from_paise(1099).amount(), dec!(10.99));
        assert_eq!(Money::from_rupees(50).amount(), dec!(50));
        assert_eq!(Money::from_rupees(50), Money::from_paise(5000));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_paise(1099).to_string(), "10.99");
        assert_eq!(Money::from_rupees(5).to_string(), "5.00");
        assert_eq!(Money::from_paise(-550).to_string(), "-5.50");
        assert_eq!(Money::new(dec!(0.125)).to_string(), "0.13");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_rupees(10);
        let b = Money::from_rupees(5);

        assert_eq!(a + b, Money::from_rupees(15));
        assert_eq!(a - b, Money::from_rupees(5));

        let mut c = a;
        c += b;
        c -= Money::from_rupees(1);
        assert_eq!(c, Money::from_rupees(14));
    }

    #[test]
    fn test_binary_float_drift_does_not_occur() {
        let total = Money::new(dec!(0.1)).checked_add(Money::new(dec!(0.2)));
        assert_eq!(total, Some(Money::new(dec!(0.3))));
    }

    #[test]
    fn test_checked_arithmetic_overflow() {
        assert_eq!(Money::MAX.checked_add(Money::from_paise(1)), None);
        assert_eq!(
            Money::from_rupees(5).checked_add(Money::from_rupees(7)),
            Some(Money::from_rupees(12))
        );

        let huge = money("10000000000000000000000000000");
        assert_eq!(huge.checked_multiply_quantity(Quantity::units(10).unwrap()), None);
        assert_eq!(
            huge.checked_multiply_quantity(Quantity::ONE),
            Some(huge)
        );
    }

    #[test]
    fn test_percentage_is_exact() {
        let amount = Money::from_paise(1);
        let rate = Percentage::new(dec!(12.5)).unwrap();
        assert_eq!(amount.percentage(rate).unwrap().amount(), dec!(0.00125));
    }

    #[test]
    fn test_percentage_of_max_does_not_overflow() {
        let rate = Percentage::new(dec!(100)).unwrap();
        assert_eq!(Money::MAX.percentage(rate), Some(Money::MAX));
    }

    #[test]
    fn test_round_to_paise_half_away_from_zero() {
        assert_eq!(Money::new(dec!(0.125)).round_to_paise().amount(), dec!(0.13));
        assert_eq!(Money::new(dec!(-0.125)).round_to_paise().amount(), dec!(-0.13));
        assert_eq!(Money::new(dec!(0.124)).round_to_paise().amount(), dec!(0.12));
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_negative());

        assert!(!Money::from_rupees(1).is_negative());
        assert!(Money::from_rupees(-1).is_negative());
    }

    #[test]
    fn test_serialize_as_json_number() {
        assert_eq!(serde_json::to_string(&Money::from_rupees(50)).unwrap(), "50");
        assert_eq!(serde_json::to_string(&Money::from_paise(4999)).unwrap(), "49.99");
    }

    #[test]
    fn test_deserialize_numbers_without_drift() {
        let whole: Money = serde_json::from_str("50").unwrap();
        assert_eq!(whole.amount(), dec!(50));

        let fractional: Money = serde_json::from_str("49.99").unwrap();
        assert_eq!(fractional.amount(), dec!(49.99));

        let text: Money = serde_json::from_str("\"12.50\"").unwrap();
        assert_eq!(text.amount(), dec!(12.5));
    }

    #[test]
    fn test_serialize_keeps_precision_floats_cannot_hold() {
        let precise = Money::new(dec!(0.12345678901234567891));
        let json = serde_json::to_string(&precise).unwrap();
        assert_eq!(json, "\"0.12345678901234567891\"");

        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back.amount(), dec!(0.12345678901234567891));
    }

    #[test]
    fn test_serialize_large_whole_amount_exactly() {
        let large = money("12345678901234567890123");
        let back: Money = serde_json::from_str(&serde_json::to_string(&large).unwrap()).unwrap();
        assert_eq!(back, large);
    }

    #[test]
    fn test_deserialize_rejects_non_numbers() {
        assert!(serde_json::from_str::<Money>("\"cheap\"").is_err());
        assert!(serde_json::from_str::<Money>("true").is_err());
        assert!(serde_json::from_str::<Money>("1e300").is_err());
    }
}
