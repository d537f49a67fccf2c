//! # Domain Types
//!
//! Core domain types used throughout Kart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │    Quantity     │   │   Percentage    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (ItemId)    │   │  Decimal, >= 1  │   │  Decimal        │       │
//! │  │  name           │   │                 │   │  0 ..= 100      │       │
//! │  │  unit_price     │   └─────────────────┘   └─────────────────┘       │
//! │  │  quantity       │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every type here can only be constructed in a valid state. The raw-text
//! entry points live in [`crate::validation`].

use rust_decimal::Decimal;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::{serialize_decimal, DecimalVisitor, Money};
use crate::{MAX_DISCOUNT_PERCENT, MIN_DISCOUNT_PERCENT};

// =============================================================================
// Item Id
// =============================================================================

/// Stable identity of a line item within one cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(i64);

impl ItemId {
    #[inline]
    pub const fn new(id: i64) -> Self {
        ItemId(id)
    }

    #[inline]
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        ItemId(id)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// =============================================================================
// Quantity
// =============================================================================

/// How many units of a line item are in the cart. Always at least one.
///
/// Fractional amounts are allowed (`2.5` kg of rice); the number input the
/// cart is edited through only enforces the lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(Decimal);

impl Quantity {
    /// One unit.
    pub const ONE: Quantity = Quantity(Decimal::ONE);

    /// Creates a quantity, rejecting anything below one.
    ///
    /// ```rust
    /// use kart_core::types::Quantity;
    /// use rust_decimal_macros::dec;
    ///
    /// assert_eq!(Quantity::new(dec!(2.5)).unwrap().value(), dec!(2.5));
    /// assert!(Quantity::new(dec!(0.5)).is_err());
    /// ```
    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value < Decimal::ONE {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            });
        }
        Ok(Quantity(value))
    }

    /// A whole number of units.
    pub fn units(count: u32) -> Result<Self, ValidationError> {
        Quantity::new(Decimal::from(count))
    }

    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.normalize(), f)
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_decimal(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = deserializer.deserialize_any(DecimalVisitor)?;
        Quantity::new(value).map_err(de::Error::custom)
    }
}

// =============================================================================
// Percentage
// =============================================================================

/// A discount rate in percent, always within `0 ..= 100`.
///
/// Zero is a legal rate: it applies no discount and raises no error, the
/// same as leaving the discount empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Percentage(Decimal);

impl Percentage {
    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value < Decimal::from(MIN_DISCOUNT_PERCENT) || value > Decimal::from(MAX_DISCOUNT_PERCENT)
        {
            return Err(ValidationError::OutOfRange {
                field: "discount".to_string(),
                min: MIN_DISCOUNT_PERCENT,
                max: MAX_DISCOUNT_PERCENT,
            });
        }
        Ok(Percentage(value))
    }

    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// The rate as a fraction in `0 ..= 1`.
    pub fn fraction(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product row in the cart.
///
/// ## Wire Shape
/// ```json
/// { "id": 1, "name": "Product A", "price": 50, "quantity": 1 }
/// ```
///
/// ## Invariants
/// - `quantity >= 1` (enforced by [`Quantity`])
/// - `unit_price` is frozen once the item exists; there is no setter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    #[ts(type = "number")]
    id: ItemId,

    name: String,

    /// Price of a single unit in rupees.
    #[serde(rename = "price")]
    #[ts(type = "number")]
    unit_price: Money,

    #[ts(type = "number")]
    quantity: Quantity,
}

impl LineItem {
    pub fn new(id: ItemId, name: impl Into<String>, unit_price: Money, quantity: Quantity) -> Self {
        LineItem {
            id,
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    #[inline]
    pub fn id(&self) -> ItemId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    #[inline]
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Unit price × quantity, or `None` if the product overflows.
    #[inline]
    pub fn checked_line_total(&self) -> Option<Money> {
        self.unit_price.checked_multiply_quantity(self.quantity)
    }

    /// Unit price × quantity, saturating at [`Money::MAX`].
    ///
    /// Items that reach a cart through snapshot decoding or a quantity edit
    /// never saturate; both reject carts whose totals overflow.
    pub fn line_total(&self) -> Money {
        self.checked_line_total().unwrap_or(Money::MAX)
    }

    /// Only the cart may change a quantity, and only through its guards.
    pub(crate) fn set_quantity(&mut self, quantity: Quantity) {
        self.quantity = quantity;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
