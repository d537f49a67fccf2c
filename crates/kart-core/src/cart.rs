//! # Cart State
//!
//! The in-memory cart: ordered line items plus the discount box.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Shopper Action           CartState method        Change                │
//! │  ──────────────           ────────────────        ──────                │
//! │                                                                         │
//! │  Change Quantity ────────► set_quantity() ──────► items[i].qty = n     │
//! │                                                                         │
//! │  Click Remove ───────────► remove_item() ───────► items.retain(..)     │
//! │                                                                         │
//! │  Type Discount ──────────► set_discount_input() ► discount = ..        │
//! │                                                                         │
//! │  Item methods return `true` only when `items` actually changed, so the │
//! │  engine knows whether a write-back is due.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Discount Field States
//! ```text
//!            set_discount_input("")
//!        ┌──────────────────────────────┐
//!        ▼                              │
//!   ┌─────────┐  "10"   ┌─────────┐     │
//!   │  Empty  │────────►│  Valid  │─────┤
//!   └─────────┘         └─────────┘     │
//!        │  "abc"/"150"      ▲ │        │
//!        ▼                   │ ▼        │
//!   ┌─────────┐   "10"       │          │
//!   │ Invalid │──────────────┘          │
//!   └─────────┘─────────────────────────┘
//! ```

use tracing::trace;

use crate::pricing;
use crate::types::{ItemId, LineItem, Percentage, Quantity};
use crate::validation::parse_discount;
use crate::DISCOUNT_ERROR_MESSAGE;

// =============================================================================
// Discount Field
// =============================================================================

/// The discount text box and what it currently means.
///
/// "Empty" and a valid `"0"` are numerically identical (no discount, no
/// error); they stay separate variants only because the raw text differs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DiscountField {
    /// Nothing typed. No discount, no error.
    #[default]
    Empty,

    /// Parses to a rate in `0 ..= 100`; the discount applies.
    Valid { input: String, rate: Percentage },

    /// Typed but unusable; an error is shown and the discount counts as zero.
    Invalid { input: String },
}

impl DiscountField {
    /// Classifies raw discount text.
    pub fn from_input(input: String) -> Self {
        match parse_discount(&input) {
            Ok(None) => DiscountField::Empty,
            Ok(Some(rate)) => DiscountField::Valid { input, rate },
            Err(err) => {
                trace!(input = %input, error = %err, "Discount input rejected");
                DiscountField::Invalid { input }
            }
        }
    }

    /// The raw text exactly as the shopper typed it.
    pub fn input(&self) -> &str {
        match self {
            DiscountField::Empty => "",
            DiscountField::Valid { input, .. } | DiscountField::Invalid { input } => input,
        }
    }

    /// The validation message, present only in the `Invalid` state.
    pub fn error(&self) -> Option<&'static str> {
        match self {
            DiscountField::Invalid { .. } => Some(DISCOUNT_ERROR_MESSAGE),
            _ => None,
        }
    }

    /// The rate to apply, present only in the `Valid` state.
    pub fn rate(&self) -> Option<Percentage> {
        match self {
            DiscountField::Valid { rate, .. } => Some(*rate),
            _ => None,
        }
    }
}

// =============================================================================
// Cart State
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Item ids are unique
/// - Every quantity is >= 1
/// - `discount_error()` is `Some` iff `discount_input()` is non-empty and does
///   not parse to a number in `0 ..= 100`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CartState {
    items: Vec<LineItem>,
    discount: DiscountField,
}

impl CartState {
    /// Creates a cart holding `items` with an empty discount box.
    pub fn new(items: Vec<LineItem>) -> Self {
        CartState {
            items,
            discount: DiscountField::Empty,
        }
    }

    /// Items in display order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Looks up an item by id.
    pub fn item(&self, id: ItemId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn discount(&self) -> &DiscountField {
        &self.discount
    }

    pub fn discount_input(&self) -> &str {
        self.discount.input()
    }

    pub fn discount_error(&self) -> Option<&'static str> {
        self.discount.error()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sets the quantity of the item with `id`.
    ///
    /// ## Returns
    /// `false` if no item has that id, it already had that quantity, or the
    /// new subtotal would not fit in [`Money`](crate::money::Money).
    pub fn set_quantity(&mut self, id: ItemId, quantity: Quantity) -> bool {
        let Some(index) = self.items.iter().position(|item| item.id() == id) else {
            return false;
        };
        if self.items[index].quantity() == quantity {
            return false;
        }

        let mut updated = self.items.clone();
        updated[index].set_quantity(quantity);
        if pricing::checked_subtotal(&updated).is_none() {
            trace!(%id, %quantity, "Quantity rejected, subtotal would overflow");
            return false;
        }

        self.items = updated;
        true
    }

    /// Removes the item with `id`.
    ///
    /// ## Returns
    /// `false` if no item has that id.
    pub fn remove_item(&mut self, id: ItemId) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|item| item.id() != id);
        self.items.len() != initial_len
    }

    /// Replaces the discount text and re-validates it.
    pub fn set_discount_input(&mut self, input: String) {
        self.discount = DiscountField::from_input(input);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn sample_cart() -> CartState {
        CartState::new(vec![
            LineItem::new(ItemId::new(1), "Product A", Money::from_rupees(50), Quantity::ONE),
            LineItem::new(ItemId::new(2), "Product B", Money::from_rupees(30), Quantity::ONE),
        ])
    }

    fn qty(n: u32) -> Quantity {
        Quantity::units(n).unwrap()
    }

    #[test]
    fn test_set_quantity_changes_only_target() {
        let mut cart = sample_cart();

        assert!(cart.set_quantity(ItemId::new(1), qty(3)));

        assert_eq!(cart.item(ItemId::new(1)).unwrap().quantity(), qty(3));
        assert_eq!(cart.item(ItemId::new(2)).unwrap().quantity(), qty(1));
    }

    #[test]
    fn test_set_quantity_unknown_id_is_noop() {
        let mut cart = sample_cart();
        let before = cart.clone();

        assert!(!cart.set_quantity(ItemId::new(99), qty(4)));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_set_same_quantity_reports_no_change() {
        let mut cart = sample_cart();
        assert!(!cart.set_quantity(ItemId::new(2), qty(1)));
    }

    #[test]
    fn test_set_quantity_refuses_overflowing_subtotal() {
        let gold = Money::new(Decimal::from(10_i64.pow(18)) * Decimal::from(1_000_000));
        let mut cart = CartState::new(vec![
            LineItem::new(ItemId::new(1), "Gold", gold, Quantity::ONE),
            LineItem::new(ItemId::new(2), "Product B", Money::from_rupees(30), Quantity::ONE),
        ]);
        let before = cart.clone();

        assert!(!cart.set_quantity(ItemId::new(1), qty(1_000_000)));
        assert_eq!(cart, before);

        assert!(cart.set_quantity(ItemId::new(1), qty(1_000)));
        assert_eq!(cart.item(ItemId::new(1)).unwrap().quantity(), qty(1_000));
    }

    #[test]
    fn test_fractional_quantity() {
        let mut cart = sample_cart();
        let two_and_a_half = Quantity::new(dec!(2.5)).unwrap();

        assert!(cart.set_quantity(ItemId::new(1), two_and_a_half));
        assert_eq!(cart.item(ItemId::new(1)).unwrap().quantity(), two_and_a_half);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = sample_cart();

        assert!(cart.remove_item(ItemId::new(1)));
        assert!(!cart.remove_item(ItemId::new(1)));
        assert_eq!(cart.items().len(), 1);

        assert!(cart.remove_item(ItemId::new(2)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_discount_states() {
        let mut cart = sample_cart();
        assert_eq!(cart.discount(), &DiscountField::Empty);

        cart.set_discount_input("10".to_string());
        assert!(matches!(cart.discount(), DiscountField::Valid { .. }));
        assert_eq!(cart.discount_input(), "10");
        assert_eq!(cart.discount_error(), None);

        cart.set_discount_input("150".to_string());
        assert_eq!(cart.discount_input(), "150");
        assert_eq!(cart.discount_error(), Some(DISCOUNT_ERROR_MESSAGE));
        assert!(cart.discount().rate().is_none());

        cart.set_discount_input("abc".to_string());
        assert_eq!(cart.discount_error(), Some(DISCOUNT_ERROR_MESSAGE));

        cart.set_discount_input(String::new());
        assert_eq!(cart.discount(), &DiscountField::Empty);
        assert_eq!(cart.discount_error(), None);
    }

    #[test]
    fn test_zero_discount_is_valid_without_error() {
        let mut cart = sample_cart();
        cart.set_discount_input("0".to_string());
        assert_eq!(cart.discount_error(), None);
        assert!(cart.discount().rate().unwrap().value().is_zero());
    }
}
