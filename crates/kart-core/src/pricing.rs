//! # Pricing Calculator
//!
//! Pure derivation of cart totals. Nothing here is cached; totals are
//! recomputed from [`CartState`] on every call.
//!
//! ```text
//! subtotal        = Σ unit_price × quantity
//! discount_amount = subtotal × rate / 100   (Valid discount only, else 0)
//! final_total     = subtotal − discount_amount
//! ```
//!
//! `final_total` is never clamped. It cannot go negative because a valid
//! rate is at most 100%, and an invalid one contributes nothing.
//!
//! Sums use checked arithmetic. A cart whose subtotal would overflow is
//! refused at the door (snapshot decoding, quantity edits, config
//! validation), so the saturating fallbacks below are never hit in practice.

use rust_decimal::Decimal;
use serde::Serialize;
use ts_rs::TS;

use crate::cart::{CartState, DiscountField};
use crate::money::{serialize_decimal, Money};
use crate::types::LineItem;

/// Cart totals summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub item_count: usize,
    #[serde(serialize_with = "serialize_decimal")]
    #[ts(type = "number")]
    pub total_quantity: Decimal,
    #[ts(type = "number")]
    pub subtotal: Money,
    #[ts(type = "number")]
    pub discount_amount: Money,
    #[ts(type = "number")]
    pub final_total: Money,
}

/// Sum of every line total, or `None` if any product or the sum overflows.
pub fn checked_subtotal(items: &[LineItem]) -> Option<Money> {
    items.iter().try_fold(Money::zero(), |total, item| {
        total.checked_add(item.checked_line_total()?)
    })
}

/// Sum of every line total, saturating at [`Money::MAX`].
pub fn subtotal(items: &[LineItem]) -> Money {
    checked_subtotal(items).unwrap_or(Money::MAX)
}

/// Total number of units across all lines.
pub fn total_quantity(items: &[LineItem]) -> Decimal {
    items.iter().fold(Decimal::ZERO, |total, item| {
        total.saturating_add(item.quantity().value())
    })
}

/// Discount owed on `subtotal` for the current discount box.
///
/// Empty and invalid boxes both yield zero.
pub fn discount_amount(subtotal: Money, discount: &DiscountField) -> Money {
    discount
        .rate()
        .and_then(|rate| subtotal.percentage(rate))
        .unwrap_or(Money::ZERO)
}

/// Computes every total for `state`.
pub fn calculate(state: &CartState) -> CartTotals {
    let subtotal = subtotal(state.items());
    let discount_amount = discount_amount(subtotal, state.discount());

    CartTotals {
        item_count: state.items().len(),
        total_quantity: total_quantity(state.items()),
        subtotal,
        discount_amount,
        final_total: subtotal - discount_amount,
    }
}

impl From<&CartState> for CartTotals {
    fn from(state: &CartState) -> Self {
        calculate(state)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ItemId, Quantity};
    use rust_decimal_macros::dec;

    fn baseline() -> CartState {
        CartState::new(vec![
            LineItem::new(ItemId::new(1), "A", Money::from_rupees(50), Quantity::ONE),
            LineItem::new(ItemId::new(2), "B", Money::from_rupees(30), Quantity::ONE),
        ])
    }

    #[test]
    fn test_no_discount() {
        let totals = calculate(&baseline());

        assert_eq!(totals.subtotal, Money::from_rupees(80));
        assert_eq!(totals.discount_amount, Money::zero());
        assert_eq!(totals.final_total, Money::from_rupees(80));
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.total_quantity, dec!(2));
    }

    #[test]
    fn test_quantity_change_moves_subtotal() {
        let mut cart = baseline();
        cart.set_quantity(ItemId::new(1), Quantity::units(3).unwrap());

        assert_eq!(calculate(&cart).subtotal, Money::from_rupees(180));
    }

    #[test]
    fn test_ten_percent_discount() {
        let mut cart = baseline();
        cart.set_discount_input("10".to_string());

        let totals = calculate(&cart);
        assert_eq!(totals.discount_amount, Money::from_rupees(8));
        assert_eq!(totals.final_total, Money::from_rupees(72));
    }

    #[test]
    fn test_invalid_discount_fails_closed() {
        for input in ["150", "abc", "-5", " "] {
            let mut cart = baseline();
            cart.set_discount_input(input.to_string());

            let totals = calculate(&cart);
            assert!(cart.discount_error().is_some(), "input {input:?}");
            assert_eq!(totals.discount_amount, Money::zero());
            assert_eq!(totals.final_total, totals.subtotal);
        }
    }

    #[test]
    fn test_full_discount_reaches_zero_not_below() {
        let mut cart = baseline();
        cart.set_discount_input("100".to_string());

        let totals = calculate(&cart);
        assert_eq!(totals.final_total, Money::zero());
    }

    #[test]
    fn test_fractional_discount_is_exact() {
        let mut cart = CartState::new(vec![LineItem::new(
            ItemId::new(1),
            "A",
            Money::from_rupees(10),
            Quantity::ONE,
        )]);
        cart.set_discount_input("33.333".to_string());

        let totals = calculate(&cart);
        assert_eq!(totals.discount_amount.amount(), dec!(3.3333));
        assert_eq!(totals.final_total.amount(), dec!(6.6667));
    }

    #[test]
    fn test_fractional_quantity_prices_exactly() {
        let mut cart = baseline();
        cart.set_quantity(ItemId::new(2), Quantity::new(dec!(2.5)).unwrap());

        let totals = calculate(&cart);
        assert_eq!(totals.subtotal, Money::from_rupees(125));
        assert_eq!(totals.total_quantity, dec!(3.5));
    }

    #[test]
    fn test_checked_subtotal_detects_overflow() {
        let items = vec![
            LineItem::new(ItemId::new(1), "A", Money::MAX, Quantity::ONE),
            LineItem::new(ItemId::new(2), "B", Money::from_rupees(1), Quantity::ONE),
        ];
        assert_eq!(checked_subtotal(&items), None);
        assert_eq!(checked_subtotal(&items[..1]), Some(Money::MAX));
        assert_eq!(checked_subtotal(&[]), Some(Money::zero()));
    }

    #[test]
    fn test_overflowing_cart_does_not_panic() {
        let mut cart = CartState::new(vec![
            LineItem::new(ItemId::new(1), "A", Money::MAX, Quantity::units(3).unwrap()),
            LineItem::new(ItemId::new(2), "B", Money::MAX, Quantity::ONE),
        ]);
        cart.set_discount_input("50".to_string());

        let totals = calculate(&cart);
        assert_eq!(totals.subtotal, Money::MAX);
        assert!(!totals.final_total.is_negative());
    }

    #[test]
    fn test_empty_cart_totals_are_zero() {
        let totals = calculate(&CartState::default());
        assert_eq!(totals.subtotal, Money::zero());
        assert_eq!(totals.final_total, Money::zero());
        assert_eq!(totals.item_count, 0);
    }

    #[test]
    fn test_totals_serialize_camel_case() {
        let json = serde_json::to_value(calculate(&baseline())).unwrap();
        assert_eq!(json["subtotal"], 80);
        assert_eq!(json["discountAmount"], 0);
        assert_eq!(json["finalTotal"], 80);
        assert_eq!(json["itemCount"], 2);
    }
}
