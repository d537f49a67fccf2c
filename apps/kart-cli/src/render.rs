//! # Output
//!
//! Turns the cart into text for the terminal. All money goes through
//! [`format_inr`]; nothing rendered here is ever read back.

use std::fmt::Write as _;

use kart_core::format::format_inr;
use kart_core::{CartState, CartTotals, LineItem};
use serde::Serialize;

use crate::commands::Outcome;

/// JSON shape for `--json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView<'a> {
    pub items: &'a [LineItem],
    pub discount_input: &'a str,
    pub discount_error: Option<&'a str>,
    pub totals: CartTotals,
    pub changed: bool,
}

impl<'a> CartView<'a> {
    pub fn new(state: &'a CartState, totals: CartTotals, outcome: Outcome) -> Self {
        CartView {
            items: state.items(),
            discount_input: state.discount_input(),
            discount_error: state.discount_error(),
            totals,
            changed: outcome == Outcome::Changed,
        }
    }
}

pub fn json(state: &CartState, totals: CartTotals, outcome: Outcome) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&CartView::new(state, totals, outcome))
}

/// Item table followed by the totals block.
pub fn table(state: &CartState, totals: &CartTotals) -> String {
    let mut out = String::new();

    if state.is_empty() {
        out.push_str("Your cart is empty.\n");
    } else {
        let _ = writeln!(
            out,
            "{:>4}  {:<24} {:>14} {:>5} {:>14}",
            "ID", "Product", "Price", "Qty", "Total"
        );
        for item in state.items() {
            let _ = writeln!(
                out,
                "{:>4}  {:<24} {:>14} {:>5} {:>14}",
                item.id(),
                item.name(),
                format_inr(item.unit_price()),
                item.quantity(),
                format_inr(item.line_total()),
            );
        }
    }

    out.push('\n');
    out.push_str(&summary(state, totals));
    out
}

/// Discount line plus subtotal / discount / final total.
pub fn summary(state: &CartState, totals: &CartTotals) -> String {
    let mut out = String::new();

    if !state.discount_input().is_empty() {
        let _ = writeln!(out, "Discount (%): {}", state.discount_input());
    }
    if let Some(error) = state.discount_error() {
        let _ = writeln!(out, "  ! {}", error);
    }

    let _ = writeln!(out, "Subtotal:        {}", format_inr(totals.subtotal));
    let _ = writeln!(out, "Discount Amount: {}", format_inr(totals.discount_amount));
    let _ = writeln!(out, "Final Total:     {}", format_inr(totals.final_total));
    out
}
