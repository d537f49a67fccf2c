//! # Display Formatting
//!
//! Indian Rupee rendering for the presentation layer.
//!
//! ```text
//! 80         → ₹80.00
//! 123456.78  → ₹1,23,456.78     (lakh/crore grouping: 3 digits, then 2s)
//! -5         → -₹5.00
//! ```
//!
//! Output of this module is for people only. Never parse it back into a
//! [`Money`] or store it.

use crate::money::Money;

/// Currency symbol for INR.
pub const RUPEE_SYMBOL: &str = "₹";

/// Formats an amount like `Intl.NumberFormat("en-IN", { currency: "INR" })`.
///
/// ## Example
/// ```rust
/// use kart_core::format::format_inr;
/// use kart_core::Money;
///
/// assert_eq!(format_inr(Money::from_rupees(80)), "₹80.00");
/// assert_eq!(format_inr(Money::from_paise(12345678)), "₹1,23,456.78");
/// ```
pub fn format_inr(amount: Money) -> String {
    let mut rounded = amount.round_to_paise().amount();
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    rounded = rounded.abs();
    rounded.rescale(2);
    let digits = rounded.to_string();
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!(
        "{}{}{}.{}",
        if negative { "-" } else { "" },
        RUPEE_SYMBOL,
        group_indian(whole),
        fraction
    )
}

/// Inserts separators: last three digits, then groups of two.
fn group_indian(whole: &str) -> String {
    if whole.len() <= 3 {
        return whole.to_string();
    }

    let (mut head, last_three) = whole.split_at(whole.len() - 3);
    let mut groups = Vec::new();
    while head.len() > 2 {
        let (rest, pair) = head.split_at(head.len() - 2);
        groups.push(pair);
        head = rest;
    }
    groups.push(head);
    groups.reverse();

    format!("{},{}", groups.join(","), last_three)
}
