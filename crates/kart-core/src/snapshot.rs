//! # Snapshot Codec
//!
//! Converts the item list to and from the text kept in the key-value store,
//! and decides what a freshly started cart contains.
//!
//! ## Initial Load Decision
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  store.get(key)                                                         │
//! │       │                                                                 │
//! │       ├── None ───────────────────────────────► default catalog        │
//! │       │                                                                 │
//! │       └── Some(text) ──► decode(text)                                   │
//! │                             │                                           │
//! │                             ├── not JSON ─────► default catalog (warn)  │
//! │                             ├── not an array ─► default catalog (warn)  │
//! │                             ├── empty array ──► default catalog (warn)  │
//! │                             ├── bad item ─────► default catalog (warn)  │
//! │                             ├── overflow ─────► default catalog (warn)  │
//! │                             └── Ok(items) ────► items, order preserved  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::error::SnapshotError;
use crate::pricing;
use crate::types::LineItem;

/// Serializes items as a JSON array of `{id, name, price, quantity}`.
pub fn encode(items: &[LineItem]) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(items)?)
}

/// Parses a stored snapshot.
///
/// Fails on anything that cannot become a non-empty list of well-formed
/// line items with unique ids, non-negative prices and a subtotal that
/// fits in [`Money`](crate::money::Money).
pub fn decode(raw: &str) -> Result<Vec<LineItem>, SnapshotError> {
    let value: Value = serde_json::from_str(raw)?;

    let Value::Array(entries) = value else {
        return Err(SnapshotError::NotASequence);
    };

    if entries.is_empty() {
        return Err(SnapshotError::Empty);
    }

    let mut items = Vec::with_capacity(entries.len());
    let mut seen = HashSet::with_capacity(entries.len());

    for (index, entry) in entries.into_iter().enumerate() {
        let item: LineItem = serde_json::from_value(entry)
            .map_err(|source| SnapshotError::InvalidItem { index, source })?;

        if !seen.insert(item.id()) {
            return Err(SnapshotError::DuplicateId(item.id()));
        }
        if item.unit_price().is_negative() {
            return Err(SnapshotError::NegativePrice(item.id()));
        }

        items.push(item);
    }

    if pricing::checked_subtotal(&items).is_none() {
        return Err(SnapshotError::SubtotalOverflow);
    }

    Ok(items)
}

/// Chooses the starting items from an optional stored snapshot.
///
/// Never fails: anything unusable falls back to `catalog`.
pub fn load_initial_items(raw: Option<&str>, catalog: &[LineItem]) -> Vec<LineItem> {
    let Some(raw) = raw else {
        debug!("No stored cart, starting from default catalog");
        return catalog.to_vec();
    };

    match decode(raw) {
        Ok(items) => {
            debug!(count = items.len(), "Restored cart from snapshot");
            items
        }
        Err(err) => {
            warn!(error = %err, "Stored cart is unusable, starting from default catalog");
            catalog.to_vec()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
