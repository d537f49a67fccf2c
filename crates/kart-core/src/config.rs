//! # Cart Configuration
//!
//! Immutable settings handed to [`crate::engine::CartEngine`] at construction.
//!
//! ## Fields
//! - `storage_key`: where the snapshot lives in the key-value store
//! - `default_catalog`: items a brand-new (or unrecoverable) cart starts with
//!
//! ## File Format
//! Binaries may load this from TOML; every field has a default.
//! ```toml
//! storage_key = "cartProducts"
//!
//! [[default_catalog]]
//! id = 1
//! name = "Product A"
//! price = 50
//! quantity = 1
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing;
use crate::types::{ItemId, LineItem, Quantity};
use crate::DEFAULT_STORAGE_KEY;

/// The seed items used when there is no usable stored cart.
pub fn default_catalog() -> Vec<LineItem> {
    vec![
        LineItem::new(ItemId::new(1), "Product A", Money::from_rupees(50), Quantity::ONE),
        LineItem::new(ItemId::new(2), "Product B", Money::from_rupees(30), Quantity::ONE),
    ]
}

/// Cart engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    pub storage_key: String,
    pub default_catalog: Vec<LineItem>,
}

impl Default for CartConfig {
    fn default() -> Self {
        CartConfig {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            default_catalog: default_catalog(),
        }
    }
}

impl CartConfig {
    pub fn new(storage_key: impl Into<String>, default_catalog: Vec<LineItem>) -> Self {
        CartConfig {
            storage_key: storage_key.into(),
            default_catalog,
        }
    }

    pub fn with_storage_key(mut self, storage_key: impl Into<String>) -> Self {
        self.storage_key = storage_key.into();
        self
    }

    pub fn with_default_catalog(mut self, default_catalog: Vec<LineItem>) -> Self {
        self.default_catalog = default_catalog;
        self
    }

    /// Checks the settings can seed a cart without breaking its invariants.
    ///
    /// ## Rules
    /// - Storage key must not be blank
    /// - Catalog ids must be unique
    /// - Catalog prices must not be negative
    /// - The catalog's subtotal must fit in [`Money`]
    ///
    /// An empty catalog is allowed; it just means a fresh cart starts empty.
    pub fn validate(&self) -> CoreResult<()> {
        if self.storage_key.trim().is_empty() {
            return Err(CoreError::InvalidConfig(
                "storage key must not be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for item in &self.default_catalog {
            if !seen.insert(item.id()) {
                return Err(CoreError::InvalidConfig(format!(
                    "default catalog has duplicate item id {}",
                    item.id()
                )));
            }
            if item.unit_price().is_negative() {
                return Err(CoreError::InvalidConfig(format!(
                    "default catalog item {} has a negative price",
                    item.id()
                )));
            }
        }

        if pricing::checked_subtotal(&self.default_catalog).is_none() {
            return Err(CoreError::InvalidConfig(
                "default catalog subtotal overflows".to_string(),
            ));
        }

        Ok(())
    }
}
