//! # Cart Engine
//!
//! Owns the cart for a session and keeps the store mirror up to date.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CartEngine Lifecycle                             │
//! │                                                                         │
//! │  CartEngine::load(config, store)                                        │
//! │       │  store.get(key)            ◄── the only read, ever              │
//! │       │  snapshot::load_initial_items()                                 │
//! │       │  store.set(key, items)     ◄── mirror what was adopted          │
//! │       ▼                                                                 │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  update_quantity / set_quantity / remove_item                    │  │
//! │  │       │ items changed?                                           │  │
//! │  │       ├── no  ──► return false (silent no-op)                    │  │
//! │  │       └── yes ──► store.set(key, items) ──► notify listeners     │  │
//! │  │                                                                  │  │
//! │  │  set_discount_input                                              │  │
//! │  │       └─────────────────────────────────────► notify listeners   │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Threading
//! Single-threaded by construction: every mutation takes `&mut self`, and
//! listeners run synchronously before the mutating call returns.
//!
//! ## Failure Handling
//! A failed store write is logged and otherwise ignored. The in-memory cart
//! is never rolled back.

use tracing::{debug, trace, warn};

use crate::cart::CartState;
use crate::config::CartConfig;
use crate::pricing::{self, CartTotals};
use crate::snapshot;
use crate::store::KeyValueStore;
use crate::types::{ItemId, LineItem, Quantity};
use crate::validation::parse_quantity;

type ChangeListener = Box<dyn FnMut(&CartState, &CartTotals)>;

/// The cart state engine.
pub struct CartEngine<S: KeyValueStore> {
    config: CartConfig,
    store: S,
    state: CartState,
    listeners: Vec<ChangeListener>,
}

impl<S: KeyValueStore> CartEngine<S> {
    /// Builds the session cart from whatever `store` holds under the
    /// configured key, falling back to the default catalog.
    ///
    /// The discount box always starts empty.
    ///
    /// ## Example
    /// ```rust
    /// use kart_core::{CartConfig, CartEngine, MemoryStore, Money};
    ///
    /// let engine = CartEngine::load(CartConfig::default(), MemoryStore::new());
    /// assert_eq!(engine.totals().subtotal, Money::from_rupees(80));
    /// ```
    pub fn load(config: CartConfig, store: S) -> Self {
        let raw = match store.get(&config.storage_key) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(key = %config.storage_key, error = %err, "Failed to read stored cart");
                None
            }
        };

        let items = snapshot::load_initial_items(raw.as_deref(), &config.default_catalog);

        let mut engine = CartEngine {
            config,
            store,
            state: CartState::new(items),
            listeners: Vec::new(),
        };
        engine.persist();
        engine
    }

    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    pub fn state(&self) -> &CartState {
        &self.state
    }

    pub fn items(&self) -> &[LineItem] {
        self.state.items()
    }

    /// Current totals, computed fresh.
    pub fn totals(&self) -> CartTotals {
        pricing::calculate(&self.state)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Registers a callback run after every state change, with fresh totals.
    pub fn on_change<F>(&mut self, listener: F)
    where
        F: FnMut(&CartState, &CartTotals) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Applies a quantity typed by the shopper.
    ///
    /// Text that is not a number >= 1 is ignored, as is an unknown id or a
    /// quantity that would overflow the subtotal. Returns whether the cart
    /// changed.
    pub fn update_quantity(&mut self, id: ItemId, raw: &str) -> bool {
        match parse_quantity(raw) {
            Ok(quantity) => self.set_quantity(id, quantity),
            Err(err) => {
                trace!(%id, input = raw, error = %err, "Ignoring quantity input");
                false
            }
        }
    }

    /// Sets an already-validated quantity. Returns whether the cart changed.
    pub fn set_quantity(&mut self, id: ItemId, quantity: Quantity) -> bool {
        if !self.state.set_quantity(id, quantity) {
            return false;
        }
        debug!(%id, %quantity, "Quantity updated");
        self.items_changed();
        true
    }

    /// Removes an item. Returns whether the cart changed.
    pub fn remove_item(&mut self, id: ItemId) -> bool {
        if !self.state.remove_item(id) {
            return false;
        }
        debug!(%id, remaining = self.state.items().len(), "Item removed");
        self.items_changed();
        true
    }

    /// Replaces the discount text. The discount is never persisted.
    pub fn set_discount_input(&mut self, raw: impl Into<String>) {
        self.state.set_discount_input(raw.into());
        self.notify();
    }

    fn items_changed(&mut self) {
        self.persist();
        self.notify();
    }

    fn persist(&mut self) {
        let encoded = match snapshot::encode(self.state.items()) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!(error = %err, "Failed to encode cart snapshot");
                return;
            }
        };

        if let Err(err) = self.store.set(&self.config.storage_key, &encoded) {
            warn!(key = %self.config.storage_key, error = %err, "Failed to write cart snapshot");
        }
    }

    fn notify(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        let totals = pricing::calculate(&self.state);
        for listener in self.listeners.iter_mut() {
            listener(&self.state, &totals);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
