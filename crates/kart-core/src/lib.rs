//! # kart-core: Pure Cart Logic for Kart
//!
//! This crate is the **heart** of Kart. It holds the shopping-cart state
//! engine and the pricing calculator, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Kart Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Front end (CLI / web view)                     │   │
//! │  │     quantity box ──► remove button ──► discount box ──► totals  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kart-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  engine   │  │   cart    │  │  pricing  │  │ snapshot  │  │   │
//! │  │   │CartEngine │  │ CartState │  │CartTotals │  │encode/    │  │   │
//! │  │   │ listeners │  │ Discount  │  │           │  │decode     │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • stores are reached through the KeyValueStore trait   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                kart-store (FileStore) or MemoryStore            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`engine`] - Session cart: load, mutate, persist, notify
//! - [`cart`] - Cart state and the discount field
//! - [`pricing`] - Subtotal, discount and final total
//! - [`snapshot`] - Stored snapshot encode/decode and fallback
//! - [`store`] - Key-value store trait and in-memory backend
//! - [`money`] - Exact decimal Money type
//! - [`types`] - LineItem, ItemId, Quantity, Percentage
//! - [`validation`] - Raw input parse boundary
//! - [`config`] - Storage key and default catalog
//! - [`format`] - INR display formatting
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use kart_core::{CartConfig, CartEngine, ItemId, MemoryStore, Money};
//!
//! let mut engine = CartEngine::load(CartConfig::default(), MemoryStore::new());
//!
//! engine.update_quantity(ItemId::new(1), "3");
//! assert_eq!(engine.totals().subtotal, Money::from_rupees(180));
//!
//! engine.set_discount_input("10");
//! assert_eq!(engine.totals().final_total, Money::from_rupees(162));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod money;
pub mod pricing;
pub mod snapshot;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartState, DiscountField};
pub use config::CartConfig;
pub use engine::CartEngine;
pub use error::{CoreError, CoreResult, SnapshotError, ValidationError};
pub use money::Money;
pub use pricing::CartTotals;
pub use store::{KeyValueStore, MemoryStore};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Store key the snapshot is written under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "cartProducts";

/// Message shown while the discount box holds an unusable value.
pub const DISCOUNT_ERROR_MESSAGE: &str = "Discount must be a valid number between 0 and 100.";

/// Lowest accepted discount, in percent.
pub const MIN_DISCOUNT_PERCENT: i64 = 0;

/// Highest accepted discount, in percent.
pub const MAX_DISCOUNT_PERCENT: i64 = 100;
