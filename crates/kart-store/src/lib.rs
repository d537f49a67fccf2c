//! # kart-store: Snapshot Persistence for Kart
//!
//! Filesystem backends for [`kart_core::KeyValueStore`].
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kart Data Flow                                   │
//! │                                                                         │
//! │  CartEngine (kart-core)                                                 │
//! │       │  get(key) once at load, set(key, json) after each item change   │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    kart-store (THIS CRATE)                      │   │
//! │  │   FileStore: <data dir>/<key>.json                              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use kart_core::{CartConfig, CartEngine};
//! use kart_store::FileStore;
//!
//! let store = FileStore::open_default()?;
//! let engine = CartEngine::load(CartConfig::default(), store);
//! # Ok::<(), kart_store::StoreError>(())
//! ```

pub mod error;
pub mod file;

pub use error::{StoreError, StoreResult};
pub use file::{default_data_dir, FileStore};
