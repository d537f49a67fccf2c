//! # Error Types
//!
//! Domain-specific error types for kart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kart-core errors (this file)                                          │
//! │  ├── CoreError        - General domain errors                          │
//! │  ├── ValidationError  - Raw user input that failed to parse            │
//! │  └── SnapshotError    - Persisted cart that cannot be adopted          │
//! │                                                                         │
//! │  kart-store errors (separate crate)                                    │
//! │  └── StoreError       - Filesystem failures                            │
//! │                                                                         │
//! │  None of these are fatal to a session:                                 │
//! │  • SnapshotError   → fall back to the default catalog                  │
//! │  • ValidationError → ignore the edit (quantity) or show it (discount)  │
//! │  • StoreError      → log and keep the in-memory cart                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, id, input)
//! 3. Errors are enum variants, never String

use thiserror::Error;

use crate::types::ItemId;

// =============================================================================
// Core Error
// =============================================================================

/// Core cart errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Configuration cannot be used to build a cart.
    #[error("Invalid cart configuration: {0}")]
    InvalidConfig(String),

    /// Persisted snapshot could not be adopted.
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Produced at the parse boundary where raw text from the shopper becomes a
/// typed value.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Text does not read as a number at all.
    #[error("{field} must be a number, got '{input}'")]
    NotANumber { field: String, input: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

// =============================================================================
// Snapshot Error
// =============================================================================

/// Reasons a persisted cart snapshot is unusable.
///
/// ## Recovery
/// Every variant is recovered the same way: the engine logs it and starts
/// from the default catalog.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The stored text is not JSON.
    #[error("Snapshot is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The stored JSON is not an array.
    #[error("Snapshot is not a sequence of items")]
    NotASequence,

    /// The stored array has no items.
    #[error("Snapshot contains no items")]
    Empty,

    /// An entry is not shaped like a line item.
    #[error("Snapshot item {index} is not a valid line item: {source}")]
    InvalidItem {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Two entries share an id.
    #[error("Snapshot contains duplicate item id {0}")]
    DuplicateId(ItemId),

    /// An entry has a price below zero.
    #[error("Snapshot item {0} has a negative price")]
    NegativePrice(ItemId),

    /// The cart's subtotal cannot be represented.
    #[error("Snapshot subtotal overflows")]
    SubtotalOverflow,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
