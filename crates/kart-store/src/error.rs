//! # Store Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the key / path                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartEngine logs it and carries on with the in-memory cart             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// File store failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The key cannot be mapped to a file name.
    ///
    /// ## When This Occurs
    /// - Empty key
    /// - Key starting with `.`
    /// - Characters outside `A-Z a-z 0-9 . _ -`
    #[error("Invalid store key '{0}'")]
    InvalidKey(String),

    /// Reading or writing a snapshot file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No platform data directory could be determined.
    #[error("Could not determine app data directory")]
    NoDataDir,
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;
