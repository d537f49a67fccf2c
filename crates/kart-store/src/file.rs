//! # File Store
//!
//! A [`KeyValueStore`] that keeps each key in its own JSON file.
//!
//! ## Layout
//! ```text
//! <root>/
//! ├── cartProducts.json   ◄── store.get("cartProducts")
//! └── kiosk-cart.json     ◄── store.get("kiosk-cart")
//! ```
//!
//! ## Platform-Specific Root
//! - **macOS**: `~/Library/Application Support/com.kart.cart/`
//! - **Windows**: `%APPDATA%\kart\cart\data\`
//! - **Linux**: `~/.local/share/cart/`
//!
//! Writes replace the whole file. There is no locking; two processes writing
//! the same key race and the last one wins.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use kart_core::KeyValueStore;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};

const FILE_EXTENSION: &str = "json";

/// Directory-backed key-value store.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|err| StoreError::io(&root, err))?;
        info!(root = %root.display(), "Opened file store");
        Ok(FileStore { root })
    }

    /// Opens a store in the platform data directory.
    pub fn open_default() -> StoreResult<Self> {
        Self::open(default_data_dir()?)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File that backs `key`.
    pub fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.{}", key, FILE_EXTENSION)))
    }
}

impl KeyValueStore for FileStore {
    type Error = StoreError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => {
                debug!(path = %path.display(), bytes = contents.len(), "Read snapshot");
                Ok(Some(contents))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::io(path, err)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        let path = self.path_for(key)?;
        fs::write(&path, value).map_err(|err| StoreError::io(&path, err))?;
        debug!(path = %path.display(), bytes = value.len(), "Wrote snapshot");
        Ok(())
    }
}

/// Platform data directory for Kart.
pub fn default_data_dir() -> StoreResult<PathBuf> {
    ProjectDirs::from("com", "kart", "cart")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(StoreError::NoDataDir)
}

/// Keys become file names, so they are limited to a safe alphabet.
fn validate_key(key: &str) -> StoreResult<()> {
    let safe = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));

    if safe {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
