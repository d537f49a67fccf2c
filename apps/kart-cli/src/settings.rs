//! # CLI Settings
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--data-dir`)
//! 2. Environment variables (`KART_*`)
//! 3. Config file (`--config`, else `<config dir>/kart.toml` if present)
//! 4. Defaults
//!
//! ## Configuration File Format
//! ```toml
//! data_dir = "/var/lib/kart"
//!
//! [cart]
//! storage_key = "cartProducts"
//!
//! [[cart.default_catalog]]
//! id = 1
//! name = "Product A"
//! price = 50
//! quantity = 1
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use directories::ProjectDirs;
use kart_core::CartConfig;
use serde::Deserialize;
use tracing::debug;

/// Overrides the snapshot key.
pub const ENV_STORAGE_KEY: &str = "KART_STORAGE_KEY";

/// Overrides the snapshot directory.
pub const ENV_DATA_DIR: &str = "KART_DATA_DIR";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where snapshot files live. `None` means the platform data directory.
    pub data_dir: Option<PathBuf>,

    pub cart: CartConfig,
}

impl Settings {
    /// Loads settings from file and environment, then validates them.
    pub fn load(explicit_path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match explicit_path {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path().filter(|path| path.exists()),
        };

        let mut settings = match path {
            Some(path) => Self::from_file(&path)?,
            None => Settings::default(),
        };

        settings.apply_env(|name| std::env::var(name).ok());
        settings.cart.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        debug!(path = %path.display(), "Loaded config file");
        Self::from_toml_str(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Applies `KART_*` overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_STORAGE_KEY) {
            self.cart.storage_key = key;
        }

        if let Some(dir) = lookup(ENV_DATA_DIR) {
            self.data_dir = Some(PathBuf::from(dir));
        }
    }

    /// The configured data directory, or the platform default.
    pub fn resolve_data_dir(&self) -> anyhow::Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(kart_store::default_data_dir()?),
        }
    }
}

/// `<platform config dir>/kart.toml`
///
/// - **macOS**: `~/Library/Application Support/com.kart.cart/kart.toml`
/// - **Windows**: `%APPDATA%\kart\cart\config\kart.toml`
/// - **Linux**: `~/.config/cart/kart.toml`
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "kart", "cart").map(|dirs| dirs.config_dir().join("kart.toml"))
}
