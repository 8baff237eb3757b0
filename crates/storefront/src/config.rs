//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `GLOWBEAUTY_STATE_PATH` - Cart/favorites snapshot file (default: glowbeauty-storage.json)
//! - `GLOWBEAUTY_CATALOG_PATH` - Alternate catalog document (default: the built-in catalog)

use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::{Catalog, CatalogError};
use crate::store::JsonSnapshotStore;

/// Default snapshot file name, the store's fixed durable-storage key.
const DEFAULT_STATE_PATH: &str = "glowbeauty-storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable is set but unusable.
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Where the cart/favorites snapshot lives.
    pub state_path: PathBuf,
    /// Catalog document to load instead of the built-in one.
    pub catalog_path: Option<PathBuf>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a variable is set to an unusable
    /// value (currently: set but empty).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let state_path = get_optional_path("GLOWBEAUTY_STATE_PATH")?
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_PATH));
        let catalog_path = get_optional_path("GLOWBEAUTY_CATALOG_PATH")?;

        Ok(Self {
            state_path,
            catalog_path,
        })
    }

    /// The snapshot backend this configuration points at.
    #[must_use]
    pub fn snapshot_store(&self) -> JsonSnapshotStore {
        JsonSnapshotStore::new(&self.state_path)
    }

    /// Load the configured catalog: the file at `catalog_path` if set,
    /// otherwise the catalog built into this crate.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the catalog document cannot be
    /// loaded.
    pub fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        match &self.catalog_path {
            Some(path) => Catalog::from_path(path),
            None => Catalog::builtin(),
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            state_path: PathBuf::from(DEFAULT_STATE_PATH),
            catalog_path: None,
        }
    }
}

/// Get an optional environment variable as a path.
///
/// A variable that is set but empty is a configuration mistake, not an
/// absent value.
fn get_optional_path(key: &str) -> Result<Option<PathBuf>, ConfigError> {
    match std::env::var(key) {
        Ok(value) if value.trim().is_empty() => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "value is empty".to_string(),
        )),
        Ok(value) => Ok(Some(PathBuf::from(value))),
        Err(_) => Ok(None),
    }
}
