//! Crate configuration
//!
//! Sources, lowest precedence first: built-in defaults, a TOML file, then
//! `ITEM_VERSIONING_*` environment variables.
//!
//! ```toml
//! initial_base = "0.0"
//!
//! [storage]
//! backend = "file"
//!
//! [storage.backend_config]
//! base_dir = "/var/lib/item-versioning"
//! lock_timeout = "5s"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::calculator::{VersionName, DEFAULT_INITIAL_BASE};
use crate::error::{VersioningError, VersioningResult};
use crate::storage::config::{BackendConfig, BackendType, ENV_STORAGE_DIR, ENV_STORAGE_TYPE};
use crate::storage::StorageConfig;

pub const ENV_INITIAL_BASE: &str = "ITEM_VERSIONING_INITIAL_BASE";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersioningConfig {
    /// Base name that base-less versions are derived from
    #[serde(default = "default_initial_base")]
    pub initial_base: String,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl Default for VersioningConfig {
    fn default() -> Self {
        Self {
            initial_base: default_initial_base(),
            storage: StorageConfig::default(),
        }
    }
}

fn default_initial_base() -> String {
    DEFAULT_INITIAL_BASE.to_string()
}

impl VersioningConfig {
    pub fn from_toml_str(content: &str) -> VersioningResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file and apply environment overrides on top
    pub async fn load(path: &Path) -> VersioningResult<Self> {
        debug!("Loading configuration from {}", path.display());
        let content = fs::read_to_string(path).await.map_err(|e| {
            VersioningError::config(format!("failed to read {}: {e}", path.display()))
        })?;
        let mut config: Self = toml::from_str(&content)?;
        config.merge_env_vars();
        config.validate()?;
        Ok(config)
    }

    /// Defaults with environment overrides
    pub fn from_env() -> VersioningResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> VersioningResult<Self> {
        let mut config = Self::default();
        config.merge_lookup(lookup);
        config.validate()?;
        Ok(config)
    }

    pub fn merge_env_vars(&mut self) {
        self.merge_lookup(|key| std::env::var(key).ok());
    }

    fn merge_lookup(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(base) = lookup(ENV_INITIAL_BASE) {
            self.initial_base = base;
        }
        // A named backend replaces the storage section only when it differs
        // from the configured one
        if lookup(ENV_STORAGE_TYPE).is_some() {
            let named = StorageConfig::from_lookup(&lookup);
            let config_matches = matches!(
                (&named.backend, &self.storage.backend_config),
                (BackendType::File, BackendConfig::File(_))
                    | (BackendType::Memory, BackendConfig::Memory(_))
            );
            if named.backend != self.storage.backend || !config_matches {
                self.storage = named;
            }
        }
        if let Some(dir) = lookup(ENV_STORAGE_DIR) {
            match &mut self.storage.backend_config {
                BackendConfig::File(file) => file.base_dir = PathBuf::from(dir),
                BackendConfig::Memory(_) => {
                    debug!("Ignoring {} for the memory backend", ENV_STORAGE_DIR)
                }
            }
        }
    }

    pub fn validate(&self) -> VersioningResult<()> {
        self.initial_base.parse::<VersionName>().map_err(|_| {
            VersioningError::config(format!(
                "initial_base '{}' must be in the format {{integer}}.{{integer}}",
                self.initial_base
            ))
        })?;
        self.storage
            .validate()
            .map_err(|e| VersioningError::config(e.to_string()))
    }
}
