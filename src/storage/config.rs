//! Storage configuration types and utilities

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

use super::error::{StorageError, StorageResult};

pub const ENV_STORAGE_TYPE: &str = "ITEM_VERSIONING_STORAGE_TYPE";
pub const ENV_STORAGE_DIR: &str = "ITEM_VERSIONING_STORAGE_DIR";

/// Storage backend type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendType {
    /// JSON file storage
    File,
    /// Memory storage (default, also used by tests)
    #[default]
    Memory,
}

/// Main storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage backend type
    #[serde(default)]
    pub backend: BackendType,

    /// Backend-specific configuration
    #[serde(default)]
    pub backend_config: BackendConfig,
}

/// Backend-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BackendConfig {
    File(FileConfig),
    Memory(MemoryConfig),
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::Memory(MemoryConfig::default())
    }
}

/// File storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    /// Directory holding the store file
    pub base_dir: PathBuf,

    /// Store file name inside `base_dir`
    #[serde(default = "default_file_name")]
    pub file_name: String,

    /// How long an operation waits for the store file lock
    #[serde(with = "humantime_serde", default = "default_lock_timeout")]
    pub lock_timeout: Duration,
}

impl FileConfig {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            file_name: default_file_name(),
            lock_timeout: default_lock_timeout(),
        }
    }

    pub fn store_path(&self) -> PathBuf {
        self.base_dir.join(&self.file_name)
    }
}

/// Memory storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Store file (as written by the file backend) to preload on start
    #[serde(default)]
    pub seed_path: Option<PathBuf>,
}

fn default_file_name() -> String {
    "versioning-store.json".to_string()
}

fn default_lock_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_base_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("item-versioning"))
        .unwrap_or_else(|| std::env::temp_dir().join("item-versioning"))
}

impl StorageConfig {
    pub fn memory() -> Self {
        Self::default()
    }

    pub fn file(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            backend: BackendType::File,
            backend_config: BackendConfig::File(FileConfig::new(base_dir)),
        }
    }

    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let backend = match lookup(ENV_STORAGE_TYPE) {
            Some(value) => match value.to_lowercase().as_str() {
                "file" => BackendType::File,
                "memory" => BackendType::Memory,
                other => {
                    warn!("Unknown storage type '{}', using the default backend", other);
                    BackendType::default()
                }
            },
            None => BackendType::default(),
        };

        match backend {
            BackendType::File => {
                let base_dir = lookup(ENV_STORAGE_DIR)
                    .map(PathBuf::from)
                    .unwrap_or_else(default_base_dir);
                Self::file(base_dir)
            }
            BackendType::Memory => Self::memory(),
        }
    }

    /// Check that the backend-specific section matches the backend type
    pub fn validate(&self) -> StorageResult<()> {
        match (&self.backend, &self.backend_config) {
            (BackendType::File, BackendConfig::File(file)) => {
                if file.file_name.trim().is_empty() {
                    return Err(StorageError::configuration(
                        "file backend needs a non-empty file_name",
                    ));
                }
                Ok(())
            }
            (BackendType::Memory, BackendConfig::Memory(_)) => Ok(()),
            (backend, _) => Err(StorageError::configuration(format!(
                "backend_config does not match backend type {backend:?}"
            ))),
        }
    }
}
