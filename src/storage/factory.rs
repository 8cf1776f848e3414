//! Storage factory for creating storage instances

use std::sync::Arc;
use tracing::info;

use super::backends::{FileBackend, MemoryBackend};
use super::config::{BackendType, StorageConfig};
use super::error::StorageResult;
use super::traits::VersioningStorage;

/// Factory for creating storage instances
pub struct StorageFactory;

impl StorageFactory {
    /// Create storage from environment configuration
    pub async fn from_env() -> StorageResult<Arc<dyn VersioningStorage>> {
        Self::from_config(&StorageConfig::from_env()).await
    }

    /// Create storage from explicit configuration
    pub async fn from_config(config: &StorageConfig) -> StorageResult<Arc<dyn VersioningStorage>> {
        config.validate()?;
        info!("Opening {:?} storage backend", config.backend);
        match &config.backend {
            BackendType::File => {
                let backend = FileBackend::new(config).await?;
                Ok(Arc::new(backend))
            }
            BackendType::Memory => {
                let backend = MemoryBackend::new(config).await?;
                Ok(Arc::new(backend))
            }
        }
    }

    /// Create a test storage instance (memory backend)
    pub fn create_test_storage() -> Arc<dyn VersioningStorage> {
        Arc::new(MemoryBackend::empty())
    }
}
