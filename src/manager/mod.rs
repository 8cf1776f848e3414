//! Business logic over the store ports
//!
//! [`ItemManager`] and [`VersioningManager`] hold no state of their own
//! beyond their injected collaborators. [`Versioning`] wires both over a
//! single storage backend.

pub mod item;
pub mod versioning;

pub use item::ItemManager;
pub use versioning::VersioningManager;

use std::sync::Arc;
use tracing::info;

use crate::calculator::{MajorVersionCalculator, VersionCalculator};
use crate::config::VersioningConfig;
use crate::error::VersioningResult;
use crate::storage::{HealthStatus, StorageFactory, VersioningStorage};

/// Both managers over one storage backend
pub struct Versioning {
    storage: Arc<dyn VersioningStorage>,
    items: ItemManager,
    versions: VersioningManager,
}

impl Versioning {
    pub fn new(storage: Arc<dyn VersioningStorage>, calculator: Arc<dyn VersionCalculator>) -> Self {
        let items = ItemManager::new(storage.item_store());
        let versions =
            VersioningManager::new(storage.version_store(), storage.item_store(), calculator);
        Self {
            storage,
            items,
            versions,
        }
    }

    /// Open the configured backend and seed the calculator from `initial_base`
    pub async fn from_config(config: &VersioningConfig) -> VersioningResult<Self> {
        config.validate()?;
        let storage = StorageFactory::from_config(&config.storage).await?;
        let calculator = MajorVersionCalculator::with_initial_base(&config.initial_base)?;
        info!(
            "Versioning ready on {:?} storage, initial base {}",
            config.storage.backend, config.initial_base
        );
        Ok(Self::new(storage, Arc::new(calculator)))
    }

    pub fn items(&self) -> &ItemManager {
        &self.items
    }

    pub fn versions(&self) -> &VersioningManager {
        &self.versions
    }

    pub async fn health_check(&self) -> VersioningResult<HealthStatus> {
        Ok(self.storage.health_check().await?)
    }
}
