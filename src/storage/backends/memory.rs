//! In-memory storage backend for testing

use async_trait::async_trait;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::debug;

use crate::session::SessionContext;
use crate::storage::{
    config::{BackendConfig, MemoryConfig, StorageConfig},
    error::{StorageError, StorageResult},
    state::StoreState,
    traits::*,
    types::*,
};
use crate::types::{Item, Revision, Version};

/// In-memory storage backend for testing
///
/// Clones share the same state, so the item and version stores handed out
/// by one backend see each other's writes.
#[derive(Clone)]
pub struct MemoryBackend {
    config: MemoryConfig,
    state: Arc<RwLock<StoreState>>,
}

impl MemoryBackend {
    /// Create a new memory backend, preloading the seed file if one is configured
    pub async fn new(config: &StorageConfig) -> StorageResult<Self> {
        let memory_config = match &config.backend_config {
            BackendConfig::Memory(cfg) => cfg.clone(),
            _ => {
                return Err(StorageError::configuration(
                    "Invalid backend config for memory storage",
                ))
            }
        };

        let state = match &memory_config.seed_path {
            Some(path) => {
                debug!("Seeding memory backend from {}", path.display());
                let content = fs::read_to_string(path).await?;
                serde_json::from_str(&content)?
            }
            None => StoreState::default(),
        };

        Ok(Self {
            config: memory_config,
            state: Arc::new(RwLock::new(state)),
        })
    }

    /// Create an empty memory backend (for testing)
    pub fn empty() -> Self {
        Self::from_state(StoreState::default())
    }

    /// Create a memory backend over an existing snapshot
    pub fn from_state(state: StoreState) -> Self {
        Self {
            config: MemoryConfig::default(),
            state: Arc::new(RwLock::new(state)),
        }
    }

    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> StoreState {
        self.state.read().await.clone()
    }
}

#[async_trait]
impl VersioningStorage for MemoryBackend {
    fn item_store(&self) -> Arc<dyn ItemStore> {
        Arc::new(self.clone())
    }

    fn version_store(&self) -> Arc<dyn VersionStore> {
        Arc::new(self.clone())
    }

    async fn health_check(&self) -> StorageResult<HealthStatus> {
        Ok(HealthStatus {
            healthy: true,
            backend_type: "memory".to_string(),
            connection_status: ConnectionStatus::Connected,
            latency_ms: 0,
            errors: vec![],
        })
    }
}

#[async_trait]
impl ItemStore for MemoryBackend {
    async fn list(&self, ctx: &SessionContext) -> StorageResult<Vec<Item>> {
        Ok(self.state.read().await.list_items(ctx))
    }

    async fn get(&self, ctx: &SessionContext, item_id: &str) -> StorageResult<Option<Item>> {
        Ok(self.state.read().await.get_item(ctx, item_id))
    }

    async fn create(&self, ctx: &SessionContext, item: Item) -> StorageResult<Item> {
        Ok(self.state.write().await.create_item(ctx, item))
    }

    async fn update(&self, ctx: &SessionContext, item: &Item) -> StorageResult<()> {
        self.state.write().await.update_item(ctx, item)
    }

    async fn delete(&self, ctx: &SessionContext, item_id: &str) -> StorageResult<()> {
        self.state.write().await.delete_item(ctx, item_id)
    }
}

#[async_trait]
impl VersionStore for MemoryBackend {
    async fn list(&self, ctx: &SessionContext, item_id: &str) -> StorageResult<Vec<Version>> {
        Ok(self.state.read().await.list_versions(ctx, item_id))
    }

    async fn create(
        &self,
        ctx: &SessionContext,
        item_id: &str,
        version: Version,
    ) -> StorageResult<Version> {
        self.state.write().await.create_version(ctx, item_id, version)
    }

    async fn update(
        &self,
        ctx: &SessionContext,
        item_id: &str,
        version: &Version,
    ) -> StorageResult<()> {
        self.state.write().await.update_version(ctx, item_id, version)
    }

    async fn get(
        &self,
        ctx: &SessionContext,
        item_id: &str,
        version_id: &str,
    ) -> StorageResult<Option<Version>> {
        Ok(self.state.read().await.get_version(ctx, item_id, version_id))
    }

    async fn delete(
        &self,
        _ctx: &SessionContext,
        _item_id: &str,
        _version_id: &str,
    ) -> StorageResult<()> {
        Err(StorageError::unsupported("memory backend does not delete versions"))
    }

    async fn publish(
        &self,
        ctx: &SessionContext,
        item_id: &str,
        version_id: &str,
        message: &str,
    ) -> StorageResult<()> {
        self.state
            .write()
            .await
            .publish(ctx, item_id, version_id, message)
    }

    async fn sync(
        &self,
        ctx: &SessionContext,
        item_id: &str,
        version_id: &str,
    ) -> StorageResult<()> {
        self.state.write().await.sync(ctx, item_id, version_id)
    }

    async fn force_sync(
        &self,
        ctx: &SessionContext,
        item_id: &str,
        version_id: &str,
    ) -> StorageResult<()> {
        self.state.write().await.force_sync(ctx, item_id, version_id)
    }

    async fn clean(
        &self,
        ctx: &SessionContext,
        item_id: &str,
        version_id: &str,
    ) -> StorageResult<()> {
        self.state.write().await.clean(ctx, item_id, version_id)
    }

    async fn revert(
        &self,
        ctx: &SessionContext,
        item_id: &str,
        version_id: &str,
        revision_id: &str,
    ) -> StorageResult<()> {
        self.state
            .write()
            .await
            .revert(ctx, item_id, version_id, revision_id)
    }

    async fn list_revisions(
        &self,
        ctx: &SessionContext,
        item_id: &str,
        version_id: &str,
    ) -> StorageResult<Vec<Revision>> {
        Ok(self
            .state
            .read()
            .await
            .list_revisions(ctx, item_id, version_id))
    }
}
