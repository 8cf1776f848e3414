//! File-based storage backend implementation
//!
//! The whole store lives in one JSON document. Every operation loads it under
//! the backend lock, and mutations write it back through a temporary file and
//! a rename. The lock is process-local: two processes must not share a
//! store file.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

use crate::session::SessionContext;
use crate::storage::{
    config::{BackendConfig, FileConfig, StorageConfig},
    error::{StorageError, StorageResult},
    state::StoreState,
    traits::*,
    types::*,
};
use crate::types::{Item, Revision, Version};

/// File-based storage backend
#[derive(Clone)]
pub struct FileBackend {
    config: FileConfig,
    store_path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl FileBackend {
    /// Create a new file backend
    pub async fn new(config: &StorageConfig) -> StorageResult<Self> {
        let file_config = match &config.backend_config {
            BackendConfig::File(cfg) => cfg.clone(),
            _ => {
                return Err(StorageError::configuration(
                    "Invalid backend config for file storage",
                ))
            }
        };
        Self::from_file_config(file_config).await
    }

    /// Create a new file backend directly from FileConfig
    pub async fn from_file_config(config: FileConfig) -> StorageResult<Self> {
        // Ensure base directory exists
        fs::create_dir_all(&config.base_dir).await?;

        let store_path = config.store_path();
        debug!("File backend using {}", store_path.display());
        Ok(Self {
            config,
            store_path,
            lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    async fn acquire(&self) -> StorageResult<MutexGuard<'_, ()>> {
        tokio::time::timeout(self.config.lock_timeout, self.lock.lock())
            .await
            .map_err(|_| {
                warn!(
                    "Timed out after {:?} waiting for {}",
                    self.config.lock_timeout,
                    self.store_path.display()
                );
                StorageError::unavailable(format!(
                    "store file {} is locked",
                    self.store_path.display()
                ))
            })
    }

    /// Read JSON file; a missing file is an empty store
    async fn load(&self) -> StorageResult<StoreState> {
        match fs::read_to_string(&self.store_path).await {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StoreState::default()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    /// Write JSON file
    async fn save(&self, state: &StoreState) -> StorageResult<()> {
        let content = serde_json::to_string_pretty(state)?;
        let tmp_path = self.store_path.with_extension("json.tmp");
        fs::write(&tmp_path, content).await?;
        fs::rename(&tmp_path, &self.store_path).await?;
        Ok(())
    }

    async fn read<T>(&self, f: impl FnOnce(&StoreState) -> T) -> StorageResult<T> {
        let _guard = self.acquire().await?;
        let state = self.load().await?;
        Ok(f(&state))
    }

    /// Apply `f` and persist the result; nothing is written when `f` fails
    async fn mutate<T>(
        &self,
        f: impl FnOnce(&mut StoreState) -> StorageResult<T>,
    ) -> StorageResult<T> {
        let _guard = self.acquire().await?;
        let mut state = self.load().await?;
        let value = f(&mut state)?;
        self.save(&state).await?;
        Ok(value)
    }
}

#[async_trait]
impl VersioningStorage for FileBackend {
    fn item_store(&self) -> Arc<dyn ItemStore> {
        Arc::new(self.clone())
    }

    fn version_store(&self) -> Arc<dyn VersionStore> {
        Arc::new(self.clone())
    }

    async fn health_check(&self) -> StorageResult<HealthStatus> {
        let start = std::time::Instant::now();

        // Try to write a test file
        let test_file = self.config.base_dir.join(".health_check");
        let result = fs::write(&test_file, "health_check").await;
        let _ = fs::remove_file(&test_file).await;

        let mut errors = Vec::new();
        if let Err(e) = result {
            errors.push(e.to_string());
        }
        if let Err(e) = self.read(|_| ()).await {
            errors.push(e.to_string());
        }

        let latency_ms = start.elapsed().as_millis() as u64;
        let connection_status = if errors.is_empty() {
            ConnectionStatus::Connected
        } else {
            ConnectionStatus::Disconnected
        };

        Ok(HealthStatus {
            healthy: errors.is_empty(),
            backend_type: "file".to_string(),
            connection_status,
            latency_ms,
            errors,
        })
    }
}

#[async_trait]
impl ItemStore for FileBackend {
    async fn list(&self, ctx: &SessionContext) -> StorageResult<Vec<Item>> {
        self.read(|state| state.list_items(ctx)).await
    }

    async fn get(&self, ctx: &SessionContext, item_id: &str) -> StorageResult<Option<Item>> {
        self.read(|state| state.get_item(ctx, item_id)).await
    }

    async fn create(&self, ctx: &SessionContext, item: Item) -> StorageResult<Item> {
        self.mutate(|state| Ok(state.create_item(ctx, item))).await
    }

    async fn update(&self, ctx: &SessionContext, item: &Item) -> StorageResult<()> {
        self.mutate(|state| state.update_item(ctx, item)).await
    }

    async fn delete(&self, ctx: &SessionContext, item_id: &str) -> StorageResult<()> {
        self.mutate(|state| state.delete_item(ctx, item_id)).await
    }
}

#[async_trait]
impl VersionStore for FileBackend {
    async fn list(&self, ctx: &SessionContext, item_id: &str) -> StorageResult<Vec<Version>> {
        self.read(|state| state.list_versions(ctx, item_id)).await
    }

    async fn create(
        &self,
        ctx: &SessionContext,
        item_id: &str,
        version: Version,
    ) -> StorageResult<Version> {
        self.mutate(|state| state.create_version(ctx, item_id, version))
            .await
    }

    async fn update(
        &self,
        ctx: &SessionContext,
        item_id: &str,
        version: &Version,
    ) -> StorageResult<()> {
        self.mutate(|state| state.update_version(ctx, item_id, version))
            .await
    }

    async fn get(
        &self,
        ctx: &SessionContext,
        item_id: &str,
        version_id: &str,
    ) -> StorageResult<Option<Version>> {
        self.read(|state| state.get_version(ctx, item_id, version_id))
            .await
    }

    async fn delete(
        &self,
        _ctx: &SessionContext,
        _item_id: &str,
        _version_id: &str,
    ) -> StorageResult<()> {
        Err(StorageError::unsupported("file backend does not delete versions"))
    }

    async fn publish(
        &self,
        ctx: &SessionContext,
        item_id: &str,
        version_id: &str,
        message: &str,
    ) -> StorageResult<()> {
        self.mutate(|state| state.publish(ctx, item_id, version_id, message))
            .await
    }

    async fn sync(
        &self,
        ctx: &SessionContext,
        item_id: &str,
        version_id: &str,
    ) -> StorageResult<()> {
        self.mutate(|state| state.sync(ctx, item_id, version_id))
            .await
    }

    async fn force_sync(
        &self,
        ctx: &SessionContext,
        item_id: &str,
        version_id: &str,
    ) -> StorageResult<()> {
        self.mutate(|state| state.force_sync(ctx, item_id, version_id))
            .await
    }

    async fn clean(
        &self,
        ctx: &SessionContext,
        item_id: &str,
        version_id: &str,
    ) -> StorageResult<()> {
        self.mutate(|state| state.clean(ctx, item_id, version_id))
            .await
    }

    async fn revert(
        &self,
        ctx: &SessionContext,
        item_id: &str,
        version_id: &str,
        revision_id: &str,
    ) -> StorageResult<()> {
        self.mutate(|state| state.revert(ctx, item_id, version_id, revision_id))
            .await
    }

    async fn list_revisions(
        &self,
        ctx: &SessionContext,
        item_id: &str,
        version_id: &str,
    ) -> StorageResult<Vec<Revision>> {
        self.read(|state| state.list_revisions(ctx, item_id, version_id))
            .await
    }
}
