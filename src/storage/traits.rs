//! Store ports consumed by the managers
//!
//! The managers only perform read-then-write checks. A store must make
//! per-item version-name uniqueness and per-version status writes atomic on
//! its side for those checks to be race-free.

use async_trait::async_trait;
use std::sync::Arc;

use super::error::StorageResult;
use super::types::HealthStatus;
use crate::session::SessionContext;
use crate::types::{Item, Revision, Version};

/// Item persistence
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// List every item visible to the caller's tenant
    async fn list(&self, ctx: &SessionContext) -> StorageResult<Vec<Item>>;

    /// Load an item; `None` when it does not exist
    async fn get(&self, ctx: &SessionContext, item_id: &str) -> StorageResult<Option<Item>>;

    /// Store a new item, returning it with its assigned id
    async fn create(&self, ctx: &SessionContext, item: Item) -> StorageResult<Item>;

    /// Replace a stored item
    async fn update(&self, ctx: &SessionContext, item: &Item) -> StorageResult<()>;

    /// Delete an item and everything under it
    async fn delete(&self, ctx: &SessionContext, item_id: &str) -> StorageResult<()>;
}

/// Version persistence with a shared copy and per-user working copies
#[async_trait]
pub trait VersionStore: Send + Sync {
    /// List the shared versions of an item
    async fn list(&self, ctx: &SessionContext, item_id: &str) -> StorageResult<Vec<Version>>;

    /// Create a version in the caller's working copy; must reject a name the
    /// item already uses
    async fn create(
        &self,
        ctx: &SessionContext,
        item_id: &str,
        version: Version,
    ) -> StorageResult<Version>;

    /// Replace the caller's working copy of a version
    async fn update(&self, ctx: &SessionContext, item_id: &str, version: &Version)
        -> StorageResult<()>;

    /// Load the caller's working copy with its synchronization state; `None`
    /// when the caller has no working copy
    async fn get(
        &self,
        ctx: &SessionContext,
        item_id: &str,
        version_id: &str,
    ) -> StorageResult<Option<Version>>;

    /// Delete a version. Stores may leave this unimplemented.
    async fn delete(&self, ctx: &SessionContext, item_id: &str, version_id: &str)
        -> StorageResult<()>;

    /// Push the working copy to the shared copy, recording a revision
    async fn publish(
        &self,
        ctx: &SessionContext,
        item_id: &str,
        version_id: &str,
        message: &str,
    ) -> StorageResult<()>;

    /// Pull shared changes into the working copy, creating it if needed
    async fn sync(&self, ctx: &SessionContext, item_id: &str, version_id: &str)
        -> StorageResult<()>;

    /// Overwrite the working copy with the shared copy, discarding local changes
    async fn force_sync(
        &self,
        ctx: &SessionContext,
        item_id: &str,
        version_id: &str,
    ) -> StorageResult<()>;

    /// Drop the caller's working copy
    async fn clean(&self, ctx: &SessionContext, item_id: &str, version_id: &str)
        -> StorageResult<()>;

    /// Restore the working copy to the content of a past revision
    async fn revert(
        &self,
        ctx: &SessionContext,
        item_id: &str,
        version_id: &str,
        revision_id: &str,
    ) -> StorageResult<()>;

    /// Revisions recorded for a version, in no particular order
    async fn list_revisions(
        &self,
        ctx: &SessionContext,
        item_id: &str,
        version_id: &str,
    ) -> StorageResult<Vec<Revision>>;
}

/// A backend providing both stores
#[async_trait]
pub trait VersioningStorage: Send + Sync {
    /// Get the item store implementation
    fn item_store(&self) -> Arc<dyn ItemStore>;

    /// Get the version store implementation
    fn version_store(&self) -> Arc<dyn VersionStore>;

    /// Check the health of the storage backend
    async fn health_check(&self) -> StorageResult<HealthStatus>;
}
