//! Version lifecycle: naming, Draft to Certified transitions and the
//! reconcile-on-read policy over a [`VersionStore`]
//!
//! The manager never retries store calls. When a store reports success for a
//! sync but the version is still missing, that is surfaced as
//! [`VersioningError::InternalConsistency`].

use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::calculator::VersionCalculator;
use crate::error::{VersioningError, VersioningResult};
use crate::session::SessionContext;
use crate::storage::{ItemStore, VersionStore};
use crate::types::revision::sort_latest_first;
use crate::types::{Item, Revision, Version, VersionCreationMethod, VersionStatus};

pub struct VersioningManager {
    version_store: Arc<dyn VersionStore>,
    item_store: Arc<dyn ItemStore>,
    calculator: Arc<dyn VersionCalculator>,
}

impl VersioningManager {
    pub fn new(
        version_store: Arc<dyn VersionStore>,
        item_store: Arc<dyn ItemStore>,
        calculator: Arc<dyn VersionCalculator>,
    ) -> Self {
        Self {
            version_store,
            item_store,
            calculator,
        }
    }

    /// Shared versions of an item, each annotated with its available creation methods
    pub async fn list(&self, ctx: &SessionContext, item_id: &str) -> VersioningResult<Vec<Version>> {
        let mut versions = self.version_store.list(ctx, item_id).await?;
        let names: HashSet<String> = versions.iter().map(|v| v.name.clone()).collect();
        for version in &mut versions {
            self.calculator.inject_additional_info(version, &names)?;
        }
        debug!("Listed {} versions of item {}", versions.len(), item_id);
        Ok(versions)
    }

    /// Load a version, reconciling it with the shared copy first when needed
    ///
    /// A certified version that is out of sync is force-synced before it is
    /// returned. A version the caller has no copy of is synced once.
    pub async fn get(
        &self,
        ctx: &SessionContext,
        item_id: &str,
        version_id: &str,
    ) -> VersioningResult<Version> {
        match self.version_store.get(ctx, item_id, version_id).await? {
            Some(version) => {
                let out_of_sync = version.state().is_some_and(|s| s.is_out_of_sync());
                if version.is_certified() && out_of_sync {
                    debug!("Force syncing certified version {} of item {}", version_id, item_id);
                    self.version_store.force_sync(ctx, item_id, version_id).await?;
                    return self.refetch(ctx, item_id, version_id, "force sync").await;
                }
                Ok(version)
            }
            None => {
                debug!("Syncing unseen version {} of item {}", version_id, item_id);
                self.version_store.sync(ctx, item_id, version_id).await?;
                self.refetch(ctx, item_id, version_id, "sync").await
            }
        }
    }

    async fn refetch(
        &self,
        ctx: &SessionContext,
        item_id: &str,
        version_id: &str,
        after: &str,
    ) -> VersioningResult<Version> {
        self.version_store
            .get(ctx, item_id, version_id)
            .await?
            .ok_or_else(|| {
                warn!(
                    "Version {} of item {} is missing after a successful {}",
                    version_id, item_id, after
                );
                VersioningError::internal_consistency(format!(
                    "version {version_id} of item {item_id} is missing after {after}"
                ))
            })
    }

    /// Create the next version of an item
    ///
    /// The name is derived from `base_version_id` (which must be certified)
    /// or from the calculator's seed when there is no base. Only the
    /// description and properties of `version` are used.
    pub async fn create(
        &self,
        ctx: &SessionContext,
        item_id: &str,
        base_version_id: Option<&str>,
        version: &Version,
        method: VersionCreationMethod,
    ) -> VersioningResult<Version> {
        let base = match base_version_id {
            Some(base_id) => {
                let base = self.get(ctx, item_id, base_id).await?;
                if !base.is_certified() {
                    return Err(VersioningError::validation(format!(
                        "base version {} must be {} to create a new version from it",
                        base.name,
                        VersionStatus::Certified
                    )));
                }
                Some(base)
            }
            None => None,
        };

        let name = self
            .calculator
            .calculate(base.as_ref().map(|b| b.name.as_str()), method)?;

        let existing = self.version_store.list(ctx, item_id).await?;
        if existing.iter().any(|v| v.name == name) {
            return Err(VersioningError::validation(format!(
                "item {item_id} already has a version named {name}"
            )));
        }

        let mut new_version = Version::default();
        new_version.populate_external_fields(version);
        new_version.base_id = base.map(|b| b.id);
        new_version.name = name;
        new_version.status = VersionStatus::Draft;

        let created = self.version_store.create(ctx, item_id, new_version).await?;
        self.update_item_counters(ctx, item_id, |item| {
            item.add_version_status(VersionStatus::Draft);
        })
        .await?;
        self.version_store
            .publish(
                ctx,
                item_id,
                &created.id,
                &format!("Create version: {}", created.name),
            )
            .await?;

        info!("Created version {} ({}) of item {}", created.name, created.id, item_id);
        self.refetch(ctx, item_id, &created.id, "create").await
    }

    /// Overlay description and properties; name and status are left as they are
    pub async fn update(
        &self,
        ctx: &SessionContext,
        item_id: &str,
        version_id: &str,
        version: &Version,
    ) -> VersioningResult<Version> {
        let mut stored = self.get(ctx, item_id, version_id).await?;
        stored.populate_external_fields(version);
        self.version_store.update(ctx, item_id, &stored).await?;
        info!("Updated version {} of item {}", version_id, item_id);
        self.refetch(ctx, item_id, version_id, "update").await
    }

    /// Move a version forward in its lifecycle and publish the change with `message`
    ///
    /// The working copy is written before the publish. If the publish fails
    /// (for example because the copy is out of sync) the copy stays dirty with
    /// the new status and the item counters are left untouched; `force_sync`
    /// or `clean` discards the change before retrying.
    pub async fn update_status(
        &self,
        ctx: &SessionContext,
        item_id: &str,
        version_id: &str,
        status: VersionStatus,
        message: &str,
    ) -> VersioningResult<()> {
        let mut version = self.get(ctx, item_id, version_id).await?;
        if version.status == status {
            return Err(VersioningError::validation(format!(
                "version {} is already in status {}",
                version.name, status
            )));
        }
        if !version.status.can_transition_to(status) {
            return Err(VersioningError::validation(format!(
                "version {} cannot move from {} back to {}",
                version.name, version.status, status
            )));
        }

        let previous = version.status;
        version.status = status;
        self.version_store.update(ctx, item_id, &version).await?;
        self.version_store
            .publish(ctx, item_id, version_id, message)
            .await?;

        self.update_item_counters(ctx, item_id, |item| {
            item.add_version_status(status);
            item.remove_version_status(previous);
        })
        .await?;

        info!(
            "Version {} of item {} status {} -> {}",
            version.name, item_id, previous, status
        );
        Ok(())
    }

    async fn update_item_counters(
        &self,
        ctx: &SessionContext,
        item_id: &str,
        apply: impl FnOnce(&mut Item) + Send,
    ) -> VersioningResult<()> {
        let mut item = self
            .item_store
            .get(ctx, item_id)
            .await?
            .ok_or_else(|| VersioningError::not_found(format!("item {item_id}")))?;
        apply(&mut item);
        self.item_store.update(ctx, &item).await?;
        Ok(())
    }

    pub async fn publish(
        &self,
        ctx: &SessionContext,
        item_id: &str,
        version_id: &str,
        message: &str,
    ) -> VersioningResult<()> {
        self.version_store
            .publish(ctx, item_id, version_id, message)
            .await?;
        info!("Published version {} of item {}", version_id, item_id);
        Ok(())
    }

    pub async fn sync(
        &self,
        ctx: &SessionContext,
        item_id: &str,
        version_id: &str,
    ) -> VersioningResult<()> {
        debug!("Syncing version {} of item {}", version_id, item_id);
        Ok(self.version_store.sync(ctx, item_id, version_id).await?)
    }

    pub async fn force_sync(
        &self,
        ctx: &SessionContext,
        item_id: &str,
        version_id: &str,
    ) -> VersioningResult<()> {
        debug!("Force syncing version {} of item {}", version_id, item_id);
        Ok(self
            .version_store
            .force_sync(ctx, item_id, version_id)
            .await?)
    }

    pub async fn clean(
        &self,
        ctx: &SessionContext,
        item_id: &str,
        version_id: &str,
    ) -> VersioningResult<()> {
        Ok(self.version_store.clean(ctx, item_id, version_id).await?)
    }

    pub async fn revert(
        &self,
        ctx: &SessionContext,
        item_id: &str,
        version_id: &str,
        revision_id: &str,
    ) -> VersioningResult<()> {
        self.version_store
            .revert(ctx, item_id, version_id, revision_id)
            .await?;
        info!(
            "Reverted version {} of item {} to revision {}",
            version_id, item_id, revision_id
        );
        Ok(())
    }

    /// Revisions of a version, latest first
    pub async fn list_revisions(
        &self,
        ctx: &SessionContext,
        item_id: &str,
        version_id: &str,
    ) -> VersioningResult<Vec<Revision>> {
        let mut revisions = self
            .version_store
            .list_revisions(ctx, item_id, version_id)
            .await?;
        sort_latest_first(&mut revisions);
        Ok(revisions)
    }

    /// Versions are kept for audit and are never deleted
    pub async fn delete(
        &self,
        _ctx: &SessionContext,
        item_id: &str,
        version_id: &str,
    ) -> VersioningResult<()> {
        Err(VersioningError::unsupported(format!(
            "deleting version {version_id} of item {item_id}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{MajorVersionCalculator, OPTIONAL_CREATION_METHODS};
    use crate::error::ErrorKind;
    use crate::storage::{MemoryBackend, StorageError, StorageResult, VersioningStorage};
    use crate::types::{SynchronizationState, VersionState};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use tokio::sync::Mutex;

    /// Scripted version store that records every call
    struct MockVersionStore {
        /// Responses for successive `get` calls; `None` once exhausted
        get_responses: Arc<Mutex<Vec<Option<Version>>>>,
        revisions: Vec<Revision>,
        called: Arc<Mutex<Vec<String>>>,
    }

    impl MockVersionStore {
        fn new() -> Self {
            Self {
                get_responses: Arc::new(Mutex::new(Vec::new())),
                revisions: Vec::new(),
                called: Arc::new(Mutex::new(Vec::new())),
            }
        }

        async fn add_get_response(&self, response: Option<Version>) {
            self.get_responses.lock().await.push(response);
        }

        async fn get_called(&self) -> Vec<String> {
            self.called.lock().await.clone()
        }

        async fn record(&self, call: &str) {
            self.called.lock().await.push(call.to_string());
        }
    }

    #[async_trait]
    impl VersionStore for MockVersionStore {
        async fn list(&self, _ctx: &SessionContext, _item_id: &str) -> StorageResult<Vec<Version>> {
            self.record("list").await;
            Ok(Vec::new())
        }

        async fn create(
            &self,
            _ctx: &SessionContext,
            _item_id: &str,
            version: Version,
        ) -> StorageResult<Version> {
            self.record("create").await;
            Ok(version)
        }

        async fn update(
            &self,
            _ctx: &SessionContext,
            _item_id: &str,
            _version: &Version,
        ) -> StorageResult<()> {
            self.record("update").await;
            Ok(())
        }

        async fn get(
            &self,
            _ctx: &SessionContext,
            _item_id: &str,
            _version_id: &str,
        ) -> StorageResult<Option<Version>> {
            self.record("get").await;
            let mut responses = self.get_responses.lock().await;
            if responses.is_empty() {
                return Ok(None);
            }
            Ok(responses.remove(0))
        }

        async fn delete(&self, _ctx: &SessionContext, _item_id: &str, _version_id: &str) -> StorageResult<()> {
            self.record("delete").await;
            Ok(())
        }

        async fn publish(
            &self,
            _ctx: &SessionContext,
            _item_id: &str,
            _version_id: &str,
            _message: &str,
        ) -> StorageResult<()> {
            self.record("publish").await;
            Ok(())
        }

        async fn sync(&self, _ctx: &SessionContext, _item_id: &str, _version_id: &str) -> StorageResult<()> {
            self.record("sync").await;
            Ok(())
        }

        async fn force_sync(
            &self,
            _ctx: &SessionContext,
            _item_id: &str,
            _version_id: &str,
        ) -> StorageResult<()> {
            self.record("force_sync").await;
            Ok(())
        }

        async fn clean(&self, _ctx: &SessionContext, _item_id: &str, _version_id: &str) -> StorageResult<()> {
            self.record("clean").await;
            Ok(())
        }

        async fn revert(
            &self,
            _ctx: &SessionContext,
            _item_id: &str,
            _version_id: &str,
            _revision_id: &str,
        ) -> StorageResult<()> {
            self.record("revert").await;
            Ok(())
        }

        async fn list_revisions(
            &self,
            _ctx: &SessionContext,
            _item_id: &str,
            _version_id: &str,
        ) -> StorageResult<Vec<Revision>> {
            self.record("list_revisions").await;
            Ok(self.revisions.clone())
        }
    }

    fn ctx() -> SessionContext {
        SessionContext::new("cs0008", "dox").unwrap()
    }

    fn mocked(store: Arc<MockVersionStore>) -> VersioningManager {
        VersioningManager::new(
            store,
            MemoryBackend::empty().item_store(),
            Arc::new(MajorVersionCalculator::new()),
        )
    }

    fn stored_version(status: VersionStatus, sync: SynchronizationState) -> Version {
        Version {
            id: "v1".into(),
            name: "1.0".into(),
            status,
            ..Default::default()
        }
        .with_state(VersionState::new(sync, false))
    }

    fn revision(id: &str, secs: i64) -> Revision {
        Revision {
            id: id.into(),
            message: id.into(),
            time: Utc.timestamp_opt(secs, 0).unwrap(),
            user: "cs0008".into(),
        }
    }

    #[tokio::test]
    async fn test_get_missing_after_sync_is_internal_consistency() {
        let store = Arc::new(MockVersionStore::new());
        let manager = mocked(store.clone());

        let err = manager.get(&ctx(), "i1", "v1").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InternalConsistency);
        assert_eq!(store.get_called().await, vec!["get", "sync", "get"]);
    }

    #[tokio::test]
    async fn test_get_unseen_version_syncs_once() {
        let store = Arc::new(MockVersionStore::new());
        store.add_get_response(None).await;
        store
            .add_get_response(Some(stored_version(
                VersionStatus::Draft,
                SynchronizationState::UpToDate,
            )))
            .await;
        let manager = mocked(store.clone());

        let version = manager.get(&ctx(), "i1", "v1").await.unwrap();
        assert_eq!(version.name, "1.0");
        assert_eq!(store.get_called().await, vec!["get", "sync", "get"]);
    }

    #[tokio::test]
    async fn test_get_certified_out_of_sync_forces_sync() {
        let store = Arc::new(MockVersionStore::new());
        store
            .add_get_response(Some(stored_version(
                VersionStatus::Certified,
                SynchronizationState::OutOfSync,
            )))
            .await;
        store
            .add_get_response(Some(stored_version(
                VersionStatus::Certified,
                SynchronizationState::UpToDate,
            )))
            .await;
        let manager = mocked(store.clone());

        let version = manager.get(&ctx(), "i1", "v1").await.unwrap();
        assert_eq!(
            version.synchronization_state(),
            Some(SynchronizationState::UpToDate)
        );
        assert_eq!(store.get_called().await, vec!["get", "force_sync", "get"]);
    }

    #[tokio::test]
    async fn test_get_certified_missing_after_force_sync() {
        let store = Arc::new(MockVersionStore::new());
        store
            .add_get_response(Some(stored_version(
                VersionStatus::Certified,
                SynchronizationState::OutOfSync,
            )))
            .await;
        let manager = mocked(store.clone());

        let err = manager.get(&ctx(), "i1", "v1").await.unwrap_err();
        assert!(err.is_internal_consistency());
    }

    #[tokio::test]
    async fn test_get_draft_out_of_sync_is_returned_as_is() {
        let store = Arc::new(MockVersionStore::new());
        store
            .add_get_response(Some(stored_version(
                VersionStatus::Draft,
                SynchronizationState::OutOfSync,
            )))
            .await;
        let manager = mocked(store.clone());

        let version = manager.get(&ctx(), "i1", "v1").await.unwrap();
        assert_eq!(
            version.synchronization_state(),
            Some(SynchronizationState::OutOfSync)
        );
        assert_eq!(store.get_called().await, vec!["get"]);
    }

    #[tokio::test]
    async fn test_list_revisions_latest_first() {
        let mut store = MockVersionStore::new();
        store.revisions = vec![revision("a", 10), revision("b", 30), revision("c", 20)];
        let manager = mocked(Arc::new(store));

        let revisions = manager.list_revisions(&ctx(), "i1", "v1").await.unwrap();
        let ids: Vec<_> = revisions.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[tokio::test]
    async fn test_delegations_reach_the_store() {
        let store = Arc::new(MockVersionStore::new());
        let manager = mocked(store.clone());

        manager.publish(&ctx(), "i1", "v1", "msg").await.unwrap();
        manager.sync(&ctx(), "i1", "v1").await.unwrap();
        manager.force_sync(&ctx(), "i1", "v1").await.unwrap();
        manager.clean(&ctx(), "i1", "v1").await.unwrap();
        manager.revert(&ctx(), "i1", "v1", "r1").await.unwrap();
        assert_eq!(
            store.get_called().await,
            vec!["publish", "sync", "force_sync", "clean", "revert"]
        );
    }

    #[tokio::test]
    async fn test_delete_is_unsupported() {
        let store = Arc::new(MockVersionStore::new());
        let manager = mocked(store.clone());

        let err = manager.delete(&ctx(), "i1", "v1").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unsupported);
        assert!(store.get_called().await.is_empty());
    }

    // Against the memory backend

    struct Fixture {
        items: Arc<dyn ItemStore>,
        manager: VersioningManager,
        item_id: String,
    }

    async fn fixture() -> Fixture {
        let backend = MemoryBackend::empty();
        let items = backend.item_store();
        let item = items.create(&ctx(), Item::new("vsp", "vsp1")).await.unwrap();
        let manager = VersioningManager::new(
            backend.version_store(),
            items.clone(),
            Arc::new(MajorVersionCalculator::new()),
        );
        Fixture {
            items,
            manager,
            item_id: item.id,
        }
    }

    impl Fixture {
        async fn item(&self) -> Item {
            self.items.get(&ctx(), &self.item_id).await.unwrap().unwrap()
        }

        async fn create(&self, base: Option<&str>) -> VersioningResult<Version> {
            self.manager
                .create(
                    &ctx(),
                    &self.item_id,
                    base,
                    &Version::new("desc"),
                    VersionCreationMethod::Major,
                )
                .await
        }
    }

    #[tokio::test]
    async fn test_create_initial_version() {
        let f = fixture().await;
        let version = f.create(None).await.unwrap();

        assert_eq!(version.name, "1.0");
        assert_eq!(version.status, VersionStatus::Draft);
        assert!(version.base_id.is_none());
        assert_eq!(f.item().await.version_status_count(VersionStatus::Draft), 1);

        let revisions = f
            .manager
            .list_revisions(&ctx(), &f.item_id, &version.id)
            .await
            .unwrap();
        assert_eq!(revisions.len(), 1);
        assert_eq!(revisions[0].message, "Create version: 1.0");
    }

    #[tokio::test]
    async fn test_create_from_draft_base_is_rejected() {
        let f = fixture().await;
        let base = f.create(None).await.unwrap();

        let err = f.create(Some(&base.id)).await.unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("Certified"));
    }

    #[tokio::test]
    async fn test_create_from_certified_base_and_duplicate_name() {
        let f = fixture().await;
        let base = f.create(None).await.unwrap();
        f.manager
            .update_status(&ctx(), &f.item_id, &base.id, VersionStatus::Certified, "cert")
            .await
            .unwrap();

        let next = f.create(Some(&base.id)).await.unwrap();
        assert_eq!(next.name, "2.0");
        assert_eq!(next.base_id.as_deref(), Some(base.id.as_str()));

        let err = f.create(Some(&base.id)).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_create_for_missing_item() {
        let f = fixture().await;
        let err = f
            .manager
            .create(
                &ctx(),
                "missing",
                None,
                &Version::new("d"),
                VersionCreationMethod::Major,
            )
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_status_moves_counters() {
        let f = fixture().await;
        let version = f.create(None).await.unwrap();

        let err = f
            .manager
            .update_status(&ctx(), &f.item_id, &version.id, VersionStatus::Draft, "noop")
            .await
            .unwrap_err();
        assert!(err.is_validation());

        f.manager
            .update_status(&ctx(), &f.item_id, &version.id, VersionStatus::Certified, "cert")
            .await
            .unwrap();
        let item = f.item().await;
        assert_eq!(item.version_status_count(VersionStatus::Certified), 1);
        assert_eq!(item.version_status_count(VersionStatus::Draft), 0);
        assert_eq!(item.version_status_counters().len(), 1);

        let err = f
            .manager
            .update_status(&ctx(), &f.item_id, &version.id, VersionStatus::Draft, "back")
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_update_status_failed_publish_leaves_counters() {
        let f = fixture().await;
        let version = f.create(None).await.unwrap();
        let bob = SessionContext::new("bob", "dox").unwrap();
        f.manager.get(&bob, &f.item_id, &version.id).await.unwrap();

        let patch = Version::new("edited by cs0008");
        f.manager
            .update(&ctx(), &f.item_id, &version.id, &patch)
            .await
            .unwrap();
        f.manager
            .publish(&ctx(), &f.item_id, &version.id, "edit")
            .await
            .unwrap();

        let err = f
            .manager
            .update_status(&bob, &f.item_id, &version.id, VersionStatus::Certified, "cert")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            VersioningError::Storage(StorageError::Conflict(_))
        ));
        let item = f.item().await;
        assert_eq!(item.version_status_count(VersionStatus::Draft), 1);
        assert_eq!(item.version_status_count(VersionStatus::Certified), 0);

        f.manager
            .force_sync(&bob, &f.item_id, &version.id)
            .await
            .unwrap();
        f.manager
            .update_status(&bob, &f.item_id, &version.id, VersionStatus::Certified, "cert")
            .await
            .unwrap();
        let item = f.item().await;
        assert_eq!(item.version_status_count(VersionStatus::Certified), 1);
        assert_eq!(item.version_status_count(VersionStatus::Draft), 0);
    }

    #[tokio::test]
    async fn test_update_keeps_name_and_status() {
        let f = fixture().await;
        let version = f.create(None).await.unwrap();

        let mut patch = Version::new("new desc").with_property("k", json!("v"));
        patch.name = "9.9".into();
        patch.status = VersionStatus::Certified;
        let updated = f
            .manager
            .update(&ctx(), &f.item_id, &version.id, &patch)
            .await
            .unwrap();

        assert_eq!(updated.name, "1.0");
        assert_eq!(updated.status, VersionStatus::Draft);
        assert_eq!(updated.description, "new desc");
        assert_eq!(updated.property("k"), Some(&json!("v")));
    }

    #[tokio::test]
    async fn test_list_injects_creation_methods() {
        let f = fixture().await;
        let first = f.create(None).await.unwrap();
        f.manager
            .update_status(&ctx(), &f.item_id, &first.id, VersionStatus::Certified, "cert")
            .await
            .unwrap();

        let listed = f.manager.list(&ctx(), &f.item_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(
            listed[0].property(OPTIONAL_CREATION_METHODS),
            Some(&json!(["major"]))
        );

        f.create(Some(&first.id)).await.unwrap();
        let listed = f.manager.list(&ctx(), &f.item_id).await.unwrap();
        let certified = listed.iter().find(|v| v.name == "1.0").unwrap();
        assert_eq!(certified.property(OPTIONAL_CREATION_METHODS), Some(&json!([])));
        let draft = listed.iter().find(|v| v.name == "2.0").unwrap();
        assert_eq!(draft.property(OPTIONAL_CREATION_METHODS), Some(&json!([])));
    }
}
