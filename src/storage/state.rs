//! Store state shared by the memory and file backends
//!
//! Each tenant holds its items and, per item, the shared (public) copy of
//! every version plus each user's private working copies. Publishing appends
//! a revision to the public copy; syncing pulls the public head into a
//! working copy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

use super::error::{StorageError, StorageResult};
use crate::session::SessionContext;
use crate::types::{
    Item, Revision, SynchronizationState, Version, VersionState, VersionStatus,
};

/// Whole-store snapshot; this is also the on-disk format of the file backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreState {
    #[serde(default)]
    tenants: BTreeMap<String, TenantState>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TenantState {
    #[serde(default)]
    items: BTreeMap<String, Item>,
    #[serde(default)]
    versions: BTreeMap<String, ItemVersions>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ItemVersions {
    /// version id -> shared copy
    #[serde(default)]
    public: BTreeMap<String, PublicVersion>,
    /// user id -> version id -> working copy
    #[serde(default)]
    private: BTreeMap<String, BTreeMap<String, WorkingCopy>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PublicVersion {
    revisions: Vec<RevisionEntry>,
}

impl PublicVersion {
    fn head(&self) -> Option<&RevisionEntry> {
        self.revisions.last()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RevisionEntry {
    revision: Revision,
    content: VersionContent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WorkingCopy {
    content: VersionContent,
    /// Public revision this copy was last synced with or published as
    synced_revision: Option<String>,
    dirty: bool,
    merging: bool,
}

/// Persisted version fields; the synchronization state is derived on read
#[derive(Debug, Clone, Serialize, Deserialize)]
struct VersionContent {
    id: String,
    base_id: Option<String>,
    name: String,
    status: VersionStatus,
    description: String,
    creation_time: Option<DateTime<Utc>>,
    modification_time: Option<DateTime<Utc>>,
    properties: HashMap<String, serde_json::Value>,
}

impl VersionContent {
    fn from_version(version: &Version) -> Self {
        Self {
            id: version.id.clone(),
            base_id: version.base_id.clone(),
            name: version.name.clone(),
            status: version.status,
            description: version.description.clone(),
            creation_time: version.creation_time,
            modification_time: version.modification_time,
            properties: version.properties.clone(),
        }
    }

    fn to_version(&self) -> Version {
        Version {
            id: self.id.clone(),
            base_id: self.base_id.clone(),
            name: self.name.clone(),
            status: self.status,
            description: self.description.clone(),
            creation_time: self.creation_time,
            modification_time: self.modification_time,
            properties: self.properties.clone(),
            ..Default::default()
        }
    }
}

fn synchronization_state(copy: &WorkingCopy, public: Option<&PublicVersion>) -> SynchronizationState {
    if copy.merging {
        return SynchronizationState::Merging;
    }
    let head = public
        .and_then(PublicVersion::head)
        .map(|entry| entry.revision.id.as_str());
    if head != copy.synced_revision.as_deref() {
        SynchronizationState::OutOfSync
    } else {
        SynchronizationState::UpToDate
    }
}

fn version_not_found(item_id: &str, version_id: &str) -> StorageError {
    StorageError::not_found(format!("version {version_id} of item {item_id}"))
}

impl StoreState {
    fn tenant(&self, ctx: &SessionContext) -> Option<&TenantState> {
        self.tenants.get(ctx.tenant())
    }

    fn tenant_mut(&mut self, ctx: &SessionContext) -> &mut TenantState {
        self.tenants.entry(ctx.tenant().to_string()).or_default()
    }

    fn versions_mut(&mut self, ctx: &SessionContext, item_id: &str) -> StorageResult<&mut ItemVersions> {
        let tenant = self.tenant_mut(ctx);
        if !tenant.items.contains_key(item_id) {
            return Err(StorageError::not_found(format!("item {item_id}")));
        }
        Ok(tenant.versions.entry(item_id.to_string()).or_default())
    }

    // Items

    pub fn list_items(&self, ctx: &SessionContext) -> Vec<Item> {
        let mut items: Vec<Item> = self
            .tenant(ctx)
            .map(|t| t.items.values().cloned().collect())
            .unwrap_or_default();
        items.sort_by(|a, b| {
            a.creation_time
                .cmp(&b.creation_time)
                .then_with(|| a.name.cmp(&b.name))
        });
        items
    }

    pub fn get_item(&self, ctx: &SessionContext, item_id: &str) -> Option<Item> {
        self.tenant(ctx).and_then(|t| t.items.get(item_id).cloned())
    }

    pub fn create_item(&mut self, ctx: &SessionContext, mut item: Item) -> Item {
        let now = Utc::now();
        item.id = Uuid::new_v4().to_string();
        item.creation_time = Some(now);
        item.modification_time = Some(now);
        self.tenant_mut(ctx)
            .items
            .insert(item.id.clone(), item.clone());
        item
    }

    pub fn update_item(&mut self, ctx: &SessionContext, item: &Item) -> StorageResult<()> {
        let stored = self
            .tenant_mut(ctx)
            .items
            .get_mut(&item.id)
            .ok_or_else(|| StorageError::not_found(format!("item {}", item.id)))?;
        let creation_time = stored.creation_time;
        *stored = item.clone();
        stored.creation_time = creation_time;
        stored.modification_time = Some(Utc::now());
        Ok(())
    }

    pub fn delete_item(&mut self, ctx: &SessionContext, item_id: &str) -> StorageResult<()> {
        let tenant = self.tenant_mut(ctx);
        if tenant.items.remove(item_id).is_none() {
            return Err(StorageError::not_found(format!("item {item_id}")));
        }
        tenant.versions.remove(item_id);
        Ok(())
    }

    // Versions

    /// Public heads of an item's versions, oldest first
    pub fn list_versions(&self, ctx: &SessionContext, item_id: &str) -> Vec<Version> {
        let Some(versions) = self.tenant(ctx).and_then(|t| t.versions.get(item_id)) else {
            return Vec::new();
        };
        let mut heads: Vec<Version> = versions
            .public
            .values()
            .filter_map(PublicVersion::head)
            .map(|entry| entry.content.to_version())
            .collect();
        heads.sort_by(|a, b| {
            a.creation_time
                .cmp(&b.creation_time)
                .then_with(|| a.name.cmp(&b.name))
        });
        heads
    }

    pub fn create_version(
        &mut self,
        ctx: &SessionContext,
        item_id: &str,
        version: Version,
    ) -> StorageResult<Version> {
        let versions = self.versions_mut(ctx, item_id)?;

        let public_clash = versions
            .public
            .values()
            .filter_map(PublicVersion::head)
            .any(|entry| entry.content.name == version.name);
        // unpublished copies of every user reserve their names
        let private_clash = versions
            .private
            .values()
            .flat_map(|copies| copies.values())
            .any(|c| c.content.name == version.name);
        if public_clash || private_clash {
            return Err(StorageError::conflict(format!(
                "item {item_id} already has a version named {}",
                version.name
            )));
        }

        let now = Utc::now();
        let mut content = VersionContent::from_version(&version);
        content.id = Uuid::new_v4().to_string();
        content.creation_time = Some(now);
        content.modification_time = Some(now);

        let created = content
            .to_version()
            .with_state(VersionState::new(SynchronizationState::UpToDate, true));
        versions
            .private
            .entry(ctx.user_id().to_string())
            .or_default()
            .insert(
                content.id.clone(),
                WorkingCopy {
                    content,
                    synced_revision: None,
                    dirty: true,
                    merging: false,
                },
            );
        Ok(created)
    }

    pub fn update_version(
        &mut self,
        ctx: &SessionContext,
        item_id: &str,
        version: &Version,
    ) -> StorageResult<()> {
        let versions = self.versions_mut(ctx, item_id)?;
        let copy = versions
            .private
            .get_mut(ctx.user_id())
            .and_then(|copies| copies.get_mut(&version.id))
            .ok_or_else(|| version_not_found(item_id, &version.id))?;

        copy.content.name = version.name.clone();
        copy.content.status = version.status;
        copy.content.description = version.description.clone();
        copy.content.properties = version.properties.clone();
        copy.content.modification_time = Some(Utc::now());
        copy.dirty = true;
        Ok(())
    }

    /// The caller's working copy with its derived state
    ///
    /// While the copy is not up to date the status is reported from the
    /// public head, so callers see the shared lifecycle state.
    pub fn get_version(
        &self,
        ctx: &SessionContext,
        item_id: &str,
        version_id: &str,
    ) -> Option<Version> {
        let versions = self.tenant(ctx)?.versions.get(item_id)?;
        let copy = versions.private.get(ctx.user_id())?.get(version_id)?;
        let public = versions.public.get(version_id);

        let sync_state = synchronization_state(copy, public);
        let mut version = copy.content.to_version();
        if sync_state != SynchronizationState::UpToDate {
            if let Some(head) = public.and_then(PublicVersion::head) {
                version.status = head.content.status;
            }
        }
        Some(version.with_state(VersionState::new(sync_state, copy.dirty)))
    }

    pub fn publish(
        &mut self,
        ctx: &SessionContext,
        item_id: &str,
        version_id: &str,
        message: &str,
    ) -> StorageResult<()> {
        let versions = self.versions_mut(ctx, item_id)?;
        let copy = versions
            .private
            .get(ctx.user_id())
            .and_then(|copies| copies.get(version_id))
            .ok_or_else(|| version_not_found(item_id, version_id))?;

        match synchronization_state(copy, versions.public.get(version_id)) {
            SynchronizationState::Merging => {
                return Err(StorageError::conflict(format!(
                    "version {version_id} has an unresolved merge"
                )))
            }
            SynchronizationState::OutOfSync => {
                return Err(StorageError::conflict(format!(
                    "version {version_id} is out of sync, sync before publishing"
                )))
            }
            SynchronizationState::UpToDate => {}
        }
        if !copy.dirty && copy.synced_revision.is_some() {
            return Ok(());
        }
        let name_taken = versions.public.iter().any(|(id, public)| {
            id != version_id
                && public
                    .head()
                    .is_some_and(|entry| entry.content.name == copy.content.name)
        });
        if name_taken {
            return Err(StorageError::conflict(format!(
                "item {item_id} already has a version named {}",
                copy.content.name
            )));
        }

        let entry = RevisionEntry {
            revision: Revision {
                id: Uuid::new_v4().to_string(),
                message: message.to_string(),
                time: Utc::now(),
                user: ctx.user_id().to_string(),
            },
            content: copy.content.clone(),
        };
        let revision_id = entry.revision.id.clone();
        versions
            .public
            .entry(version_id.to_string())
            .or_default()
            .revisions
            .push(entry);

        if let Some(copy) = versions
            .private
            .get_mut(ctx.user_id())
            .and_then(|copies| copies.get_mut(version_id))
        {
            copy.synced_revision = Some(revision_id);
            copy.dirty = false;
        }
        Ok(())
    }

    pub fn sync(&mut self, ctx: &SessionContext, item_id: &str, version_id: &str) -> StorageResult<()> {
        let versions = self.versions_mut(ctx, item_id)?;
        let head = versions
            .public
            .get(version_id)
            .and_then(PublicVersion::head)
            .cloned();
        let copies = versions
            .private
            .entry(ctx.user_id().to_string())
            .or_default();

        if !copies.contains_key(version_id) {
            let head = head.ok_or_else(|| version_not_found(item_id, version_id))?;
            copies.insert(
                version_id.to_string(),
                WorkingCopy {
                    content: head.content,
                    synced_revision: Some(head.revision.id),
                    dirty: false,
                    merging: false,
                },
            );
            return Ok(());
        }

        // a copy that was never published has nothing to pull
        let (Some(copy), Some(head)) = (copies.get_mut(version_id), head) else {
            return Ok(());
        };
        if copy.merging || copy.synced_revision.as_deref() == Some(head.revision.id.as_str()) {
            return Ok(());
        }
        if copy.dirty {
            copy.merging = true;
        } else {
            copy.content = head.content;
            copy.synced_revision = Some(head.revision.id);
        }
        Ok(())
    }

    pub fn force_sync(
        &mut self,
        ctx: &SessionContext,
        item_id: &str,
        version_id: &str,
    ) -> StorageResult<()> {
        let versions = self.versions_mut(ctx, item_id)?;
        let head = versions
            .public
            .get(version_id)
            .and_then(PublicVersion::head)
            .cloned()
            .ok_or_else(|| version_not_found(item_id, version_id))?;
        versions
            .private
            .entry(ctx.user_id().to_string())
            .or_default()
            .insert(
                version_id.to_string(),
                WorkingCopy {
                    content: head.content,
                    synced_revision: Some(head.revision.id),
                    dirty: false,
                    merging: false,
                },
            );
        Ok(())
    }

    pub fn clean(&mut self, ctx: &SessionContext, item_id: &str, version_id: &str) -> StorageResult<()> {
        let versions = self.versions_mut(ctx, item_id)?;
        if let Some(copies) = versions.private.get_mut(ctx.user_id()) {
            copies.remove(version_id);
            if copies.is_empty() {
                versions.private.remove(ctx.user_id());
            }
        }
        Ok(())
    }

    pub fn revert(
        &mut self,
        ctx: &SessionContext,
        item_id: &str,
        version_id: &str,
        revision_id: &str,
    ) -> StorageResult<()> {
        let versions = self.versions_mut(ctx, item_id)?;
        let content = versions
            .public
            .get(version_id)
            .and_then(|public| {
                public
                    .revisions
                    .iter()
                    .find(|entry| entry.revision.id == revision_id)
            })
            .map(|entry| entry.content.clone())
            .ok_or_else(|| {
                StorageError::not_found(format!("revision {revision_id} of version {version_id}"))
            })?;
        let copy = versions
            .private
            .get_mut(ctx.user_id())
            .and_then(|copies| copies.get_mut(version_id))
            .ok_or_else(|| version_not_found(item_id, version_id))?;

        copy.content = content;
        copy.content.modification_time = Some(Utc::now());
        copy.dirty = true;
        Ok(())
    }

    /// Revisions in the order they were published
    pub fn list_revisions(&self, ctx: &SessionContext, item_id: &str, version_id: &str) -> Vec<Revision> {
        self.tenant(ctx)
            .and_then(|t| t.versions.get(item_id))
            .and_then(|v| v.public.get(version_id))
            .map(|public| {
                public
                    .revisions
                    .iter()
                    .map(|entry| entry.revision.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}
