//! Item records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use super::version::VersionStatus;

/// Item lifecycle status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemStatus {
    #[default]
    Active,
    Archived,
    Deleted,
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ItemStatus::Active => "Active",
            ItemStatus::Archived => "Archived",
            ItemStatus::Deleted => "Deleted",
        };
        write!(f, "{name}")
    }
}

/// A named configuration artifact whose history is tracked as versions
///
/// An empty `id` marks an item that was not stored yet; the store assigns
/// the real id on creation.
///
/// `version_status_counters` holds, per version status, how many of the
/// item's versions are currently in it. Counters never hold zero: a status
/// whose count drops to zero is removed from the map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub name: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ItemStatus,
    pub creation_time: Option<DateTime<Utc>>,
    pub modification_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub properties: HashMap<String, serde_json::Value>,
    #[serde(default)]
    version_status_counters: BTreeMap<VersionStatus, u32>,
}

impl Item {
    pub fn new(item_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            item_type: item_type.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Replace the counters wholesale, dropping zero entries. Intended for store adapters.
    pub fn with_version_status_counters(
        mut self,
        counters: impl IntoIterator<Item = (VersionStatus, u32)>,
    ) -> Self {
        self.version_status_counters = counters
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .collect();
        self
    }

    pub fn is_new(&self) -> bool {
        self.id.is_empty()
    }

    pub fn add_property(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.properties.insert(key.into(), value);
    }

    pub fn property(&self, key: &str) -> Option<&serde_json::Value> {
        self.properties.get(key)
    }

    pub fn version_status_counters(&self) -> &BTreeMap<VersionStatus, u32> {
        &self.version_status_counters
    }

    pub fn version_status_count(&self, status: VersionStatus) -> u32 {
        self.version_status_counters
            .get(&status)
            .copied()
            .unwrap_or(0)
    }

    /// One more version is in `status`
    pub fn add_version_status(&mut self, status: VersionStatus) {
        *self.version_status_counters.entry(status).or_insert(0) += 1;
    }

    /// One version left `status`; the entry disappears when it reaches zero
    pub fn remove_version_status(&mut self, status: VersionStatus) {
        if let Some(count) = self.version_status_counters.get_mut(&status) {
            if *count <= 1 {
                self.version_status_counters.remove(&status);
            } else {
                *count -= 1;
            }
        }
    }

    /// Overlay the caller-settable fields of `other`: type, name, owner,
    /// description and properties (merged, not replaced).
    pub fn populate_external_fields(&mut self, other: &Item) {
        self.item_type = other.item_type.clone();
        self.name = other.name.clone();
        self.owner = other.owner.clone();
        self.description = other.description.clone();
        for (key, value) in &other.properties {
            self.properties.insert(key.clone(), value.clone());
        }
    }
}
