//! Version records and their lifecycle/synchronization enums

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Lifecycle status of a version. Moves forward only: `Draft` then `Certified`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum VersionStatus {
    #[default]
    Draft,
    Certified,
}

impl VersionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionStatus::Draft => "Draft",
            VersionStatus::Certified => "Certified",
        }
    }

    /// Whether moving from `self` to `next` is a forward transition
    pub fn can_transition_to(&self, next: VersionStatus) -> bool {
        *self < next
    }
}

impl fmt::Display for VersionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Relationship between a user's working copy and the shared copy, as reported by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SynchronizationState {
    UpToDate,
    OutOfSync,
    Merging,
}

impl fmt::Display for SynchronizationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SynchronizationState::UpToDate => "Up to date",
            SynchronizationState::OutOfSync => "Out of sync",
            SynchronizationState::Merging => "Merging",
        };
        write!(f, "{name}")
    }
}

/// Store-reported state of a version's working copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionState {
    pub synchronization_state: SynchronizationState,
    /// Working copy holds changes that were not published yet
    pub dirty: bool,
}

impl VersionState {
    pub fn new(synchronization_state: SynchronizationState, dirty: bool) -> Self {
        Self {
            synchronization_state,
            dirty,
        }
    }

    pub fn is_out_of_sync(&self) -> bool {
        self.synchronization_state == SynchronizationState::OutOfSync
    }
}

/// How a new version name is derived from its base version's name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionCreationMethod {
    Major,
    Minor,
}

impl VersionCreationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionCreationMethod::Major => "major",
            VersionCreationMethod::Minor => "minor",
        }
    }
}

impl fmt::Display for VersionCreationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One point in an item's history
///
/// `name` is a `"{major}.{minor}"` string, unique among the versions of one
/// item. `state` is only ever filled in by a store; business logic reads it
/// but never sets it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Version {
    pub id: String,
    pub base_id: Option<String>,
    pub name: String,
    pub status: VersionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) state: Option<VersionState>,
    #[serde(default)]
    pub description: String,
    pub creation_time: Option<DateTime<Utc>>,
    pub modification_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub properties: HashMap<String, serde_json::Value>,
}

impl Version {
    /// Version request carrying the caller-settable fields
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Attach the store-reported state. Intended for store adapters.
    pub fn with_state(mut self, state: VersionState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn state(&self) -> Option<VersionState> {
        self.state
    }

    pub fn synchronization_state(&self) -> Option<SynchronizationState> {
        self.state.map(|s| s.synchronization_state)
    }

    pub fn is_new(&self) -> bool {
        self.id.is_empty()
    }

    pub fn is_certified(&self) -> bool {
        self.status == VersionStatus::Certified
    }

    pub fn add_property(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.properties.insert(key.into(), value);
    }

    pub fn property(&self, key: &str) -> Option<&serde_json::Value> {
        self.properties.get(key)
    }

    /// Overlay the caller-settable fields of `other`: description and properties.
    /// Name and status are not touched.
    pub fn populate_external_fields(&mut self, other: &Version) {
        self.description = other.description.clone();
        for (key, value) in &other.properties {
            self.properties.insert(key.clone(), value.clone());
        }
    }
}
