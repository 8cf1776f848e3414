//! Entity types: items, versions and revisions

pub mod item;
pub mod revision;
pub mod version;

pub use item::{Item, ItemStatus};
pub use revision::Revision;
pub use version::{
    SynchronizationState, Version, VersionCreationMethod, VersionState, VersionStatus,
};
