//! Storage layer for items and versions
//!
//! The managers talk to storage only through the [`ItemStore`] and
//! [`VersionStore`] ports. Two backends ship with the crate: an in-memory
//! one and a single-file JSON one. Both keep the same [`state::StoreState`]
//! model, so they behave identically apart from durability.

pub mod backends;
pub mod config;
pub mod error;
pub mod factory;
pub mod state;
pub mod traits;
pub mod types;


pub use backends::{FileBackend, MemoryBackend};
pub use config::{BackendConfig, BackendType, FileConfig, MemoryConfig, StorageConfig};
pub use error::{StorageError, StorageResult};
pub use factory::StorageFactory;
pub use state::StoreState;
pub use traits::{ItemStore, VersionStore, VersioningStorage};
pub use types::{ConnectionStatus, HealthStatus};
