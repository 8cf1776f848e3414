//! # Item Versioning
//!
//! Versioning engine for named configuration items. Each item carries a
//! history of versions named `"{major}.{minor}"`; versions move from `Draft`
//! to `Certified`, and every user edits a private working copy that is
//! published to, and synchronized from, a shared copy.
//!
//! ## Usage
//!
//! ```no_run
//! # async fn run() -> item_versioning::VersioningResult<()> {
//! use item_versioning::{
//!     Item, SessionContext, Version, VersionCreationMethod, Versioning, VersioningConfig,
//!     VersionStatus,
//! };
//!
//! let versioning = Versioning::from_config(&VersioningConfig::from_env()?).await?;
//! let ctx = SessionContext::new("cs0008", "dox")?;
//!
//! let item = versioning.items().create(&ctx, &Item::new("vsp", "vsp1")).await?;
//! let first = versioning
//!     .versions()
//!     .create(&ctx, &item.id, None, &Version::new("first"), VersionCreationMethod::Major)
//!     .await?;
//! versioning
//!     .versions()
//!     .update_status(&ctx, &item.id, &first.id, VersionStatus::Certified, "certified")
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - `calculator` - Version naming policy
//! - `config` - Crate configuration from TOML and environment
//! - `error` - Error kinds surfaced to callers
//! - `manager` - Item and version business logic
//! - `session` - Per-request caller identity
//! - `storage` - Store ports and the memory and file backends
//! - `types` - Items, versions and revisions
pub mod calculator;
pub mod config;
pub mod error;
pub mod manager;
pub mod session;
pub mod storage;
pub mod types;

pub use calculator::{MajorVersionCalculator, VersionCalculator, OPTIONAL_CREATION_METHODS};
pub use config::VersioningConfig;
pub use error::{ErrorKind, VersioningError, VersioningResult};
pub use manager::{ItemManager, Versioning, VersioningManager};
pub use session::SessionContext;
pub use types::{
    Item, ItemStatus, Revision, SynchronizationState, Version, VersionCreationMethod,
    VersionState, VersionStatus,
};
