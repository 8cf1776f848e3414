//! Common test utilities and helpers

use item_versioning::storage::{FileBackend, StorageConfig, StorageFactory};
use item_versioning::{MajorVersionCalculator, SessionContext, Versioning};
use std::sync::{Arc, Once};
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Install a test-writer subscriber once per test binary; `RUST_LOG` filters it
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

pub fn ctx(user: &str) -> SessionContext {
    SessionContext::new(user, "dox").unwrap()
}

pub fn memory_versioning() -> Versioning {
    init_tracing();
    Versioning::new(
        StorageFactory::create_test_storage(),
        Arc::new(MajorVersionCalculator::new()),
    )
}

pub async fn file_versioning(dir: &TempDir) -> Versioning {
    init_tracing();
    let backend = FileBackend::new(&StorageConfig::file(dir.path()))
        .await
        .unwrap();
    Versioning::new(Arc::new(backend), Arc::new(MajorVersionCalculator::new()))
}
