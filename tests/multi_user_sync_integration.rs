//! Two users working on the same version through the shared copy

mod common;

use common::{ctx, memory_versioning};
use item_versioning::storage::StorageError;
use item_versioning::{
    ErrorKind, Item, SynchronizationState, Version, VersionCreationMethod, VersionStatus,
    Versioning, VersioningError,
};

async fn shared_version(versioning: &Versioning) -> (String, String) {
    let alice = ctx("alice");
    let item = versioning
        .items()
        .create(&alice, &Item::new("vsp", "shared"))
        .await
        .unwrap();
    let version = versioning
        .versions()
        .create(
            &alice,
            &item.id,
            None,
            &Version::new("shared"),
            VersionCreationMethod::Major,
        )
        .await
        .unwrap();
    (item.id, version.id)
}

#[tokio::test]
async fn test_first_access_pulls_shared_copy() {
    let versioning = memory_versioning();
    let (item_id, version_id) = shared_version(&versioning).await;

    let seen = versioning
        .versions()
        .get(&ctx("bob"), &item_id, &version_id)
        .await
        .unwrap();
    assert_eq!(seen.name, "1.0");
    assert_eq!(
        seen.synchronization_state(),
        Some(SynchronizationState::UpToDate)
    );
}

#[tokio::test]
async fn test_unknown_version_is_not_found() {
    let versioning = memory_versioning();
    let (item_id, _) = shared_version(&versioning).await;

    let err = versioning
        .versions()
        .get(&ctx("bob"), &item_id, "no-such-version")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_certified_out_of_sync_is_reconciled_on_read() {
    let versioning = memory_versioning();
    let (item_id, version_id) = shared_version(&versioning).await;
    let bob = ctx("bob");

    // bob takes a copy while the version is still a draft
    versioning
        .versions()
        .get(&bob, &item_id, &version_id)
        .await
        .unwrap();

    versioning
        .versions()
        .update_status(
            &ctx("alice"),
            &item_id,
            &version_id,
            VersionStatus::Certified,
            "certify",
        )
        .await
        .unwrap();

    let seen = versioning
        .versions()
        .get(&bob, &item_id, &version_id)
        .await
        .unwrap();
    assert_eq!(seen.status, VersionStatus::Certified);
    assert_eq!(
        seen.synchronization_state(),
        Some(SynchronizationState::UpToDate)
    );
}

#[tokio::test]
async fn test_draft_out_of_sync_is_left_for_the_caller() {
    let versioning = memory_versioning();
    let (item_id, version_id) = shared_version(&versioning).await;
    let bob = ctx("bob");
    versioning
        .versions()
        .get(&bob, &item_id, &version_id)
        .await
        .unwrap();

    versioning
        .versions()
        .update(&ctx("alice"), &item_id, &version_id, &Version::new("alice edit"))
        .await
        .unwrap();
    versioning
        .versions()
        .publish(&ctx("alice"), &item_id, &version_id, "edit")
        .await
        .unwrap();

    let stale = versioning
        .versions()
        .get(&bob, &item_id, &version_id)
        .await
        .unwrap();
    assert_eq!(
        stale.synchronization_state(),
        Some(SynchronizationState::OutOfSync)
    );
    assert_eq!(stale.description, "shared");

    versioning
        .versions()
        .sync(&bob, &item_id, &version_id)
        .await
        .unwrap();
    let fresh = versioning
        .versions()
        .get(&bob, &item_id, &version_id)
        .await
        .unwrap();
    assert_eq!(fresh.description, "alice edit");
}

#[tokio::test]
async fn test_conflicting_edits_merge_until_force_sync() {
    let versioning = memory_versioning();
    let (item_id, version_id) = shared_version(&versioning).await;
    let alice = ctx("alice");
    let bob = ctx("bob");

    versioning
        .versions()
        .get(&bob, &item_id, &version_id)
        .await
        .unwrap();
    versioning
        .versions()
        .update(&bob, &item_id, &version_id, &Version::new("bob edit"))
        .await
        .unwrap();

    versioning
        .versions()
        .update(&alice, &item_id, &version_id, &Version::new("alice edit"))
        .await
        .unwrap();
    versioning
        .versions()
        .publish(&alice, &item_id, &version_id, "alice")
        .await
        .unwrap();

    // bob's publish is rejected while his copy is behind
    let err = versioning
        .versions()
        .publish(&bob, &item_id, &version_id, "bob")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        VersioningError::Storage(StorageError::Conflict(_))
    ));

    versioning
        .versions()
        .sync(&bob, &item_id, &version_id)
        .await
        .unwrap();
    let merging = versioning
        .versions()
        .get(&bob, &item_id, &version_id)
        .await
        .unwrap();
    assert_eq!(
        merging.synchronization_state(),
        Some(SynchronizationState::Merging)
    );

    versioning
        .versions()
        .force_sync(&bob, &item_id, &version_id)
        .await
        .unwrap();
    let resolved = versioning
        .versions()
        .get(&bob, &item_id, &version_id)
        .await
        .unwrap();
    assert_eq!(resolved.description, "alice edit");
    assert!(!resolved.state().unwrap().dirty);
}

#[tokio::test]
async fn test_clean_then_get_resyncs() {
    let versioning = memory_versioning();
    let (item_id, version_id) = shared_version(&versioning).await;
    let bob = ctx("bob");

    versioning
        .versions()
        .get(&bob, &item_id, &version_id)
        .await
        .unwrap();
    versioning
        .versions()
        .update(&bob, &item_id, &version_id, &Version::new("scratch"))
        .await
        .unwrap();
    versioning
        .versions()
        .clean(&bob, &item_id, &version_id)
        .await
        .unwrap();

    let fresh = versioning
        .versions()
        .get(&bob, &item_id, &version_id)
        .await
        .unwrap();
    assert_eq!(fresh.description, "shared");
}

#[tokio::test]
async fn test_tenants_are_isolated() {
    let versioning = memory_versioning();
    let (item_id, _) = shared_version(&versioning).await;
    let outsider = item_versioning::SessionContext::new("alice", "other").unwrap();

    let err = versioning
        .items()
        .get(&outsider, &item_id)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(versioning
        .versions()
        .list(&outsider, &item_id)
        .await
        .unwrap()
        .is_empty());
}
