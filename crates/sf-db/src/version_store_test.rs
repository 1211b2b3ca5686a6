use super::*;
use crate::duckdb::DuckDbBackend;

#[tokio::test]
async fn test_bootstrap_records_version_zero() {
    let db = DuckDbBackend::in_memory().unwrap();
    let store = VersionStore::new(&db);

    store.bootstrap().await.unwrap();
    assert_eq!(store.read().await.unwrap(), 0);
}

#[tokio::test]
async fn test_bootstrap_twice_fails() {
    let db = DuckDbBackend::in_memory().unwrap();
    let store = VersionStore::new(&db);

    store.bootstrap().await.unwrap();
    assert!(store.bootstrap().await.is_err());
}

#[tokio::test]
async fn test_advance_guarded_moves_marker() {
    let db = DuckDbBackend::in_memory().unwrap();
    let store = VersionStore::new(&db);
    store.bootstrap().await.unwrap();

    store.advance_guarded(0, 3).await.unwrap();
    assert_eq!(store.read().await.unwrap(), 3);

    store.advance_guarded(3, 1).await.unwrap();
    assert_eq!(store.read().await.unwrap(), 1);
}

#[tokio::test]
async fn test_advance_guarded_rejects_stale_expectation() {
    let db = DuckDbBackend::in_memory().unwrap();
    let store = VersionStore::new(&db);
    store.bootstrap().await.unwrap();
    store.advance_guarded(0, 2).await.unwrap();

    // A run that still believes the marker is 0 must not win
    let err = store.advance_guarded(0, 1).await.unwrap_err();
    assert!(matches!(err, DbError::ConcurrentMigration { expected: 0 }));
    assert_eq!(store.read().await.unwrap(), 2);
}

#[tokio::test]
async fn test_read_without_bootstrap_fails() {
    let db = DuckDbBackend::in_memory().unwrap();
    let store = VersionStore::new(&db);
    assert!(store.read().await.is_err());
}
