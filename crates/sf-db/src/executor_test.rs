use super::*;
use crate::duckdb::DuckDbBackend;
use crate::version_store::VersionStore;
use std::path::Path;
use tempfile::TempDir;

fn write_migration(dir: &Path, name: &str, sql: &str) {
    std::fs::write(dir.join(name), sql).unwrap();
}

/// Two-version catalog: v1 creates `users`, v2 creates `emails`, with
/// matching down files.
fn sample_source() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_migration(
        dir.path(),
        "000001.create_users.up.sql",
        "CREATE TABLE users (id INTEGER);",
    );
    write_migration(
        dir.path(),
        "000001.create_users.down.sql",
        "DROP TABLE users;",
    );
    write_migration(
        dir.path(),
        "000002.create_emails.up.sql",
        "CREATE TABLE emails (id INTEGER);",
    );
    write_migration(
        dir.path(),
        "000002.create_emails.down.sql",
        "DROP TABLE emails;",
    );
    dir
}

async fn table_exists(db: &DuckDbBackend, name: &str) -> bool {
    let sql = format!(
        "SELECT COUNT(*) FROM information_schema.tables WHERE table_name = '{name}'"
    );
    db.query_i64(&sql).await.unwrap() > 0
}

async fn bootstrapped_db() -> DuckDbBackend {
    let db = DuckDbBackend::in_memory().unwrap();
    VersionStore::new(&db).bootstrap().await.unwrap();
    db
}

#[tokio::test]
async fn test_up_run_applies_in_ascending_order() {
    let source = sample_source();
    let catalog = Catalog::discover(source.path()).unwrap();
    let db = bootstrapped_db().await;

    let report = Executor::new(&catalog, &db)
        .apply(Direction::Up, 0, 2)
        .await
        .unwrap();

    let versions: Vec<i64> = report.applied.iter().map(|m| m.version).collect();
    assert_eq!(versions, vec![1, 2]);
    assert_eq!(report.end_version, 2);
    assert!(table_exists(&db, "users").await);
    assert!(table_exists(&db, "emails").await);
    assert_eq!(VersionStore::new(&db).read().await.unwrap(), 2);
}

#[tokio::test]
async fn test_down_run_undoes_most_recent_first() {
    let source = sample_source();
    let catalog = Catalog::discover(source.path()).unwrap();
    let db = bootstrapped_db().await;
    let executor = Executor::new(&catalog, &db);

    executor.apply(Direction::Up, 0, 2).await.unwrap();
    let report = executor.apply(Direction::Down, 2, 1).await.unwrap();

    // Only v2's down file ran
    let versions: Vec<i64> = report.applied.iter().map(|m| m.version).collect();
    assert_eq!(versions, vec![2]);
    assert!(table_exists(&db, "users").await);
    assert!(!table_exists(&db, "emails").await);
    assert_eq!(VersionStore::new(&db).read().await.unwrap(), 1);
}

#[tokio::test]
async fn test_failing_statement_rolls_back_whole_range() {
    let source = sample_source();
    write_migration(
        source.path(),
        "000003.broken.up.sql",
        "CREATE TABLE nope (id INTEGER; -- malformed",
    );
    write_migration(source.path(), "000003.broken.down.sql", "DROP TABLE nope;");

    let catalog = Catalog::discover(source.path()).unwrap();
    let db = bootstrapped_db().await;

    let err = Executor::new(&catalog, &db)
        .apply(Direction::Up, 0, 3)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DbError::StatementExecution { version: 3, .. }
    ));
    // v1 and v2 executed inside the transaction but must not be visible
    assert!(!table_exists(&db, "users").await);
    assert!(!table_exists(&db, "emails").await);
    assert_eq!(VersionStore::new(&db).read().await.unwrap(), 0);
}

#[tokio::test]
async fn test_missing_down_descriptor_skips_that_version() {
    let source = sample_source();
    std::fs::remove_file(source.path().join("000002.create_emails.down.sql")).unwrap();

    let catalog = Catalog::discover(source.path()).unwrap();
    let db = bootstrapped_db().await;
    let executor = Executor::new(&catalog, &db);

    executor.apply(Direction::Up, 0, 2).await.unwrap();

    // The down descriptor for v2 was never discovered, so the selected
    // range contains only v1's down file; the marker still lands on 0.
    let report = executor.apply(Direction::Down, 2, 0).await.unwrap();
    let versions: Vec<i64> = report.applied.iter().map(|m| m.version).collect();
    assert_eq!(versions, vec![1]);
    assert_eq!(VersionStore::new(&db).read().await.unwrap(), 0);
}

#[tokio::test]
async fn test_unreadable_file_aborts_run() {
    let source = sample_source();
    let catalog = Catalog::discover(source.path()).unwrap();
    std::fs::remove_file(source.path().join("000001.create_users.up.sql")).unwrap();

    let db = bootstrapped_db().await;
    let err = Executor::new(&catalog, &db)
        .apply(Direction::Up, 0, 2)
        .await
        .unwrap_err();

    assert!(matches!(err, DbError::FileRead { .. }));
    assert_eq!(VersionStore::new(&db).read().await.unwrap(), 0);
}

#[tokio::test]
async fn test_stale_version_marker_aborts_and_rolls_back() {
    let source = sample_source();
    let catalog = Catalog::discover(source.path()).unwrap();
    let db = bootstrapped_db().await;

    // Simulate another run having advanced the marker already
    VersionStore::new(&db).advance_guarded(0, 1).await.unwrap();

    let err = Executor::new(&catalog, &db)
        .apply(Direction::Up, 0, 2)
        .await
        .unwrap_err();

    assert!(matches!(err, DbError::ConcurrentMigration { expected: 0 }));
    assert!(!table_exists(&db, "users").await);
    assert_eq!(VersionStore::new(&db).read().await.unwrap(), 1);
}

#[tokio::test]
async fn test_empty_range_still_moves_marker() {
    // `+0`-style plans select nothing but remain a consistent no-op
    let source = sample_source();
    let catalog = Catalog::discover(source.path()).unwrap();
    let db = bootstrapped_db().await;

    let report = Executor::new(&catalog, &db)
        .apply(Direction::Up, 0, 0)
        .await
        .unwrap();
    assert!(report.applied.is_empty());
    assert_eq!(VersionStore::new(&db).read().await.unwrap(), 0);
}
