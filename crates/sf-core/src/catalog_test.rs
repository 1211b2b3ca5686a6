use super::*;
use tempfile::TempDir;

fn write_migration(dir: &Path, name: &str) {
    std::fs::write(dir.join(name), "SELECT 1;").unwrap();
}

fn sample_catalog() -> (TempDir, Catalog) {
    let dir = TempDir::new().unwrap();
    for name in [
        "000002.add_email.up.sql",
        "000001.create_users.up.sql",
        "000001.create_users.down.sql",
        "000002.add_email.down.sql",
        "000003.add_index.up.sql",
        "000003.add_index.down.sql",
    ] {
        write_migration(dir.path(), name);
    }
    let catalog = Catalog::discover(dir.path()).unwrap();
    (dir, catalog)
}

#[test]
fn test_discover_partitions_and_sorts() {
    let (_dir, catalog) = sample_catalog();

    let up: Vec<i64> = catalog.up().iter().map(Migration::version).collect();
    let down: Vec<i64> = catalog.down().iter().map(Migration::version).collect();
    assert_eq!(up, vec![1, 2, 3]);
    assert_eq!(down, vec![1, 2, 3]);
    assert_eq!(catalog.latest_version(), 3);
}

#[test]
fn test_discover_empty_directory() {
    let dir = TempDir::new().unwrap();
    let catalog = Catalog::discover(dir.path()).unwrap();
    assert!(catalog.up().is_empty());
    assert!(catalog.down().is_empty());
    assert_eq!(catalog.latest_version(), 0);
}

#[test]
fn test_missing_directory_is_source_not_readable() {
    let err = Catalog::discover(Path::new("/nonexistent/migrations")).unwrap_err();
    assert!(matches!(err, CoreError::SourceNotReadable { .. }));
}

#[test]
fn test_single_bad_file_aborts_discovery() {
    let dir = TempDir::new().unwrap();
    write_migration(dir.path(), "000001.create_users.up.sql");
    write_migration(dir.path(), "notes.txt");

    let err = Catalog::discover(dir.path()).unwrap_err();
    assert!(matches!(err, CoreError::InvalidName { .. }));
    assert!(err.to_string().contains("notes.txt"));
}

#[test]
fn test_subdirectory_rejected() {
    let dir = TempDir::new().unwrap();
    write_migration(dir.path(), "000001.create_users.up.sql");
    std::fs::create_dir(dir.path().join("archive")).unwrap();

    let err = Catalog::discover(dir.path()).unwrap_err();
    assert!(matches!(err, CoreError::IsDirectory { .. }));
}

#[cfg(unix)]
#[test]
fn test_owner_unreadable_file_rejected() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("000001.create_users.up.sql");
    std::fs::write(&path, "SELECT 1;").unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o200)).unwrap();

    let err = Catalog::discover(dir.path()).unwrap_err();
    assert!(matches!(err, CoreError::NotReadable { .. }));
}

#[test]
fn test_duplicate_version_rejected() {
    let dir = TempDir::new().unwrap();
    write_migration(dir.path(), "000001.create_users.up.sql");
    write_migration(dir.path(), "1.create_users_again.up.sql");

    let err = Catalog::discover(dir.path()).unwrap_err();
    assert!(matches!(
        err,
        CoreError::DuplicateVersion { version: 1, .. }
    ));
}

#[test]
fn test_duplicate_allowed_across_directions() {
    // An up and a down sharing a version is the normal pair shape
    let dir = TempDir::new().unwrap();
    write_migration(dir.path(), "000001.create_users.up.sql");
    write_migration(dir.path(), "000001.create_users.down.sql");
    assert!(Catalog::discover(dir.path()).is_ok());
}

#[test]
fn test_select_up_range_is_half_open_ascending() {
    let (_dir, catalog) = sample_catalog();

    let selected: Vec<i64> = catalog
        .select(Direction::Up, 1, 3)
        .iter()
        .map(|m| m.version())
        .collect();
    assert_eq!(selected, vec![2, 3]);
}

#[test]
fn test_select_down_range_is_descending() {
    let (_dir, catalog) = sample_catalog();

    let selected: Vec<i64> = catalog
        .select(Direction::Down, 3, 1)
        .iter()
        .map(|m| m.version())
        .collect();
    assert_eq!(selected, vec![3, 2]);
}

#[test]
fn test_select_empty_when_already_at_target() {
    let (_dir, catalog) = sample_catalog();
    assert!(catalog.select(Direction::Up, 3, 3).is_empty());
    assert!(catalog.select(Direction::Down, 1, 1).is_empty());
}
