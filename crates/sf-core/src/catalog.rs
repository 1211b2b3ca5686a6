//! Migration catalog discovery
//!
//! Scans a source directory once per invocation and builds the two
//! version-ordered sequences (up and down) the executor selects from.
//! Discovery validates names and permissions only; SQL content is read
//! lazily by the executor for the migrations actually selected.

use crate::error::{CoreError, CoreResult};
use crate::migration::{Direction, Migration};
use std::path::{Path, PathBuf};

/// In-memory, version-ordered collection of every discovered migration
/// for one source directory. Built once, immutable afterward.
#[derive(Debug)]
pub struct Catalog {
    source: PathBuf,
    up: Vec<Migration>,
    down: Vec<Migration>,
}

impl Catalog {
    /// Discover all migrations under `source`.
    ///
    /// Fail-fast: the first invalid entry aborts the whole build, so a
    /// single bad file blocks the run rather than silently narrowing it.
    pub fn discover(source: &Path) -> CoreResult<Self> {
        let entries = std::fs::read_dir(source).map_err(|e| CoreError::SourceNotReadable {
            path: source.display().to_string(),
            cause: e.to_string(),
        })?;

        let mut up = Vec::new();
        let mut down = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| CoreError::SourceNotReadable {
                path: source.display().to_string(),
                cause: e.to_string(),
            })?;

            let migration = parse_entry(source, &entry.file_name())?;
            log::debug!(
                "discovered migration v{} {} ({})",
                migration.version(),
                migration.direction(),
                migration.file_name()
            );

            match migration.direction() {
                Direction::Up => up.push(migration),
                Direction::Down => down.push(migration),
            }
        }

        // Stable sort keyed on version only; directory listing order is
        // preserved among equal keys until the duplicate check below.
        up.sort_by_key(Migration::version);
        down.sort_by_key(Migration::version);

        reject_duplicates(source, &up)?;
        reject_duplicates(source, &down)?;

        Ok(Self {
            source: source.to_path_buf(),
            up,
            down,
        })
    }

    /// Source directory this catalog was built from
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Up migrations, ascending by version
    pub fn up(&self) -> &[Migration] {
        &self.up
    }

    /// Down migrations, ascending by version
    pub fn down(&self) -> &[Migration] {
        &self.down
    }

    /// Highest version with an up migration, or 0 for an empty catalog
    pub fn latest_version(&self) -> i64 {
        self.up.last().map_or(0, Migration::version)
    }

    /// Select the contiguous range a run from `start` to `end` must apply.
    ///
    /// Up runs take versions in `(start, end]` ascending; down runs take
    /// versions in `(end, start]` descending, undoing most recent first.
    pub fn select(&self, direction: Direction, start: i64, end: i64) -> Vec<&Migration> {
        match direction {
            Direction::Up => self
                .up
                .iter()
                .filter(|m| m.version() > start && m.version() <= end)
                .collect(),
            Direction::Down => self
                .down
                .iter()
                .filter(|m| m.version() > end && m.version() <= start)
                .rev()
                .collect(),
        }
    }
}

/// Validate a single directory entry and parse it into a descriptor.
///
/// Checks run in a fixed order so the reported failure is deterministic:
/// stat, directory, owner-read permission, then the filename grammar.
fn parse_entry(source: &Path, entry_name: &std::ffi::OsStr) -> CoreResult<Migration> {
    let path = source.join(entry_name);

    let meta = std::fs::symlink_metadata(&path).map_err(|_| CoreError::NotReadable {
        path: path.display().to_string(),
    })?;

    if meta.is_dir() {
        return Err(CoreError::IsDirectory {
            path: path.display().to_string(),
        });
    }

    if !owner_readable(&meta) {
        return Err(CoreError::NotReadable {
            path: path.display().to_string(),
        });
    }

    let file_name = entry_name.to_str().ok_or_else(|| CoreError::InvalidName {
        path: path.display().to_string(),
        reason: "filename is not valid UTF-8".to_string(),
    })?;

    Migration::from_file_name(file_name, &path)
}

#[cfg(unix)]
fn owner_readable(meta: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o400 == 0o400
}

#[cfg(not(unix))]
fn owner_readable(_meta: &std::fs::Metadata) -> bool {
    true
}

/// Reject two descriptors sharing a version within one direction. The
/// sequences are already sorted, so duplicates are adjacent.
fn reject_duplicates(source: &Path, migrations: &[Migration]) -> CoreResult<()> {
    for pair in migrations.windows(2) {
        if pair[0].version() == pair[1].version() {
            return Err(CoreError::DuplicateVersion {
                version: pair[1].version(),
                direction: pair[1].direction().to_string(),
                path: pair[1].path(source).display().to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
