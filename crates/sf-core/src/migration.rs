//! Migration descriptors and the on-disk filename grammar
//!
//! Every migration lives in a file named `<version>.<name>.<up|down>.sql`,
//! exactly four dot-separated components. The creation tooling pads the
//! version to six digits, but any parseable positive integer is accepted
//! on read.

use crate::error::{CoreError, CoreResult};
use std::fmt;
use std::path::{Path, PathBuf};

/// Direction a migration moves the schema in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Applies a schema change
    Up,
    /// Reverses the schema change of the same version
    Down,
}

impl Direction {
    /// Filename component for this direction
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed migration file: version, label, direction, and the filename
/// it was discovered under. Immutable after construction; the SQL content
/// is read lazily at execution time, never here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    version: i64,
    name: String,
    direction: Direction,
    file_name: String,
}

impl Migration {
    /// Parse a directory entry name against the migration filename grammar.
    ///
    /// `path` is used only for error reporting and should be the full
    /// path of the entry as the operator would recognize it.
    pub fn from_file_name(file_name: &str, path: &Path) -> CoreResult<Self> {
        let invalid = |reason: &str| CoreError::InvalidName {
            path: path.display().to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<&str> = file_name.split('.').collect();
        if parts.len() != 4 {
            return Err(invalid("expected <version>.<name>.<up|down>.sql"));
        }

        let version: i64 = parts[0]
            .parse()
            .map_err(|_| invalid("version is not a base-10 integer"))?;
        if version < 1 {
            return Err(invalid("version must be a positive integer"));
        }

        let direction = match parts[2] {
            "up" => Direction::Up,
            "down" => Direction::Down,
            _ => return Err(invalid("direction must be 'up' or 'down'")),
        };

        if parts[3] != "sql" {
            return Err(invalid("extension must be 'sql'"));
        }

        Ok(Self {
            version,
            name: parts[1].to_string(),
            direction,
            file_name: file_name.to_string(),
        })
    }

    /// Version number parsed from the filename
    pub fn version(&self) -> i64 {
        self.version
    }

    /// Free-form label; meaningless to the engine, used for diagnostics
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Which way this migration moves the schema
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Filename exactly as discovered on disk
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Full path of the migration file under `source`
    pub fn path(&self, source: &Path) -> PathBuf {
        source.join(&self.file_name)
    }

    /// Filename this descriptor would be created under by the tooling
    /// (six-digit zero-padded version)
    pub fn canonical_file_name(&self) -> String {
        format!(
            "{:06}.{}.{}.sql",
            self.version, self.name, self.direction
        )
    }
}

#[cfg(test)]
#[path = "migration_test.rs"]
mod tests;
