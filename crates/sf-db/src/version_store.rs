//! Persisted schema version marker
//!
//! A single-row table, `sf_meta.schema_version`, holds the version the
//! database schema is currently at. Bootstrapped once at `init` time and
//! touched afterwards only by the executor, inside its transaction.

use crate::error::{DbError, DbResult};
use crate::traits::Database;

/// Reads and writes the single-row version table through a `Database`.
pub struct VersionStore<'a> {
    db: &'a dyn Database,
}

impl<'a> VersionStore<'a> {
    pub fn new(db: &'a dyn Database) -> Self {
        Self { db }
    }

    /// Create the schema and version table and record version 0.
    ///
    /// One-time setup; fails if the table already exists so a repeated
    /// `init` cannot silently reset the marker.
    pub async fn bootstrap(&self) -> DbResult<()> {
        self.db
            .execute_batch(
                "CREATE SCHEMA IF NOT EXISTS sf_meta;
                 CREATE TABLE sf_meta.schema_version (version INTEGER NOT NULL);
                 INSERT INTO sf_meta.schema_version (version) VALUES (0);",
            )
            .await
    }

    /// Current recorded version
    pub async fn read(&self) -> DbResult<i64> {
        self.db
            .query_i64("SELECT version FROM sf_meta.schema_version")
            .await
    }

    /// Advance the marker from `from` to `to`, inside the caller's
    /// transaction.
    ///
    /// The update is conditional on the row still holding `from`; zero
    /// affected rows means another run moved the marker since this run
    /// resolved its target, and the caller must abort.
    pub async fn advance_guarded(&self, from: i64, to: i64) -> DbResult<()> {
        let sql = format!(
            "UPDATE sf_meta.schema_version SET version = {to} WHERE version = {from}"
        );
        let affected = self
            .db
            .execute(&sql)
            .await
            .map_err(|e| DbError::VersionUpdate {
                to,
                cause: e.to_string(),
            })?;

        if affected != 1 {
            return Err(DbError::ConcurrentMigration { expected: from });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "version_store_test.rs"]
mod tests;
