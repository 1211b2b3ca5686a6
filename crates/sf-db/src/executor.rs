//! Transactional migration executor
//!
//! Applies the selected contiguous range of migrations in one database
//! transaction and advances the version marker as part of it. Either the
//! whole range plus the marker update commits, or nothing does.

use crate::error::{DbError, DbResult};
use crate::traits::Database;
use crate::version_store::VersionStore;
use sf_core::{Catalog, Direction, Migration};
use std::time::Instant;

/// One migration applied during a run, for reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMigration {
    pub version: i64,
    pub name: String,
}

/// Outcome of a committed migration run
#[derive(Debug)]
pub struct RunReport {
    pub applied: Vec<AppliedMigration>,
    pub end_version: i64,
    pub elapsed_secs: f64,
}

/// Applies migration ranges from a catalog against a database.
pub struct Executor<'a> {
    catalog: &'a Catalog,
    db: &'a dyn Database,
}

impl<'a> Executor<'a> {
    pub fn new(catalog: &'a Catalog, db: &'a dyn Database) -> Self {
        Self { catalog, db }
    }

    /// Run every migration between `start` (exclusive, the recorded
    /// version) and `end` (inclusive) in `direction`, then advance the
    /// version marker to `end` and commit.
    ///
    /// Any failure leaves the transaction uncommitted; a best-effort
    /// rollback is issued and the original error is returned. The
    /// database is then exactly as it was before the run.
    pub async fn apply(
        &self,
        direction: Direction,
        start: i64,
        end: i64,
    ) -> DbResult<RunReport> {
        let selected = self.catalog.select(direction, start, end);
        let started = Instant::now();

        log::info!(
            "applying {} {} migration(s): {} -> {}",
            selected.len(),
            direction,
            start,
            end
        );

        self.db.begin().await?;

        match self.apply_in_transaction(&selected, start, end).await {
            Ok(applied) => {
                self.db.commit().await?;
                let elapsed_secs = started.elapsed().as_secs_f64();
                log::info!("committed version {} in {:.3}s", end, elapsed_secs);
                Ok(RunReport {
                    applied,
                    end_version: end,
                    elapsed_secs,
                })
            }
            Err(err) => {
                if let Err(rb) = self.db.rollback().await {
                    log::warn!("rollback after failed run also failed: {rb}");
                }
                Err(err)
            }
        }
    }

    async fn apply_in_transaction(
        &self,
        selected: &[&Migration],
        start: i64,
        end: i64,
    ) -> DbResult<Vec<AppliedMigration>> {
        let mut applied = Vec::with_capacity(selected.len());

        for migration in selected {
            let path = migration.path(self.catalog.source());
            let sql = std::fs::read_to_string(&path).map_err(|e| DbError::FileRead {
                path: path.display().to_string(),
                cause: e.to_string(),
            })?;

            self.db
                .execute_batch(&sql)
                .await
                .map_err(|e| DbError::StatementExecution {
                    version: migration.version(),
                    file: migration.file_name().to_string(),
                    cause: e.to_string(),
                })?;

            log::info!(
                "applied v{} {} ({})",
                migration.version(),
                migration.name(),
                migration.direction()
            );
            applied.push(AppliedMigration {
                version: migration.version(),
                name: migration.name().to_string(),
            });
        }

        VersionStore::new(self.db).advance_guarded(start, end).await?;
        Ok(applied)
    }
}

#[cfg(test)]
#[path = "executor_test.rs"]
mod tests;
