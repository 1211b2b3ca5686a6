//! Error types for sf-db

use thiserror::Error;

/// Database and execution errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionFailed(String),

    /// Transaction could not be started (D002)
    #[error("[D002] Failed to start transaction: {0}")]
    TransactionStart(String),

    /// Migration file could not be read (D003)
    #[error("[D003] Failed to read migration file {path}: {cause}")]
    FileRead { path: String, cause: String },

    /// A migration's SQL failed to execute (D004)
    #[error("[D004] Migration v{version} ({file}) failed: {cause}")]
    StatementExecution {
        version: i64,
        file: String,
        cause: String,
    },

    /// Version marker update failed (D005)
    #[error("[D005] Failed to update schema version to {to}: {cause}")]
    VersionUpdate { to: i64, cause: String },

    /// Version marker was moved by another process (D006)
    #[error("[D006] Schema version is no longer {expected}; another migration run intervened")]
    ConcurrentMigration { expected: i64 },

    /// Commit failed (D007)
    #[error("[D007] Commit failed: {0}")]
    CommitFailed(String),

    /// Generic SQL execution error (D008)
    #[error("[D008] SQL execution failed: {0}")]
    Execution(String),

    /// Mutex poisoned (D009)
    #[error("[D009] Database mutex poisoned: {0}")]
    MutexPoisoned(String),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;
