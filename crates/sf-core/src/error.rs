//! Error types for sf-core

use thiserror::Error;

/// Core error type for Schemaflow
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Migration source directory cannot be listed
    #[error("[E001] Migration source not readable: {path}: {cause}")]
    SourceNotReadable { path: String, cause: String },

    /// E002: Migration file cannot be stat'ed or lacks owner read permission
    #[error("[E002] Migration file not readable: {path}")]
    NotReadable { path: String },

    /// E003: Directory entry where a migration file was expected
    #[error("[E003] Migration entry is a directory: {path}")]
    IsDirectory { path: String },

    /// E004: Filename does not match `<version>.<name>.<up|down>.sql`
    #[error("[E004] Invalid migration name: {path}: {reason}")]
    InvalidName { path: String, reason: String },

    /// E005: Two migrations share a version within one direction
    #[error("[E005] Duplicate {direction} migration for version {version}: {path}")]
    DuplicateVersion {
        version: i64,
        direction: String,
        path: String,
    },

    /// E101: Target specification cannot be parsed
    #[error("[E101] Invalid migration target: '{target}'")]
    InvalidTarget { target: String },

    /// E102: Resolved end version falls outside [0, latest]
    #[error("[E102] Target version {version} out of range (latest is {latest})")]
    OutOfRange { version: i64, latest: i64 },

    /// E103: Target equals the currently recorded version
    #[error("[E103] Schema already at version {version}")]
    AlreadyAtVersion { version: i64 },

    /// E104: Recorded version state violates 0 <= current <= latest
    #[error("[E104] Invalid version state: current {current}, latest {latest}")]
    InvalidVersionState { current: i64, latest: i64 },

    /// E201: Configuration file not found
    #[error("[E201] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E202: Failed to parse configuration file
    #[error("[E202] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// E203: Invalid configuration value
    #[error("[E203] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E204: Failed to write configuration file
    #[error("[E204] Failed to write config {path}: {cause}")]
    ConfigWriteError { path: String, cause: String },

    /// E205: Database locator cannot be resolved to a connection path
    #[error("[E205] Database locator unresolved: {message}")]
    DatabaseLocator { message: String },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
