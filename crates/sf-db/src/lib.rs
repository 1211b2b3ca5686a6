//! sf-db - Database layer for Schemaflow
//!
//! This crate provides the `Database` trait, the DuckDB backend, the
//! persisted version store, and the transactional migration executor.

pub mod duckdb;
pub mod error;
pub mod executor;
pub mod traits;
pub mod version_store;

pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use executor::{AppliedMigration, Executor, RunReport};
pub use traits::Database;
pub use version_store::VersionStore;
