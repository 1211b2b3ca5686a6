//! sf-core - Core library for Schemaflow
//!
//! This crate provides the migration descriptor and filename grammar,
//! catalog discovery, target resolution, and project configuration used
//! across all Schemaflow components. It has no database dependency;
//! everything effectful lives in sf-db.

pub mod catalog;
pub mod config;
pub mod error;
pub mod migration;
pub mod resolver;

pub use catalog::Catalog;
pub use config::{Config, DatabaseConfig, CONFIG_FILE_NAME};
pub use error::{CoreError, CoreResult};
pub use migration::{Direction, Migration};
pub use resolver::{resolve, Plan};
