//! Shared helpers for CLI commands

use anyhow::{Context, Result};
use sf_core::Config;
use sf_db::DuckDbBackend;
use std::path::{Path, PathBuf};

use crate::cli::GlobalArgs;

/// Project root directory from the global arguments
pub(crate) fn project_root(global: &GlobalArgs) -> PathBuf {
    PathBuf::from(&global.project_dir)
}

/// Load the project configuration, honoring a `--config` override.
///
/// The returned root is where `migrations_path` resolves against and
/// where updated configuration is written back to.
pub(crate) fn load_config(global: &GlobalArgs) -> Result<(PathBuf, Config)> {
    let root = project_root(global);
    let config = if let Some(config_path) = &global.config {
        Config::load(Path::new(config_path)).context("Failed to load configuration file")?
    } else {
        Config::load_from_dir(&root).context("Failed to load project configuration")?
    };
    Ok((root, config))
}

/// Open the database named by the config's locator
pub(crate) fn connect(config: &Config) -> Result<DuckDbBackend> {
    let path = config
        .database
        .resolve_path()
        .context("Failed to resolve database location")?;
    DuckDbBackend::new(&path).context("Failed to connect to database")
}
