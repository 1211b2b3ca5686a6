//! Configuration types and parsing for schemaflow.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the project configuration file
pub const CONFIG_FILE_NAME: &str = "schemaflow.yml";

/// Main project configuration from schemaflow.yml
///
/// `current_version` is the engine's external record of the last version
/// successfully committed; the CLI rewrites it only after a migration run
/// commits, so a failed run leaves it untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Project name
    pub name: String,

    /// Last schema version successfully applied and committed
    #[serde(default)]
    pub current_version: i64,

    /// Highest version that exists in the migration source
    #[serde(default)]
    pub latest_version: i64,

    /// Directory containing migration SQL files
    #[serde(default = "default_migrations_path")]
    pub migrations_path: String,

    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Where the database lives: either a direct path, or the name of an
/// environment variable that resolves to one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database file path (`:memory:` for an in-memory database)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Environment variable holding the database path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
}

fn default_migrations_path() -> String {
    "migrations".to_string()
}

impl Config {
    /// Load configuration from a specific file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::ConfigParseError {
            message: format!("{}: {}", path.display(), e),
        })?;

        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| CoreError::ConfigParseError {
                message: format!("{}: {}", path.display(), e),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `schemaflow.yml` in a project directory
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        Self::load(&dir.join(CONFIG_FILE_NAME))
    }

    /// Write configuration back to `schemaflow.yml` in a project directory
    pub fn save_to_dir(&self, dir: &Path) -> CoreResult<()> {
        let path = dir.join(CONFIG_FILE_NAME);
        let yaml = serde_yaml::to_string(self).map_err(|e| CoreError::ConfigWriteError {
            path: path.display().to_string(),
            cause: e.to_string(),
        })?;
        std::fs::write(&path, yaml).map_err(|e| CoreError::ConfigWriteError {
            path: path.display().to_string(),
            cause: e.to_string(),
        })
    }

    /// Check the version invariant and the database locator shape
    pub fn validate(&self) -> CoreResult<()> {
        if self.current_version < 0 || self.latest_version < 0 {
            return Err(CoreError::ConfigInvalid {
                message: "versions must be non-negative".to_string(),
            });
        }
        if self.current_version > self.latest_version {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "current_version {} exceeds latest_version {}",
                    self.current_version, self.latest_version
                ),
            });
        }
        if self.database.path.is_some() && self.database.env.is_some() {
            return Err(CoreError::ConfigInvalid {
                message: "database: set either 'path' or 'env', not both".to_string(),
            });
        }
        Ok(())
    }

    /// Migration source directory resolved against the project root
    pub fn migrations_path_absolute(&self, root: &Path) -> PathBuf {
        let path = Path::new(&self.migrations_path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            root.join(path)
        }
    }
}

impl DatabaseConfig {
    /// Resolve the locator to a concrete database path
    pub fn resolve_path(&self) -> CoreResult<String> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }
        let var = self.env.as_deref().ok_or_else(|| CoreError::DatabaseLocator {
            message: "neither 'path' nor 'env' is configured".to_string(),
        })?;
        match std::env::var(var) {
            Ok(value) if !value.is_empty() => Ok(value),
            _ => Err(CoreError::DatabaseLocator {
                message: format!("environment variable '{var}' is unset or empty"),
            }),
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
