//! Init command implementation - scaffolds a Schemaflow project

use anyhow::{Context, Result};
use sf_core::{Config, DatabaseConfig, CONFIG_FILE_NAME};
use sf_db::VersionStore;
use std::fs;

use crate::cli::{GlobalArgs, InitArgs};
use crate::commands::common;

/// Execute the init command
pub(crate) async fn execute(args: &InitArgs, global: &GlobalArgs) -> Result<()> {
    if args.database_env.is_none() && args.database_path.is_none() {
        anyhow::bail!("Provide a database location: --database-env VAR or --database-path PATH");
    }

    let root = common::project_root(global);
    let config_path = root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        anyhow::bail!(
            "'{}' already exists. This directory is already initialized.",
            config_path.display()
        );
    }

    let config = Config {
        name: args.name.clone(),
        current_version: 0,
        latest_version: 0,
        migrations_path: args.source.clone(),
        database: DatabaseConfig {
            path: args.database_path.clone(),
            env: args.database_env.clone(),
        },
    };

    let source_dir = config.migrations_path_absolute(&root);
    let created_source = !source_dir.exists();
    fs::create_dir_all(&source_dir)
        .with_context(|| format!("Failed to create directory: {}", source_dir.display()))?;

    config
        .save_to_dir(&root)
        .context("Failed to write schemaflow.yml")?;

    // Bootstrap the version table last; unwind the scaffold if it fails
    // so a re-run starts clean.
    if let Err(e) = bootstrap(&config).await {
        let _ = fs::remove_file(&config_path);
        if created_source {
            let _ = fs::remove_dir(&source_dir);
        }
        return Err(e);
    }

    println!("Initialized migrations directory: {}", source_dir.display());
    println!("Created version table: sf_meta.schema_version");
    println!("To get started, edit {} and run 'sflow create'.", config_path.display());
    Ok(())
}

async fn bootstrap(config: &Config) -> Result<()> {
    let db = common::connect(config)?;
    VersionStore::new(&db)
        .bootstrap()
        .await
        .context("Failed to initialize version table")
}
