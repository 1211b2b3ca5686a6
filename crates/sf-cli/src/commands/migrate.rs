//! Migrate command implementation

use anyhow::{Context, Result};
use sf_core::{resolve, Catalog, CoreError};
use sf_db::Executor;

use crate::cli::{GlobalArgs, MigrateArgs};
use crate::commands::common;

/// Execute the migrate command
pub(crate) async fn execute(args: &MigrateArgs, global: &GlobalArgs) -> Result<()> {
    let (root, mut config) = common::load_config(global)?;

    let plan = match resolve(config.current_version, config.latest_version, &args.target) {
        Ok(plan) => plan,
        Err(CoreError::AlreadyAtVersion { version }) => {
            // Friendly no-op: nothing to run, nothing touched
            println!("Schema already at version {version}. Nothing to do.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let source_dir = config.migrations_path_absolute(&root);
    let catalog = Catalog::discover(&source_dir).context("Failed to build migration catalog")?;

    if catalog.latest_version() != config.latest_version {
        log::warn!(
            "catalog latest version {} differs from configured latest_version {}",
            catalog.latest_version(),
            config.latest_version
        );
    }

    let db = common::connect(&config)?;
    let report = Executor::new(&catalog, &db)
        .apply(plan.direction, config.current_version, plan.end_version)
        .await?;

    if global.verbose {
        for migration in &report.applied {
            eprintln!("[verbose] applied v{:06} {}", migration.version, migration.name);
        }
    }

    // Persist the new recorded version only after the commit succeeded;
    // a crash before this point leaves the config one run behind, which
    // `sflow status` surfaces as drift.
    config.current_version = report.end_version;
    config
        .save_to_dir(&root)
        .context("Migration committed, but updating schemaflow.yml failed")?;

    println!(
        "Migrated to version {} ({} migration(s) in {:.3}s)",
        report.end_version,
        report.applied.len(),
        report.elapsed_secs
    );
    Ok(())
}
