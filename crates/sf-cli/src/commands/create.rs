//! Create command implementation - new up/down migration file pair

use anyhow::{Context, Result};
use sf_core::Direction;
use std::fs;

use crate::cli::{CreateArgs, GlobalArgs};
use crate::commands::common;

/// Execute the create command
pub(crate) async fn execute(args: &CreateArgs, global: &GlobalArgs) -> Result<()> {
    // The name becomes a filename component; dots would break the
    // four-component grammar and separators would escape the source dir.
    if args.name.is_empty()
        || args.name.contains('.')
        || args.name.contains('/')
        || args.name.contains('\\')
    {
        anyhow::bail!(
            "Invalid migration name '{}': must be non-empty and contain no '.', '/', or '\\'",
            args.name
        );
    }

    let (root, mut config) = common::load_config(global)?;
    let source_dir = config.migrations_path_absolute(&root);

    let version = config.latest_version + 1;
    let up_path = source_dir.join(file_name(version, &args.name, Direction::Up));
    let down_path = source_dir.join(file_name(version, &args.name, Direction::Down));

    fs::write(&up_path, "")
        .with_context(|| format!("Failed to create {}", up_path.display()))?;
    if let Err(e) = fs::write(&down_path, "") {
        // Don't leave a half-created pair behind
        let _ = fs::remove_file(&up_path);
        return Err(e).with_context(|| format!("Failed to create {}", down_path.display()));
    }

    config.latest_version = version;
    config
        .save_to_dir(&root)
        .context("Failed to update schemaflow.yml")?;

    println!("Created {}", up_path.display());
    println!("Created {}", down_path.display());
    Ok(())
}

fn file_name(version: i64, name: &str, direction: Direction) -> String {
    format!("{version:06}.{name}.{direction}.sql")
}
