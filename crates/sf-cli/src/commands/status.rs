//! Status command implementation

use anyhow::{Context, Result};
use serde::Serialize;
use sf_db::VersionStore;

use crate::cli::{GlobalArgs, StatusArgs, StatusOutput};
use crate::commands::common;

/// Version state as seen from the config file and the database
#[derive(Debug, Serialize)]
struct StatusReport {
    current_version: i64,
    latest_version: i64,
    database_version: i64,
    drift: bool,
}

/// Execute the status command
pub(crate) async fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let (_root, config) = common::load_config(global)?;

    let db = common::connect(&config)?;
    let database_version = VersionStore::new(&db)
        .read()
        .await
        .context("Failed to read schema version from database")?;

    let report = StatusReport {
        current_version: config.current_version,
        latest_version: config.latest_version,
        database_version,
        drift: config.current_version != database_version,
    };

    match args.output {
        StatusOutput::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        StatusOutput::Table => {
            println!("Current version:   {}", report.current_version);
            println!("Latest version:    {}", report.latest_version);
            println!("DB schema version: {}", report.database_version);
            if report.drift {
                // The one crash window: transaction committed but the
                // config write never happened.
                eprintln!(
                    "warning: recorded version {} disagrees with database version {}",
                    report.current_version, report.database_version
                );
            }
        }
    }
    Ok(())
}
