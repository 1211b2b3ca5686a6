//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Schemaflow - versioned SQL schema migrations, applied in one transaction
#[derive(Parser, Debug)]
#[command(name = "sflow")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scaffold a migrations directory, config file, and version table
    Init(InitArgs),

    /// Create an empty up/down migration file pair
    Create(CreateArgs),

    /// Migrate the schema to a target version
    Migrate(MigrateArgs),

    /// Show recorded and database schema versions
    Status(StatusArgs),
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project name written to schemaflow.yml
    #[arg(short, long, default_value = "schemaflow")]
    pub name: String,

    /// Source directory for migrations, relative to the project directory
    #[arg(short, long, default_value = "migrations")]
    pub source: String,

    /// Environment variable holding the database path
    #[arg(long, conflicts_with = "database_path")]
    pub database_env: Option<String>,

    /// Database file path (`:memory:` for an in-memory database)
    #[arg(long)]
    pub database_path: Option<String>,
}

/// Arguments for the create command
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Name of the migration (becomes the second filename component)
    pub name: String,
}

/// Arguments for the migrate command
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Migration target: `latest`, `+N`, `-N`, or an absolute version
    #[arg(short, long, default_value = "latest", allow_hyphen_values = true)]
    pub target: String,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: StatusOutput,
}

/// Status output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutput {
    /// Human-readable key/value lines
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
