//! CLI command definitions.

pub mod conflicts;
pub mod entities;
pub mod recurrence;

use clap::{Parser, Subcommand, ValueEnum};

/// Caching CLI client for the campsync API.
#[derive(Debug, Parser)]
#[command(name = "campsync")]
#[command(version, about = "Caching CLI client for the campsync API", long_about = None)]
pub struct Cli {
    /// Server base URL.
    #[arg(long, env = "CAMPSYNC_URL", default_value = "http://localhost:8080")]
    pub base_url: String,

    /// Bearer token for authenticated requests.
    #[arg(long, env = "CAMPSYNC_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    /// Print request cache statistics to stderr after the command.
    #[arg(long)]
    pub cache_stats: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Camp-scoped entity management.
    Entities(entities::EntitiesCommand),
    /// Recurring event rules.
    Recurrence(recurrence::RecurrenceCommand),
    /// Schedule conflict checks.
    Conflicts(conflicts::ConflictsCommand),
    /// Show the signed-in user and what they may do.
    Whoami {
        /// Report the role and allowed actions in this camp.
        #[arg(long)]
        camp: Option<String>,
    },
}
