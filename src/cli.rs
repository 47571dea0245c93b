use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Kanban task board with To Do, In Progress and Completed columns.
/// The board starts from a seed document (built in, or --seed) and lives
/// only as long as the process.
#[derive(Parser)]
#[command(name = "kb", version, about = "Kanban task board")]
pub struct Cli {
    /// JSON seed document with `tasks` and `categories` arrays.
    #[arg(long, global = true)]
    pub seed: Option<PathBuf>,

    /// Path to the TOML config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print records as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}
