//! # kb - Kanban task board
//!
//! A three-column kanban board (To Do, In Progress, Completed) for the
//! terminal, with a scriptable CLI and an interactive board view.
//!
//! ## Key Features
//!
//! - **Task and category services**: create, update, delete, archive and move
//!   tasks; categories carry a colour token and a recountable task count
//! - **Completion tracking**: `completedAt` is stamped when a task reaches the
//!   Completed column and cleared when it leaves
//! - **Filtering**: free-text search over title and description combined with
//!   category and status filters, grouped into board columns
//! - **Interactive board**: move cards with Ctrl+Left/Right, quick-add, search
//!   and archive without leaving the terminal
//!
//! ## Quick Start
//!
//! ```bash
//! # Open the board over the built-in sample tasks
//! kb board
//!
//! # List tasks grouped into columns
//! kb list --columns
//!
//! # Add a task due on Friday
//! kb add "Write release notes" --category Work --priority high --due friday
//!
//! # Use your own seed document
//! kb --seed board.json list --status in-progress --json
//! ```
//!
//! The board is held in memory for the lifetime of the process. It starts
//! from a seed document (`--seed`, or the built-in sample board) and changes
//! are not written back.
//!
//! ## Configuration
//!
//! Defaults are read from `--config`, `$KANBAN_CONFIG`, or
//! `~/.kanban/config.toml`:
//!
//! ```toml
//! [defaults]
//! category = "General"
//! category_color = "#3B82F6"
//!
//! [board]
//! show_archived = false
//! ```
//!
//! Logging is off unless `RUST_LOG` is set, e.g. `RUST_LOG=kb=debug`.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub mod category;
pub mod category_service;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod dates;
pub mod display;
pub mod error;
pub mod fields;
pub mod filter;
pub mod store;
pub mod task;
pub mod task_service;
pub mod tui {
    pub mod board;
    pub mod board_run;
    pub mod colors;
    pub mod enums;
    pub mod input;
}

use cli::Cli;
use cmd::*;
use config::Config;
use display::OutputOptions;
use error::{JsonError, Result};
use store::EntityStore;

fn init_tracing() {
    // Tracing is opt-in via RUST_LOG and writes to stderr so stdout stays parseable.
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() || raw.len() > 4096 {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    // Completions need neither config nor a seeded store
    if let Commands::Completions { shell } = cli.command {
        cmd_completions(shell);
        return Ok(());
    }

    let config = Config::resolve(cli.config.as_deref());
    let mut store = EntityStore::open(cli.seed.as_deref(), config.defaults.clone())?;
    let out = OutputOptions { json: cli.json };

    match cli.command {
        Commands::Completions { .. } => Ok(()),
        Commands::Board => cmd_board(&mut store, &config),

        Commands::List {
            query,
            category,
            status,
            columns,
            hide_archived,
        } => cmd_list(&mut store, out, query, category, status, columns, hide_archived),

        Commands::Show { id } => cmd_show(&mut store, out, id),

        Commands::Add {
            title,
            desc,
            category,
            priority,
            status,
            due,
        } => cmd_add(&mut store, out, title, desc, category, priority, status, due),

        Commands::Update {
            id,
            title,
            desc,
            category,
            priority,
            status,
            due,
        } => cmd_update(&mut store, out, id, title, desc, category, priority, status, due),

        Commands::Move { id, status } => cmd_move(&mut store, out, id, status),
        Commands::Delete { id } => cmd_delete(&mut store, out, id),
        Commands::Archive { id } => cmd_archive(&mut store, out, id, true),
        Commands::Unarchive { id } => cmd_archive(&mut store, out, id, false),
        Commands::Stats => cmd_stats(&mut store, out),
        Commands::Categories { recount } => cmd_categories(&mut store, out, recount),
        Commands::Category { action } => cmd_category(&mut store, out, action),
    }
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let json = cli.json;
    if let Err(err) = run(cli) {
        if json {
            match serde_json::to_string(&JsonError::from(&err)) {
                Ok(body) => println!("{body}"),
                Err(_) => eprintln!("Error: {err}"),
            }
        } else {
            eprintln!("Error: {err}");
        }
        std::process::exit(err.exit_code());
    }
}
