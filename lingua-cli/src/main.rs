//! Lingua — incremental locale-file translation CLI.
//!
//! # Usage
//!
//! ```text
//! lingua sync [--dry-run] [--revision <rev>] [--root <path>]
//! lingua diff [--root <path>]
//! lingua status [--root <path>]
//! ```
//!
//! Project configuration lives in `lingua.yaml` at the project root; the
//! translation credential comes from `LINGUA_API_KEY` (with `LINGUA_API_BASE`
//! and `LINGUA_MODEL` as optional overrides).

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{diff::DiffArgs, status::StatusArgs, sync::SyncArgs};

#[derive(Parser, Debug)]
#[command(
    name = "lingua",
    version,
    about = "Incrementally translate per-locale string files from a canonical source document",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate changed source keys into every configured locale.
    Sync(SyncArgs),

    /// Show which source keys changed since the last synchronized revision.
    Diff(DiffArgs),

    /// Show the recorded checkpoint and per-locale target files.
    Status(StatusArgs),
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Sync(args) => args.run(),
        Commands::Diff(args) => args.run(),
        Commands::Status(args) => args.run(),
    }
}
