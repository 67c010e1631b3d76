//! smartcab CLI - tooling around the tabular Q-learning driving agent
//!
//! Subcommands:
//! - Export epsilon decay curves for analysis
//! - Inspect trained agent snapshots

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "smartcab")]
#[command(version, about = "Tooling for the smartcab Q-learning agent", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export an epsilon decay curve as CSV
    Schedule(smartcab::cli::commands::schedule::ScheduleArgs),

    /// Inspect a saved agent file
    Inspect(smartcab::cli::commands::inspect::InspectArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Schedule(args) => smartcab::cli::commands::schedule::execute(args),
        Commands::Inspect(args) => smartcab::cli::commands::inspect::execute(args),
    }
}
