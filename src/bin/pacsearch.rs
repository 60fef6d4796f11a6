//! pacsearch CLI - run adversarial search strategies over scenario files
//!
//! Scenarios are explicit game trees in JSON; see `pacsearch::scenario` for
//! the format. `choose` runs a single configured strategy, `compare` runs
//! all three over the same scenario side by side.

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pacsearch")]
#[command(version, about = "Adversarial game-tree search over scenario files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one search strategy over a scenario
    Choose(pacsearch::cli::ChooseArgs),

    /// Run all three strategies over a scenario side by side
    Compare(pacsearch::cli::CompareArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Choose(args) => pacsearch::cli::choose(args),
        Commands::Compare(args) => pacsearch::cli::compare(args),
    }
}
