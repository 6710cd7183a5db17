//! specgate CLI
//!
//! Compare API specification documents and gate on breaking changes.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "specgate")]
#[command(about = "Structural API-spec diff and compatibility gate", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Structural diff between two documents or document sets
    Diff(commands::diff::DiffArgs),
    /// Breaking changes between two documents or document sets
    Breaking(commands::breaking::BreakingArgs),
    /// Per-change changelog with severity levels
    Changelog(commands::changelog::ChangelogArgs),
    /// List the rule ids of the classification catalog
    Checks(commands::checks::ChecksArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Diff(args) => commands::diff::execute(args),
        Commands::Breaking(args) => commands::breaking::execute(args),
        Commands::Changelog(args) => commands::changelog::execute(args),
        Commands::Checks(args) => commands::checks::execute(args),
    };

    match result {
        // A tripped severity gate exits 1; usage/config/load errors exit 2
        Ok(gate_tripped) => std::process::exit(if gate_tripped { 1 } else { 0 }),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    }
}
