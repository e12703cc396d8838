//! sidenav CLI - sidebar generator for documentation sites.
//!
//! Provides commands for:
//! - `show`: Print resolved sidebars as JSON
//! - `check`: Validate sidebars and report what they contain

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, ShowArgs};
use error::CliError;
use output::Output;

/// sidenav - sidebar generator for documentation sites.
#[derive(Parser)]
#[command(name = "sidenav", version, about)]
struct Cli {
    /// Enable verbose output (show loading and timing logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print resolved sidebars as JSON.
    Show(ShowArgs),
    /// Validate sidebars and print a summary.
    Check(CheckArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli.command, &output) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

fn run(command: Commands, output: &Output) -> Result<(), CliError> {
    let rt = tokio::runtime::Runtime::new()?;
    match command {
        Commands::Show(args) => rt.block_on(args.execute(output)),
        Commands::Check(args) => rt.block_on(args.execute(output)),
    }
}
