//! canonmd CLI - Canonical markdown formatter.
//!
//! Provides commands for:
//! - `fmt`: Print or rewrite markdown files in canonical form
//! - `check`: Report files that are not in canonical form

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, FmtArgs};
use output::Output;

/// canonmd - Canonical markdown formatter.
#[derive(Parser)]
#[command(name = "canonmd", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Format markdown files (or stdin) into canonical form.
    Fmt(FmtArgs),
    /// Check that markdown files are already in canonical form.
    Check(CheckArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Fmt(args) => args.format.verbose,
        Commands::Check(args) => args.format.verbose,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Fmt(args) => args.execute(),
        Commands::Check(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
