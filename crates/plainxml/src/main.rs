//! plainxml CLI - requirements XML renderer.
//!
//! Provides commands for:
//! - `render`: Render a document tree (JSON) to requirements XML
//! - `check-config`: Validate `plainxml.toml` and print resolved settings

mod commands;
mod crosscheck;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckConfigArgs, RenderArgs};
use output::Output;

/// plainxml - render document trees to requirements XML.
#[derive(Parser)]
#[command(name = "plainxml", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a document tree to XML.
    Render(RenderArgs),
    /// Validate the configuration file.
    CheckConfig(CheckConfigArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables DEBUG level, otherwise use RUST_LOG
    let verbose = matches!(&cli.command, Commands::Render(args) if args.verbose);
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::CheckConfig(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
