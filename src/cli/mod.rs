//! Command-line interface for ndg
//!
//! A single command: read a source file, generate a docstring per function,
//! write them to the output file.

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod generate;

/// Generate docstrings for the functions of a source file with a local LLM
#[derive(Parser)]
#[command(name = "ndg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    args: generate::GenerateArgs,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    verbose: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    generate::run(cli.args)
}
