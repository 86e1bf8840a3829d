//! ndg: generate docstrings for the functions of a source file
//!
//! Splits a source file into function segments, asks a language model for a
//! docstring per segment and writes the cleaned answers to an output file.

use anyhow::Result;

mod cli;
mod config;
mod domain;
mod generate;
mod output;
mod pipeline;
mod segment;
mod utils;

fn main() -> Result<()> {
    cli::run()
}
