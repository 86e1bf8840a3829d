//! Neural docstrings: LLM-written docstrings for source files
//!
//! This library provides the pieces of the `ndg` pipeline: reading a source
//! file, segmenting it into functions, generating a docstring per segment
//! through a pluggable backend, and writing the cleaned results.

pub mod cli;
pub mod config;
pub mod domain;
pub mod generate;
pub mod output;
pub mod pipeline;
pub mod segment;
pub mod utils;
