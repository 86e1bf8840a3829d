//! Docstring generation command

use anyhow::Result;
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::domain::{BackendKind, RunStats, SegmenterKind};
use crate::pipeline::Pipeline;

#[derive(Args)]
pub struct GenerateArgs {
    /// Source file to generate docstrings for (required unless set in config)
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// File to write docstrings to (required unless set in config; redirected to .ndg if it is
    /// the input file)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Model used to generate docstrings; must be known to the backend [default: codegemma]
    #[arg(short, long, value_name = "NAME")]
    pub model: Option<String>,

    /// System prompt sent with every segment
    #[arg(short, long = "system", value_name = "TEXT")]
    pub system: Option<String>,

    /// Path to config file (ndg.toml or .ndg.yml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Generation backend: ollama|echo
    #[arg(short, long, value_name = "NAME")]
    pub backend: Option<String>,

    /// Base URL of the Ollama server
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Give up on a single request after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Segmentation strategy: delimiter|syntax
    #[arg(long, value_name = "STRATEGY")]
    pub segmenter: Option<String>,

    /// Token the delimiter strategy splits on [default: "def "]
    #[arg(short, long, value_name = "TOKEN")]
    pub delimiter: Option<String>,

    /// Do not draw a progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

pub fn run(args: GenerateArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let file_config = load_config(&cwd, args.config.as_deref())?;

    let backend =
        if args.backend.is_some() { Some(parse_backend(args.backend.as_deref())?) } else { None };
    let segmenter = if args.segmenter.is_some() {
        Some(parse_segmenter(args.segmenter.as_deref())?)
    } else {
        None
    };

    let cli_overrides = CliOverrides {
        input: args.input.clone(),
        output: args.output.clone(),
        model: args.model.clone(),
        system_prompt: args.system.clone(),
        backend,
        ollama_url: args.url.clone(),
        timeout_secs: args.timeout,
        segmenter,
        delimiter: args.delimiter.clone(),
        progress: if args.no_progress { Some(false) } else { None },
    };
    let merged = merge_cli_with_config(file_config, cli_overrides);

    if args.print_config {
        print!("{}", toml::to_string_pretty(&merged)?);
        return Ok(());
    }

    if merged.input.is_none() || merged.output.is_none() {
        anyhow::bail!("Both --input and --output must be specified");
    }

    let pipeline = Pipeline::from_config(&merged, &cwd)?;
    let progress = build_progress_bar(merged.progress);
    let stats = pipeline.run(&progress)?;

    print_summary(&pipeline, &stats);
    Ok(())
}

fn build_progress_bar(enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(0);
    if let Ok(bar_style) =
        ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({elapsed})")
    {
        bar.set_style(bar_style.progress_chars("#>-"));
    }
    bar.set_message("Generating docstrings...");
    bar
}

fn print_summary(pipeline: &Pipeline, stats: &RunStats) {
    println!();
    println!("{}", style("Docstrings generated!").green().bold());
    println!();
    println!("Statistics:");
    println!("  Source:          {}", pipeline.input_path().display());
    println!("  Segments found:  {}", stats.segments_found);
    println!("  Docstrings:      {}", stats.docstrings_written);
    println!("  Bytes written:   {}", stats.bytes_written);
    println!("  Processing time: {:.2}s", stats.processing_time_seconds);
    println!();
    println!("Output file:");
    println!("  {}", pipeline.output_path().display());
    if pipeline.output_redirected() {
        println!(
            "  {}",
            style("(output path was the source file; wrote to the .ndg file instead)").yellow()
        );
    }
}

fn parse_backend(backend: Option<&str>) -> Result<BackendKind> {
    match backend.unwrap_or("ollama").to_ascii_lowercase().as_str() {
        "ollama" => Ok(BackendKind::Ollama),
        "echo" => Ok(BackendKind::Echo),
        invalid => anyhow::bail!("Invalid backend '{invalid}'. Use: ollama|echo"),
    }
}

fn parse_segmenter(segmenter: Option<&str>) -> Result<SegmenterKind> {
    match segmenter.unwrap_or("delimiter").to_ascii_lowercase().as_str() {
        "delimiter" | "naive" => Ok(SegmenterKind::Delimiter),
        "syntax" | "tree-sitter" | "treesitter" => Ok(SegmenterKind::Syntax),
        invalid => anyhow::bail!("Invalid segmenter '{invalid}'. Use: delimiter|syntax"),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_backend, parse_segmenter};
    use crate::domain::{BackendKind, SegmenterKind};

    #[test]
    fn backend_names_are_case_insensitive() {
        assert_eq!(parse_backend(Some("Echo")).expect("echo"), BackendKind::Echo);
        assert_eq!(parse_backend(None).expect("default"), BackendKind::Ollama);
        assert!(parse_backend(Some("openai")).is_err());
    }

    #[test]
    fn segmenter_aliases() {
        assert_eq!(parse_segmenter(Some("tree-sitter")).expect("syntax"), SegmenterKind::Syntax);
        assert_eq!(parse_segmenter(Some("naive")).expect("naive"), SegmenterKind::Delimiter);
        let err = parse_segmenter(Some("ast")).unwrap_err();
        assert!(err.to_string().contains("Invalid segmenter"));
    }
}
