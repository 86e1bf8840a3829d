//! CLI argument merging with config

use crate::domain::{BackendKind, Config, SegmenterKind};
use std::path::PathBuf;

#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub model: Option<String>,
    pub system_prompt: Option<String>,
    pub backend: Option<BackendKind>,
    pub ollama_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub segmenter: Option<SegmenterKind>,
    pub delimiter: Option<String>,
    pub progress: Option<bool>,
}

pub fn merge_cli_with_config(mut base_config: Config, cli: CliOverrides) -> Config {
    if let Some(input) = cli.input {
        base_config.input = Some(input);
    }
    if let Some(output) = cli.output {
        base_config.output = Some(output);
    }

    if let Some(model) = cli.model {
        base_config.model = model;
    }
    if let Some(system_prompt) = cli.system_prompt {
        base_config.system_prompt = system_prompt;
    }

    if let Some(backend) = cli.backend {
        base_config.backend = backend;
    }
    if let Some(ollama_url) = cli.ollama_url {
        base_config.ollama_url = ollama_url;
    }
    if let Some(timeout_secs) = cli.timeout_secs {
        base_config.timeout_secs = Some(timeout_secs);
    }

    if let Some(segmenter) = cli.segmenter {
        base_config.segmenter = segmenter;
    }
    if let Some(delimiter) = cli.delimiter {
        base_config.delimiter = delimiter;
    }
    if let Some(progress) = cli.progress {
        base_config.progress = progress;
    }

    base_config
}
