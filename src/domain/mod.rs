//! Core domain types and models
//!
//! Defines the run configuration plus the values that flow through the
//! pipeline: SourceDocument, Segment, GeneratedDocstring and RunStats.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "codegemma";

/// Token that introduces a function definition in Python source.
pub const DEFAULT_DELIMITER: &str = "def ";

/// Base URL of a local Ollama server.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Extension used when the output path would overwrite the input file.
pub const SAFE_OUTPUT_EXTENSION: &str = "ndg";

/// Instructions sent in the system role of every request.
pub const DEFAULT_SYSTEM_PROMPT: &str = "This file contains code for counting lines of code of software projects.
Generate suitable docstring for these Python functions in Google's style.
Do not explain the result.
Only return the docstring and function declaration.
Return as raw text.";

/// Generation backend selected at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Local Ollama server over HTTP
    #[default]
    Ollama,
    /// Offline backend that returns the payload inside a code fence
    Echo,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Ollama => "ollama",
            BackendKind::Echo => "echo",
        }
    }
}

/// How source text is cut into segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SegmenterKind {
    /// Split on every literal occurrence of the delimiter token
    #[default]
    Delimiter,
    /// Locate callable definitions with tree-sitter
    Syntax,
}

impl SegmenterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmenterKind::Delimiter => "delimiter",
            SegmenterKind::Syntax => "syntax",
        }
    }
}

/// Configuration for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source file to generate docstrings for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<PathBuf>,

    /// File the docstrings are written to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Model identifier passed to the backend
    pub model: String,

    /// System-role prompt text
    pub system_prompt: String,

    /// Generation backend
    pub backend: BackendKind,

    /// Base URL of the Ollama server
    pub ollama_url: String,

    /// Per-request timeout in seconds (unset waits indefinitely)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Segmentation strategy
    pub segmenter: SegmenterKind,

    /// Token the delimiter strategy splits on
    pub delimiter: String,

    /// Draw a progress bar while generating
    pub progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            model: DEFAULT_MODEL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            backend: BackendKind::default(),
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            timeout_secs: None,
            segmenter: SegmenterKind::default(),
            delimiter: DEFAULT_DELIMITER.to_string(),
            progress: true,
        }
    }
}

/// Full text of the file being documented
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Resolved path the text was read from
    pub path: PathBuf,

    /// File content with original line terminators
    pub text: String,
}

impl SourceDocument {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self { path: path.into(), text: text.into() }
    }

    /// Language name derived from the file extension, if recognised.
    pub fn language(&self) -> Option<&'static str> {
        let ext = self.path.extension().and_then(|e| e.to_str())?;
        get_language(ext)
    }
}

/// One function-like chunk of source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Position in source order (0-indexed)
    pub ordinal: usize,

    /// Trimmed segment text
    pub text: String,
}

/// Raw model output for one segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocstring {
    /// Ordinal of the segment this was generated for
    pub ordinal: usize,

    /// Text exactly as the backend returned it
    pub text: String,
}

/// Statistics from a completed run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    /// Segments produced by the segmenter
    pub segments_found: usize,

    /// Docstrings written to the output file
    pub docstrings_written: usize,

    /// Bytes written to the output file
    pub bytes_written: u64,

    /// Path the output actually went to
    pub output_path: PathBuf,

    /// Whether the output was redirected away from the input file
    pub output_redirected: bool,

    /// Wall-clock duration of the run
    pub processing_time_seconds: f64,
}

/// Map a file extension (without the dot) to a language name.
pub fn get_language(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "py" | "pyi" | "pyw" => Some("python"),
        "rs" => Some("rust"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_cli_defaults() {
        let config = Config::default();
        assert_eq!(config.model, "codegemma");
        assert_eq!(config.delimiter, "def ");
        assert_eq!(config.backend, BackendKind::Ollama);
        assert_eq!(config.segmenter, SegmenterKind::Delimiter);
        assert!(config.timeout_secs.is_none());
        assert!(config.system_prompt.contains("Google's style"));
    }

    #[test]
    fn language_is_detected_from_extension() {
        assert_eq!(SourceDocument::new("/tmp/a.py", "").language(), Some("python"));
        assert_eq!(SourceDocument::new("/tmp/a.RS", "").language(), Some("rust"));
        assert_eq!(SourceDocument::new("/tmp/a.go", "").language(), None);
        assert_eq!(SourceDocument::new("/tmp/Makefile", "").language(), None);
    }
}
