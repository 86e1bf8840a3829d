//! Cleaning model output and writing the docstring file.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::domain::{GeneratedDocstring, SAFE_OUTPUT_EXTENSION};

/// Any line holding a backtick, together with its line break.
static FENCE_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^.*`.*\n?").expect("valid regex"));

/// Remove every line that contains a backtick.
///
/// Line-oriented and not a markdown parser: inline code spans take their
/// whole line with them. Applying it twice is the same as applying it once.
pub fn strip_fence_lines(text: &str) -> String {
    FENCE_LINE.replace_all(text, "").into_owned()
}

/// Cleaned docstring followed by the blank-line separator.
pub fn format_docstring(text: &str) -> String {
    let mut formatted = strip_fence_lines(text);
    formatted.push_str("\n\n");
    formatted
}

/// Pick the path the docstrings are written to.
///
/// Both paths must already be resolved. When they name the same file the
/// output is moved to the same stem with the `.ndg` extension; the returned
/// flag says whether that happened. An input that already carries the `.ndg`
/// extension gets a second one appended instead, so the result never names
/// the input file.
pub fn resolve_output_path(input: &Path, output: &Path) -> (PathBuf, bool) {
    if output != input {
        return (output.to_path_buf(), false);
    }

    let has_safe_extension = input
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SAFE_OUTPUT_EXTENSION));
    if !has_safe_extension {
        return (output.with_extension(SAFE_OUTPUT_EXTENSION), true);
    }

    let mut file_name = output.file_name().map(OsString::from).unwrap_or_default();
    file_name.push(".");
    file_name.push(SAFE_OUTPUT_EXTENSION);
    (output.with_file_name(file_name), true)
}

/// Write all docstrings, in order, through one truncating file handle.
///
/// Returns the number of bytes written.
pub fn write_docstrings(path: &Path, docstrings: &[GeneratedDocstring]) -> Result<u64> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    let mut written = 0u64;

    for docstring in docstrings {
        let formatted = format_docstring(&docstring.text);
        writer
            .write_all(formatted.as_bytes())
            .with_context(|| format!("failed to write {}", path.display()))?;
        written += formatted.len() as u64;
    }

    writer.flush().with_context(|| format!("failed to flush {}", path.display()))?;
    Ok(written)
}
