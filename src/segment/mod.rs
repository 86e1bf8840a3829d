//! Splitting source text into function-like segments.

pub mod delimiter;
pub mod syntax;

pub use delimiter::split_on_delimiter;
pub use syntax::{segment_with_tree_sitter, supported_tree_sitter_languages};

use anyhow::Result;

use crate::domain::{Config, SegmenterKind, Segment, SourceDocument};

/// Segmentation strategy for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segmenter {
    /// Lexical split on a literal token. Nested definitions are split apart.
    Delimiter { token: String },
    /// Definition boundaries taken from a tree-sitter parse.
    Syntax,
}

impl Segmenter {
    pub fn from_config(config: &Config) -> Result<Self> {
        match config.segmenter {
            SegmenterKind::Delimiter => {
                if config.delimiter.is_empty() {
                    anyhow::bail!("Delimiter must not be empty");
                }
                Ok(Segmenter::Delimiter { token: config.delimiter.clone() })
            }
            SegmenterKind::Syntax => Ok(Segmenter::Syntax),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Segmenter::Delimiter { .. } => SegmenterKind::Delimiter.as_str(),
            Segmenter::Syntax => SegmenterKind::Syntax.as_str(),
        }
    }

    pub fn segment(&self, document: &SourceDocument) -> Result<Vec<Segment>> {
        match self {
            Segmenter::Delimiter { token } => Ok(split_on_delimiter(&document.text, token)),
            Segmenter::Syntax => {
                let Some(language) = document.language() else {
                    anyhow::bail!(
                        "Syntax segmenter cannot detect the language of {}. Supported: {}",
                        document.path.display(),
                        supported_tree_sitter_languages().join(", ")
                    );
                };
                segment_with_tree_sitter(&document.text, language)
            }
        }
    }
}
