//! The docstring pipeline: read → segment → generate → write.
//!
//! Every stage runs to completion before the next one starts and any error
//! ends the run. Generation results are only written once every segment has
//! been answered, so a failing backend leaves no output file behind.

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn};

use crate::domain::{Config, GeneratedDocstring, RunStats, SourceDocument};
use crate::generate::{build_generator, ChatPrompt, DocstringGenerator};
use crate::output::{resolve_output_path, write_docstrings};
use crate::segment::Segmenter;
use crate::utils::{read_file_safe, resolve_path};

/// Where a run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Reading,
    Segmenting,
    /// 1-indexed segment currently waiting on the backend
    Generating { current: usize, total: usize },
    Writing,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Idle => f.write_str("idle"),
            Stage::Reading => f.write_str("reading"),
            Stage::Segmenting => f.write_str("segmenting"),
            Stage::Generating { current, total } => write!(f, "generating ({current}/{total})"),
            Stage::Writing => f.write_str("writing"),
            Stage::Done => f.write_str("done"),
            Stage::Failed => f.write_str("failed"),
        }
    }
}

pub struct Pipeline {
    input: PathBuf,
    output: PathBuf,
    output_redirected: bool,
    model: String,
    system_prompt: String,
    segmenter: Segmenter,
    generator: Box<dyn DocstringGenerator>,
}

impl Pipeline {
    /// Build a pipeline with the backend named in `config`.
    pub fn from_config(config: &Config, cwd: &Path) -> Result<Self> {
        let generator = build_generator(config).context("failed to set up generation backend")?;
        Self::with_generator(config, cwd, generator)
    }

    /// Build a pipeline around an already constructed backend.
    pub fn with_generator(
        config: &Config,
        cwd: &Path,
        generator: Box<dyn DocstringGenerator>,
    ) -> Result<Self> {
        let (Some(input), Some(output)) = (config.input.as_deref(), config.output.as_deref())
        else {
            anyhow::bail!("Both --input and --output must be specified");
        };

        let input = resolve_path(input, cwd);
        let (output, output_redirected) = resolve_output_path(&input, &resolve_path(output, cwd));
        if output_redirected {
            warn!(
                input = %input.display(),
                output = %output.display(),
                "output path is the input file; writing to the alternate extension instead"
            );
        }

        Ok(Self {
            input,
            output,
            output_redirected,
            model: config.model.clone(),
            system_prompt: config.system_prompt.clone(),
            segmenter: Segmenter::from_config(config)?,
            generator,
        })
    }

    pub fn input_path(&self) -> &Path {
        &self.input
    }

    pub fn output_path(&self) -> &Path {
        &self.output
    }

    pub fn output_redirected(&self) -> bool {
        self.output_redirected
    }

    /// Run every stage once. `progress` advances by one per generated segment.
    pub fn run(&self, progress: &ProgressBar) -> Result<RunStats> {
        let start = Instant::now();
        let mut stage = Stage::Idle;

        info!(
            input = %self.input.display(),
            output = %self.output.display(),
            model = %self.model,
            backend = self.generator.name(),
            segmenter = self.segmenter.name(),
            "starting docstring generation"
        );

        match self.execute(progress, &mut stage) {
            Ok(mut stats) => {
                advance(&mut stage, Stage::Done);
                stats.processing_time_seconds = start.elapsed().as_secs_f64();
                Ok(stats)
            }
            Err(err) => {
                progress.abandon();
                error!(stage = %stage, error = %err, "pipeline failed");
                advance(&mut stage, Stage::Failed);
                Err(err)
            }
        }
    }

    fn execute(&self, progress: &ProgressBar, stage: &mut Stage) -> Result<RunStats> {
        advance(stage, Stage::Reading);
        let (text, encoding) = read_file_safe(&self.input)
            .with_context(|| format!("failed to read source file {}", self.input.display()))?;
        debug!(encoding, bytes = text.len(), "source read");
        let document = SourceDocument::new(&self.input, text);

        advance(stage, Stage::Segmenting);
        let segments = self.segmenter.segment(&document)?;
        drop(document);
        let total = segments.len();
        debug!(segments = total, "source segmented");

        progress.set_length(total as u64);
        let mut docstrings = Vec::with_capacity(total);
        for segment in &segments {
            advance(stage, Stage::Generating { current: segment.ordinal + 1, total });
            let prompt = ChatPrompt {
                model: &self.model,
                system: &self.system_prompt,
                user: &segment.text,
            };
            let text = self.generator.generate(&prompt).with_context(|| {
                format!(
                    "failed to generate docstring for segment {} of {}",
                    segment.ordinal + 1,
                    total
                )
            })?;
            docstrings.push(GeneratedDocstring { ordinal: segment.ordinal, text });
            progress.inc(1);
        }
        progress.finish_and_clear();

        advance(stage, Stage::Writing);
        let bytes_written = write_docstrings(&self.output, &docstrings)?;

        Ok(RunStats {
            segments_found: total,
            docstrings_written: docstrings.len(),
            bytes_written,
            output_path: self.output.clone(),
            output_redirected: self.output_redirected,
            processing_time_seconds: 0.0,
        })
    }
}

fn advance(stage: &mut Stage, next: Stage) {
    debug!(from = %stage, to = %next, "pipeline stage");
    *stage = next;
}

#[cfg(test)]
mod tests {
    use super::{Pipeline, Stage};
    use crate::domain::{BackendKind, Config};
    use crate::generate::{ChatPrompt, DocstringGenerator, GenerateError};
    use indicatif::ProgressBar;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;
    use tempfile::TempDir;

    /// Records prompts and answers with a numbered fenced reply.
    #[derive(Default, Clone)]
    struct Recording {
        prompts: Rc<RefCell<Vec<(String, String, String)>>>,
    }

    impl DocstringGenerator for Recording {
        fn name(&self) -> &str {
            "recording"
        }

        fn generate(&self, prompt: &ChatPrompt<'_>) -> Result<String, GenerateError> {
            let mut prompts = self.prompts.borrow_mut();
            prompts.push((
                prompt.model.to_string(),
                prompt.system.to_string(),
                prompt.user.to_string(),
            ));
            Ok(format!("```\ndoc {}\n```", prompts.len()))
        }
    }

    fn config(dir: &TempDir, input: &str, output: &str) -> Config {
        Config {
            input: Some(dir.path().join(input)),
            output: Some(dir.path().join(output)),
            backend: BackendKind::Echo,
            ..Config::default()
        }
    }

    #[test]
    fn stage_display() {
        assert_eq!(Stage::Generating { current: 2, total: 5 }.to_string(), "generating (2/5)");
        assert_eq!(Stage::Failed.to_string(), "failed");
    }

    #[test]
    fn missing_paths_are_rejected() {
        let cwd = PathBuf::from("/");
        let Err(err) = Pipeline::from_config(&Config::default(), &cwd) else {
            panic!("pipeline without paths must not build");
        };
        assert!(err.to_string().contains("--input and --output"));
    }

    #[test]
    fn prompts_follow_source_order() {
        let dir = TempDir::new().expect("temp dir");
        let source = "import os\ndef a():\n    pass\ndef b():\n    pass\n";
        std::fs::write(dir.path().join("app.py"), source).expect("write source");

        let recording = Recording::default();
        let mut cfg = config(&dir, "app.py", "docs.txt");
        cfg.model = "llama2".to_string();
        cfg.system_prompt = "sys".to_string();
        let pipeline = Pipeline::with_generator(&cfg, dir.path(), Box::new(recording.clone()))
            .expect("pipeline");
        let stats = pipeline.run(&ProgressBar::hidden()).expect("run");

        assert_eq!(stats.segments_found, 2);
        assert_eq!(stats.docstrings_written, 2);
        assert!(!stats.output_redirected);

        let prompts = recording.prompts.borrow();
        assert_eq!(prompts[0].0, "llama2");
        assert_eq!(prompts[0].1, "sys");
        assert_eq!(prompts[0].2, "a():\n    pass");
        assert_eq!(prompts[1].2, "b():\n    pass");

        let content = std::fs::read_to_string(dir.path().join("docs.txt")).expect("output");
        assert_eq!(content, "doc 1\n\n\ndoc 2\n\n\n");
    }
}
