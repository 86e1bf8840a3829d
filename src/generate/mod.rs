//! Docstring generation backends.
//!
//! A backend takes a two-role chat prompt (system instructions plus one code
//! segment) and returns the model's raw text. Backends are selected at runtime
//! from [`BackendKind`]; every call blocks until the backend answers.

pub mod echo;
pub mod ollama;

pub use echo::EchoGenerator;
pub use ollama::OllamaGenerator;

use thiserror::Error;

use crate::domain::{BackendKind, Config};

/// System + user prompt for a single segment
#[derive(Debug, Clone, Copy)]
pub struct ChatPrompt<'a> {
    /// Model identifier understood by the backend
    pub model: &'a str,
    /// Instructions sent in the system role
    pub system: &'a str,
    /// Code segment sent in the user role
    pub user: &'a str,
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("request to generation backend failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("generation backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("generation backend reported an error: {0}")]
    Backend(String),

    #[error("generation backend returned a malformed response: {0}")]
    MalformedResponse(String),
}

/// Something that turns a chat prompt into generated text.
pub trait DocstringGenerator {
    fn name(&self) -> &str;

    fn generate(&self, prompt: &ChatPrompt<'_>) -> Result<String, GenerateError>;
}

/// Build the backend named by `config.backend`.
pub fn build_generator(config: &Config) -> Result<Box<dyn DocstringGenerator>, GenerateError> {
    match config.backend {
        BackendKind::Ollama => {
            Ok(Box::new(OllamaGenerator::new(&config.ollama_url, config.timeout_secs)?))
        }
        BackendKind::Echo => Ok(Box::new(EchoGenerator)),
    }
}
