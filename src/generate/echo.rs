//! Offline backend for dry runs.

use super::{ChatPrompt, DocstringGenerator, GenerateError};
use crate::domain::BackendKind;

/// Returns the user payload inside a markdown code fence, the way chat models
/// commonly wrap code. Never fails and never touches the network.
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoGenerator;

impl DocstringGenerator for EchoGenerator {
    fn name(&self) -> &str {
        BackendKind::Echo.as_str()
    }

    fn generate(&self, prompt: &ChatPrompt<'_>) -> Result<String, GenerateError> {
        Ok(format!("```\n{}\n```", prompt.user))
    }
}
