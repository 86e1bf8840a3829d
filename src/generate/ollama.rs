//! Ollama chat backend.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::{ChatPrompt, DocstringGenerator, GenerateError};
use crate::domain::BackendKind;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    message: Option<ResponseMessage>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Talks to `POST {base_url}/api/chat` with streaming disabled.
pub struct OllamaGenerator {
    client: Client,
    endpoint: String,
}

impl OllamaGenerator {
    /// `timeout_secs` of `None` waits for the model indefinitely.
    pub fn new(base_url: &str, timeout_secs: Option<u64>) -> Result<Self, GenerateError> {
        let mut builder = Client::builder().timeout(timeout_secs.map(Duration::from_secs));
        // Proxy settings from the environment would otherwise capture a local server.
        if is_loopback(base_url) {
            builder = builder.no_proxy();
        }
        Ok(Self { client: builder.build()?, endpoint: chat_endpoint(base_url) })
    }
}

impl DocstringGenerator for OllamaGenerator {
    fn name(&self) -> &str {
        BackendKind::Ollama.as_str()
    }

    fn generate(&self, prompt: &ChatPrompt<'_>) -> Result<String, GenerateError> {
        let request = build_request(prompt);
        debug!(
            endpoint = %self.endpoint,
            model = prompt.model,
            bytes = prompt.user.len(),
            "ollama chat request"
        );

        let response = self.client.post(&self.endpoint).json(&request).send()?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(GenerateError::Status { status: status.as_u16(), body });
        }

        parse_response(&body)
    }
}

fn chat_endpoint(base_url: &str) -> String {
    format!("{}/api/chat", base_url.trim_end_matches('/'))
}

fn is_loopback(base_url: &str) -> bool {
    reqwest::Url::parse(base_url)
        .ok()
        .and_then(|url| url.host_str().map(|h| matches!(h, "localhost" | "127.0.0.1" | "[::1]")))
        .unwrap_or(false)
}

fn build_request<'a>(prompt: &ChatPrompt<'a>) -> ChatRequest<'a> {
    ChatRequest {
        model: prompt.model,
        messages: [
            ChatMessage { role: "system", content: prompt.system },
            ChatMessage { role: "user", content: prompt.user },
        ],
        stream: false,
    }
}

fn parse_response(body: &str) -> Result<String, GenerateError> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|err| GenerateError::MalformedResponse(err.to_string()))?;

    if let Some(error) = parsed.error {
        return Err(GenerateError::Backend(error));
    }
    parsed
        .message
        .map(|m| m.content)
        .ok_or_else(|| GenerateError::MalformedResponse("missing `message` field".to_string()))
}
