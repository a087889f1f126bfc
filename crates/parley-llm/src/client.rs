//! HTTP client for OpenAI-compatible chat-completions endpoints.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CompletionError;
use crate::types::{ChatMessage, CompletionBackend};

fn default_request_timeout_secs() -> u64 {
    30
}

/// Connection settings for the completion service.
///
/// Fields not present in a config file fall back to their defaults, which
/// point at a local Ollama endpoint.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Base URL of the service, without the `/chat/completions` suffix.
    pub base_url: String,
    #[serde(skip_serializing)]
    pub api_key: String,
    /// Model identifier passed through to the service.
    pub model: String,
    /// Request timeout. A hung completion would otherwise block the
    /// conversation indefinitely.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434/v1".to_string(),
            api_key: String::new(),
            model: "llama3.1".to_string(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl fmt::Debug for LlmSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmSettings")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
    stream: bool,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// A reqwest-backed [`CompletionBackend`].
#[derive(Debug, Clone)]
pub struct CompletionClient {
    http: reqwest::Client,
    settings: LlmSettings,
}

impl CompletionClient {
    /// Builds a client from settings.
    ///
    /// # Errors
    ///
    /// Returns `CompletionError::Transport` if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(settings: LlmSettings) -> Result<Self, CompletionError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;
        Ok(Self { http, settings })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl CompletionBackend for CompletionClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        json_only: bool,
    ) -> Result<String, CompletionError> {
        let request = ChatCompletionRequest {
            model: &self.settings.model,
            messages,
            response_format: json_only.then_some(ResponseFormat {
                format_type: "json_object",
            }),
            stream: false,
        };

        let mut builder = self.http.post(self.endpoint()).json(&request);
        if !self.settings.api_key.is_empty() {
            builder = builder.bearer_auth(&self.settings.api_key);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "completion service error");
            return Err(CompletionError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(CompletionError::Transport)?;

        let content = parsed
            .choices
            .first()
            .ok_or(CompletionError::Empty)?
            .message
            .content
            .clone()
            .unwrap_or_default();

        tracing::debug!(chars = content.len(), "completion received");
        Ok(content)
    }
}
