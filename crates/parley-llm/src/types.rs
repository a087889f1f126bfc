//! Message and response-contract types for the completion adapter.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CompletionError;

/// Chat message roles, serialised in OpenAI wire spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One role/content message in a completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// The seam between sessions and the completion service.
///
/// Production code uses [`crate::CompletionClient`]; tests script this trait
/// with canned responses.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Sends one request and returns the raw assistant text.
    ///
    /// `json_only` asks the service for a JSON-object response mode, used by
    /// intake agents whose replies must parse as [`CompletionResult`].
    async fn complete(
        &self,
        messages: &[ChatMessage],
        json_only: bool,
    ) -> Result<String, CompletionError>;
}

/// The structured turn result an intake agent expects from the model.
///
/// Agent variants historically used slightly different key names
/// (`reply` vs `message`, `updates` vs `lead_updates`); the aliases accept
/// both so one contract covers every variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResult {
    /// The sentence to speak back to the caller.
    #[serde(alias = "message")]
    pub reply: String,

    /// Field updates extracted from the utterance. `null` or `{}` when the
    /// utterance carried no new information.
    #[serde(default, alias = "lead_updates")]
    pub updates: serde_json::Value,

    /// The model considers the conversation complete.
    #[serde(default)]
    pub done: bool,

    /// The caller asked for a human; hand off after this turn.
    #[serde(default)]
    pub escalate: bool,
}

impl CompletionResult {
    /// Parses raw model output into the contract.
    ///
    /// Strips a surrounding markdown code fence first — models routinely
    /// wrap JSON in ```json blocks even when asked not to.
    pub fn parse(raw: &str) -> Result<Self, CompletionError> {
        let cleaned = strip_code_fence(raw);
        if cleaned.is_empty() {
            return Err(CompletionError::Contract(
                "empty completion output".to_string(),
            ));
        }
        serde_json::from_str(cleaned).map_err(|err| CompletionError::Contract(err.to_string()))
    }
}

/// Removes a surrounding ```/```json fence, if present.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    if let Some(rest) = trimmed.strip_prefix("```json") {
        rest.trim_end_matches("```").trim()
    } else if let Some(rest) = trimmed.strip_prefix("```") {
        rest.trim_end_matches("```").trim()
    } else {
        trimmed
    }
}
