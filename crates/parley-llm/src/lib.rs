//! Completion adapter for the Parley platform.
//!
//! Wraps an OpenAI-compatible chat-completions endpoint as an unreliable
//! external collaborator: every utterance triggers exactly one request (no
//! caching, no automatic retry), and anything that deviates from the
//! expected response contract surfaces as a [`CompletionError`] for the
//! session layer to handle with its spoken-apology policy.
//!
//! Intake agents ask for JSON-only responses and parse them into a
//! [`CompletionResult`]; chat agents take the reply text as-is.

pub mod client;
pub mod error;
pub mod types;

pub use client::{CompletionClient, LlmSettings};
pub use error::CompletionError;
pub use types::{ChatMessage, CompletionBackend, CompletionResult, Role};
