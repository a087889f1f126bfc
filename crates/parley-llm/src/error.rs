//! Error types for the completion adapter.

use thiserror::Error;

/// Errors from one completion round trip.
///
/// The session layer treats every variant the same way: log it, speak a
/// generic retry apology, and leave the conversation state untouched.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The HTTP request itself failed (connect, TLS, timeout).
    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("completion service returned {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned (often an OpenAI-style error object).
        body: String,
    },

    /// The response parsed but contained no choices.
    #[error("completion response contained no choices")]
    Empty,

    /// The model's output did not satisfy the expected JSON contract.
    #[error("completion output violates the response contract: {0}")]
    Contract(String),
}
