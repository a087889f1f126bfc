//! Error types for the conversation engine.

use thiserror::Error;

/// Errors surfaced by sessions.
///
/// Completion failures are deliberately absent: the session's policy is to
/// speak a retry apology and keep the state untouched, so they never reach
/// the caller as errors.
#[derive(Debug, Error)]
pub enum DialogError {
    /// An utterance arrived after the conversation already completed.
    #[error("session is finished; no further utterances are accepted")]
    SessionFinished,

    /// The utterance transport closed underneath the session.
    #[error("utterance transport closed: {0}")]
    TransportClosed(String),
}
