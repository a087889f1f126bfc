//! The generic voice assistant.
//!
//! Pure chat: no field capture, no record, just a helpful persona over a
//! running history.

use std::sync::Arc;

use parley_dialog::ChatSession;
use parley_llm::CompletionBackend;

pub fn session(backend: Arc<dyn CompletionBackend>) -> ChatSession {
    ChatSession::new(
        "assistant",
        "You are a helpful, concise voice assistant. Your replies are spoken \
         aloud, so keep them short, conversational, and free of formatting, \
         lists, or symbols. If you don't know something, say so plainly.",
        "Hi! How can I help you today?",
        "Sorry, I didn't catch that — could you say it again?",
        backend,
    )
}
