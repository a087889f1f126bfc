//! The text-adventure narrator.
//!
//! A chat session whose system prompt sets the scene and keeps the model in
//! the storyteller's chair: it narrates, the caller acts.

use std::sync::Arc;

use parley_dialog::ChatSession;
use parley_llm::CompletionBackend;

pub fn session(backend: Arc<dyn CompletionBackend>) -> ChatSession {
    ChatSession::new(
        "narrator",
        "You are the narrator of an interactive adventure set in the cliffside \
         city of Vel Harrow, where the tide uncovers a different street each \
         night. Describe scenes vividly in two or three spoken sentences, then \
         always end by asking the adventurer what they do next. Never break \
         character, never mention being an AI, and let the adventurer's choices \
         drive the story — including the bad ones.",
        "The fog parts as your boat scrapes the stone quay of Vel Harrow. \
         Somewhere above, a bell rings twice. What do you do?",
        "The wind swallows your words — say that again, adventurer?",
        backend,
    )
}
