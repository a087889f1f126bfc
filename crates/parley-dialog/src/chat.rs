//! Free-form chat sessions for agents with no field capture.
//!
//! The generic assistant and the adventure narrator keep a running message
//! history instead of a field state; every utterance is answered by one
//! plain-text completion call.

use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use parley_llm::{ChatMessage, CompletionBackend};

/// A history-based conversation with no structured state.
pub struct ChatSession {
    name: &'static str,
    greeting: String,
    apology: String,
    backend: Arc<dyn CompletionBackend>,
    session_id: Uuid,
    // Same exclusivity rule as the intake session: one turn at a time.
    history: Mutex<Vec<ChatMessage>>,
}

impl ChatSession {
    /// Creates a session seeded with the agent's system prompt.
    pub fn new(
        name: &'static str,
        instructions: impl Into<String>,
        greeting: impl Into<String>,
        apology: impl Into<String>,
        backend: Arc<dyn CompletionBackend>,
    ) -> Self {
        Self {
            name,
            greeting: greeting.into(),
            apology: apology.into(),
            backend,
            session_id: Uuid::new_v4(),
            history: Mutex::new(vec![ChatMessage::system(instructions.into())]),
        }
    }

    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    /// Answers one utterance, appending both sides to the history.
    ///
    /// A completion failure yields the apology line; the failed exchange is
    /// not recorded, so the next turn starts from clean history.
    pub async fn handle_utterance(&self, text: &str) -> String {
        let mut history = self.history.lock().await;
        history.push(ChatMessage::user(text));

        match self.backend.complete(&history, false).await {
            Ok(reply) => {
                history.push(ChatMessage::assistant(reply.clone()));
                reply
            }
            Err(err) => {
                tracing::warn!(
                    session = %self.session_id,
                    agent = self.name,
                    %err,
                    "chat completion failed, speaking apology"
                );
                history.pop();
                self.apology.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parley_llm::CompletionError;
    use std::sync::Mutex as StdMutex;

    struct Echo {
        calls: StdMutex<Vec<usize>>,
        fail_first: bool,
    }

    #[async_trait]
    impl CompletionBackend for Echo {
        async fn complete(
            &self,
            messages: &[ChatMessage],
            json_only: bool,
        ) -> Result<String, CompletionError> {
            assert!(!json_only, "chat sessions never request JSON mode");
            let mut calls = self.calls.lock().unwrap();
            calls.push(messages.len());
            if self.fail_first && calls.len() == 1 {
                return Err(CompletionError::Empty);
            }
            Ok(format!("echo {}", messages.len()))
        }
    }

    fn session(backend: Arc<Echo>) -> ChatSession {
        ChatSession::new(
            "test-chat",
            "You are a helpful assistant.",
            "Hi there!",
            "Sorry, say that again?",
            backend,
        )
    }

    #[tokio::test]
    async fn history_grows_with_each_exchange() {
        let backend = Arc::new(Echo {
            calls: StdMutex::new(Vec::new()),
            fail_first: false,
        });
        let session = session(Arc::clone(&backend));

        // system + user = 2, then system + user + assistant + user = 4.
        assert_eq!(session.handle_utterance("hello").await, "echo 2");
        assert_eq!(session.handle_utterance("and again").await, "echo 4");
    }

    #[tokio::test]
    async fn failed_turn_is_rolled_back_from_history() {
        let backend = Arc::new(Echo {
            calls: StdMutex::new(Vec::new()),
            fail_first: true,
        });
        let session = session(Arc::clone(&backend));

        assert_eq!(session.handle_utterance("hello").await, "Sorry, say that again?");
        // The failed user message was popped, so the retry sees 2 again.
        assert_eq!(session.handle_utterance("hello again").await, "echo 2");
    }
}
