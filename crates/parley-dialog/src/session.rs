//! The intake session: one conversation's turn loop.
//!
//! Owns the per-call state (no process-wide singletons — each session is an
//! explicitly constructed object), sends each utterance to the completion
//! backend, merges the extracted updates, and picks the next prompt. A
//! session-scoped lock serialises turns so two utterances arriving in quick
//! succession cannot interleave reads and writes of the shared state; the
//! second waits until the first has finished merging.

use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use parley_llm::{ChatMessage, CompletionBackend, CompletionResult};
use parley_store::now_timestamp;
use parley_types::{ConversationState, FieldSchema, Record};

use crate::error::DialogError;
use crate::merge::apply_updates;
use crate::sequencer::next_prompt;

/// Static definition of one intake agent variant.
pub struct IntakeAgent {
    /// Short variant name, used in logs.
    pub name: &'static str,
    /// System-prompt persona and task description.
    pub instructions: String,
    /// Spoken when the call starts.
    pub greeting: String,
    /// Spoken when every field is collected.
    pub closing: String,
    /// Spoken when the completion service fails; state is left untouched.
    pub apology: String,
    /// The fields this agent collects, in asking order.
    pub schema: FieldSchema,
    /// Builds the one-line summary stored with the completed record.
    pub summarize: fn(&ConversationState) -> String,
}

/// The outcome of one handled utterance.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// The sentence to speak back to the caller.
    pub reply: String,
    /// Present on the final turn: the completed record to persist.
    pub record: Option<Record>,
    /// The caller asked for a human.
    pub escalate: bool,
}

struct TurnState {
    state: ConversationState,
    finished: bool,
}

/// A live intake conversation.
pub struct IntakeSession {
    agent: IntakeAgent,
    backend: Arc<dyn CompletionBackend>,
    session_id: Uuid,
    // Exclusivity lock: guards the mutable state against overlapping input
    // events, not against any resource-limited backend.
    turn: Mutex<TurnState>,
}

impl IntakeSession {
    pub fn new(agent: IntakeAgent, backend: Arc<dyn CompletionBackend>) -> Self {
        let state = ConversationState::from_schema(&agent.schema);
        Self {
            agent,
            backend,
            session_id: Uuid::new_v4(),
            turn: Mutex::new(TurnState {
                state,
                finished: false,
            }),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// The greeting to speak when the call starts.
    pub fn greeting(&self) -> &str {
        &self.agent.greeting
    }

    pub async fn is_finished(&self) -> bool {
        self.turn.lock().await.finished
    }

    /// A snapshot of the current state, mainly for tests and diagnostics.
    pub async fn state(&self) -> ConversationState {
        self.turn.lock().await.state.clone()
    }

    /// Handles one recognised utterance.
    ///
    /// One completion call per utterance, no caching, no automatic retry.
    /// A completion failure is answered with the agent's apology line and
    /// leaves the state unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`DialogError::SessionFinished`] if the conversation already
    /// completed.
    pub async fn handle_utterance(&self, text: &str) -> Result<TurnOutcome, DialogError> {
        let mut turn = self.turn.lock().await;
        if turn.finished {
            return Err(DialogError::SessionFinished);
        }

        let messages = self.build_messages(&turn.state, text);

        let raw = match self.backend.complete(&messages, true).await {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(
                    session = %self.session_id,
                    agent = self.agent.name,
                    %err,
                    "completion failed, speaking apology"
                );
                return Ok(self.apology_outcome());
            }
        };

        let result = match CompletionResult::parse(&raw) {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(
                    session = %self.session_id,
                    agent = self.agent.name,
                    %err,
                    "completion output unusable, speaking apology"
                );
                return Ok(self.apology_outcome());
            }
        };

        let changed = apply_updates(&self.agent.schema, &mut turn.state, &result.updates);
        tracing::debug!(
            session = %self.session_id,
            agent = self.agent.name,
            changed,
            "merged completion updates"
        );

        let pending = next_prompt(&self.agent.schema, &turn.state);
        let done = result.done || pending.is_none();

        if done || result.escalate {
            turn.finished = true;
            let record = Record {
                timestamp: now_timestamp(),
                summary: (self.agent.summarize)(&turn.state),
                state: turn.state.clone(),
            };
            let reply = if result.reply.trim().is_empty() {
                self.agent.closing.clone()
            } else {
                result.reply
            };
            tracing::info!(
                session = %self.session_id,
                agent = self.agent.name,
                escalate = result.escalate,
                "conversation complete"
            );
            return Ok(TurnOutcome {
                reply,
                record: Some(record),
                escalate: result.escalate,
            });
        }

        // Prefer the model's conversational reply; fall back to asking the
        // next unfilled question directly.
        let reply = if result.reply.trim().is_empty() {
            pending.unwrap_or(self.agent.closing.as_str()).to_string()
        } else {
            result.reply
        };

        Ok(TurnOutcome {
            reply,
            record: None,
            escalate: false,
        })
    }

    fn apology_outcome(&self) -> TurnOutcome {
        TurnOutcome {
            reply: self.agent.apology.clone(),
            record: None,
            escalate: false,
        }
    }

    fn build_messages(&self, state: &ConversationState, utterance: &str) -> Vec<ChatMessage> {
        let field_names: Vec<&str> = self.agent.schema.names().collect();
        let system = format!(
            "{instructions}\n\n\
             You must answer with a single JSON object and nothing else, with keys:\n\
             \"reply\" (string spoken to the caller), \
             \"updates\" (object with any of the fields {fields:?} the caller just provided), \
             \"done\" (boolean, true when the conversation is finished), \
             \"escalate\" (boolean, true when the caller asks for a human).\n\
             Only include fields in \"updates\" that the caller actually stated.",
            instructions = self.agent.instructions,
            fields = field_names,
        );

        let user = format!(
            "Current collected state:\n{state}\n\nCaller said: {utterance}",
            state = state.to_json(),
        );

        vec![ChatMessage::system(system), ChatMessage::user(user)]
    }
}
