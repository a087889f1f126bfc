//! The daily wellness check-in agent.
//!
//! A strictly linear script: intro, then one question each for mood, energy,
//! stress, and goals, then a single completion-backed suggestion turn, then a
//! recap. The script advances exactly one phase per utterance no matter what
//! the caller says; answers are stored under the phase they were given in.

use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use parley_dialog::{DialogError, LinearScript, TurnOutcome};
use parley_llm::{ChatMessage, CompletionBackend};
use parley_store::now_timestamp;
use parley_types::{ConversationState, FieldSchema, FieldSpec, Record};

/// Check-in records accumulate in this file under the records directory.
pub const RECORD_FILE: &str = "wellness_log.json";

const PHASES: &[&str] = &["intro", "mood", "energy", "stress", "goals", "suggestion", "recap"];

/// Spoken when the suggestion completion fails. The check-in must not stall
/// on a service hiccup, so a canned suggestion stands in.
const FALLBACK_SUGGESTION: &str = "Here's a small one: take a five-minute walk away \
    from your screen and drink a glass of water. It sounds trivial, but it resets \
    more than you'd think.";

fn schema() -> FieldSchema {
    FieldSchema::new(vec![
        FieldSpec::text("mood", "How are you feeling today, in a word or two?"),
        FieldSpec::text("energy", "How's your energy — running high, steady, or low?"),
        FieldSpec::text("stress", "Anything weighing on you or stressing you out?"),
        FieldSpec::text("goals", "What's one thing you'd like to get done today?"),
    ])
}

struct CheckinState {
    script: LinearScript,
    state: ConversationState,
}

/// A live wellness check-in conversation.
pub struct WellnessSession {
    backend: Arc<dyn CompletionBackend>,
    session_id: Uuid,
    schema: FieldSchema,
    turn: Mutex<CheckinState>,
}

impl WellnessSession {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        let schema = schema();
        let state = ConversationState::from_schema(&schema);
        Self {
            backend,
            session_id: Uuid::new_v4(),
            schema,
            turn: Mutex::new(CheckinState {
                script: LinearScript::new(PHASES),
                state,
            }),
        }
    }

    pub fn greeting(&self) -> &'static str {
        "Hi, it's time for your daily check-in. Ready when you are — just say hello."
    }

    pub async fn is_finished(&self) -> bool {
        self.turn.lock().await.script.is_done()
    }

    /// Handles one utterance, advancing the script exactly one phase.
    ///
    /// The answer is stored under the phase that was current when the caller
    /// spoke, then the next phase's question (or suggestion, or recap) is
    /// returned. The final turn carries the check-in record.
    ///
    /// # Errors
    ///
    /// Returns [`DialogError::SessionFinished`] once the recap has been
    /// spoken.
    pub async fn handle_utterance(&self, text: &str) -> Result<TurnOutcome, DialogError> {
        let mut turn = self.turn.lock().await;
        let phase = turn.script.current().ok_or(DialogError::SessionFinished)?;

        // The intro turn collects nothing; every question phase stores the
        // caller's words verbatim under that phase's field.
        if self.schema.contains(phase) {
            turn.state.set_text(phase, text.trim());
        }

        let next = turn.script.advance();
        tracing::debug!(
            session = %self.session_id,
            from = phase,
            to = next.unwrap_or("done"),
            "check-in advanced"
        );

        let reply = match next {
            Some("suggestion") => self.suggestion(&turn.state).await,
            Some("recap") => self.recap(&turn.state),
            Some(question) => self
                .schema
                .get(question)
                .map(|spec| spec.prompt.to_string())
                .unwrap_or_else(|| "Go on.".to_string()),
            None => String::new(),
        };

        // The recap is the last spoken turn; the record goes out with it.
        if next == Some("recap") {
            turn.script.advance();
            let record = Record {
                timestamp: now_timestamp(),
                summary: summarize(&turn.state),
                state: turn.state.clone(),
            };
            tracing::info!(session = %self.session_id, "check-in complete");
            return Ok(TurnOutcome {
                reply,
                record: Some(record),
                escalate: false,
            });
        }

        Ok(TurnOutcome {
            reply,
            record: None,
            escalate: false,
        })
    }

    /// One completion call shapes the suggestion around the collected
    /// answers; any failure falls back to the canned line.
    async fn suggestion(&self, state: &ConversationState) -> String {
        let messages = vec![
            ChatMessage::system(
                "You are a gentle wellness coach. Given the caller's check-in \
                 answers, offer exactly one short, concrete, low-effort suggestion \
                 for the rest of their day. Two sentences at most, spoken aloud."
                    .to_string(),
            ),
            ChatMessage::user(format!("Today's check-in answers:\n{}", state.to_json())),
        ];

        let suggestion = match self.backend.complete(&messages, false).await {
            Ok(reply) if !reply.trim().is_empty() => reply,
            Ok(_) => FALLBACK_SUGGESTION.to_string(),
            Err(err) => {
                tracing::warn!(
                    session = %self.session_id,
                    %err,
                    "suggestion completion failed, using fallback"
                );
                FALLBACK_SUGGESTION.to_string()
            }
        };

        format!("{suggestion} When you're ready, say anything and I'll recap.")
    }

    fn recap(&self, state: &ConversationState) -> String {
        format!(
            "To recap: mood {mood}, energy {energy}, stress {stress}, and your goal \
             is {goals}. I've logged today's check-in — take care of yourself!",
            mood = state.get_text("mood").unwrap_or("unshared"),
            energy = state.get_text("energy").unwrap_or("unshared"),
            stress = state.get_text("stress").unwrap_or("none mentioned"),
            goals = state.get_text("goals").unwrap_or("unshared"),
        )
    }
}

fn summarize(state: &ConversationState) -> String {
    format!(
        "mood: {mood}; energy: {energy}; stress: {stress}; goal: {goals}",
        mood = state.get_text("mood").unwrap_or("-"),
        energy = state.get_text("energy").unwrap_or("-"),
        stress = state.get_text("stress").unwrap_or("-"),
        goals = state.get_text("goals").unwrap_or("-"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parley_llm::CompletionError;

    struct CannedSuggestion {
        fail: bool,
    }

    #[async_trait]
    impl CompletionBackend for CannedSuggestion {
        async fn complete(
            &self,
            _messages: &[ChatMessage],
            json_only: bool,
        ) -> Result<String, CompletionError> {
            assert!(!json_only, "suggestion turn uses plain text");
            if self.fail {
                Err(CompletionError::Empty)
            } else {
                Ok("Try stretching for two minutes.".to_string())
            }
        }
    }

    fn session(fail: bool) -> WellnessSession {
        WellnessSession::new(Arc::new(CannedSuggestion { fail }))
    }

    #[tokio::test]
    async fn walks_every_phase_in_order() {
        let session = session(false);

        let mood_q = session.handle_utterance("hello").await.unwrap();
        assert_eq!(mood_q.reply, "How are you feeling today, in a word or two?");

        let energy_q = session.handle_utterance("pretty good").await.unwrap();
        assert_eq!(
            energy_q.reply,
            "How's your energy — running high, steady, or low?"
        );

        session.handle_utterance("steady").await.unwrap();
        session.handle_utterance("deadline tomorrow").await.unwrap();

        let suggestion = session.handle_utterance("finish the report").await.unwrap();
        assert!(suggestion.reply.starts_with("Try stretching for two minutes."));
        assert!(suggestion.record.is_none());

        let recap = session.handle_utterance("okay").await.unwrap();
        assert!(recap.reply.contains("mood pretty good"));
        let record = recap.record.expect("recap turn should carry the record");
        assert_eq!(record.state.get_text("goals"), Some("finish the report"));
        assert_eq!(
            record.summary,
            "mood: pretty good; energy: steady; stress: deadline tomorrow; \
             goal: finish the report"
        );

        assert!(session.is_finished().await);
        assert!(matches!(
            session.handle_utterance("more").await,
            Err(DialogError::SessionFinished)
        ));
    }

    #[tokio::test]
    async fn fallback_suggestion_is_spoken_on_completion_failure() {
        let session = session(true);

        session.handle_utterance("hi").await.unwrap();
        session.handle_utterance("fine").await.unwrap();
        session.handle_utterance("low").await.unwrap();
        session.handle_utterance("nothing much").await.unwrap();

        let suggestion = session.handle_utterance("get some rest").await.unwrap();
        assert!(suggestion.reply.contains("five-minute walk"));
    }

    #[tokio::test]
    async fn answers_are_stored_under_their_phase() {
        let session = session(false);

        session.handle_utterance("hello there").await.unwrap();
        session.handle_utterance("  tired  ").await.unwrap();

        let state = session.turn.lock().await;
        assert_eq!(state.state.get_text("mood"), Some("tired"));
        assert!(!state.state.is_filled("energy"));
    }
}
