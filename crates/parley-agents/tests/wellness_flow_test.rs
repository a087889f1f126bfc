//! End-to-end wellness check-in: every phase in order, suggestion from the
//! backend, and the check-in logged to the record file.

use std::sync::Arc;

use async_trait::async_trait;

use parley_agents::wellness::{WellnessSession, RECORD_FILE};
use parley_llm::{ChatMessage, CompletionBackend, CompletionError};
use parley_store::{append_record, load_records};

struct Coach;

#[async_trait]
impl CompletionBackend for Coach {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        _json_only: bool,
    ) -> Result<String, CompletionError> {
        // The suggestion turn should hand over the collected answers.
        let user = messages.last().expect("should have a user message");
        assert!(user.content.contains("check-in answers"));
        Ok("Step outside for some fresh air before your next meeting.".to_string())
    }
}

#[tokio::test]
async fn full_check_in_logs_a_record() {
    let session = WellnessSession::new(Arc::new(Coach));
    assert!(session.greeting().contains("check-in"));

    let answers = [
        ("hello", "feeling today"),
        ("pretty calm", "your energy"),
        ("a bit low", "stressing you out"),
        ("nothing major", "get done today"),
        ("ship the release", "fresh air"),
    ];

    let mut last = None;
    for (utterance, expected) in answers {
        let outcome = session
            .handle_utterance(utterance)
            .await
            .expect("session should accept the utterance");
        assert!(
            outcome.reply.contains(expected),
            "reply {:?} should mention {:?}",
            outcome.reply,
            expected
        );
        last = Some(outcome);
    }
    assert!(last.expect("should have turns").record.is_none());

    let recap = session
        .handle_utterance("sounds good")
        .await
        .expect("recap turn should succeed");
    assert!(recap.reply.contains("To recap"));
    assert!(session.is_finished().await);

    let record = recap.record.expect("recap should carry the record");
    assert_eq!(record.state.get_text("mood"), Some("pretty calm"));
    assert_eq!(record.state.get_text("goals"), Some("ship the release"));

    let dir = tempfile::tempdir().expect("should create temp dir");
    let path = dir.path().join(RECORD_FILE);
    append_record(&path, &record).expect("record should persist");

    let stored = load_records(&path);
    assert_eq!(stored.len(), 1);
    assert!(stored[0].summary.contains("mood: pretty calm"));
}
