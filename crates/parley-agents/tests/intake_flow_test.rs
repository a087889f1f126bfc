//! End-to-end intake flow: a full coffee order through the session, with
//! the completed record persisted and read back.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use parley_agents::coffee;
use parley_dialog::IntakeSession;
use parley_llm::{ChatMessage, CompletionBackend, CompletionError};
use parley_store::{append_record, load_records};

/// Replays a queue of canned completions, standing in for the real service.
struct Scripted {
    responses: Mutex<VecDeque<String>>,
}

impl Scripted {
    fn new(responses: Vec<&str>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into_iter().map(String::from).collect()),
        })
    }
}

#[async_trait]
impl CompletionBackend for Scripted {
    async fn complete(
        &self,
        _messages: &[ChatMessage],
        json_only: bool,
    ) -> Result<String, CompletionError> {
        assert!(json_only, "intake turns must request JSON mode");
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("scripted backend ran out of responses"))
    }
}

#[tokio::test]
async fn coffee_order_end_to_end_persists_a_record() {
    let backend = Scripted::new(vec![
        r#"{"reply": "A latte, lovely. What size?", "updates": {"drinkType": "latte"}}"#,
        r#"{"reply": "Large it is. What kind of milk?", "updates": {"size": "large"}}"#,
        r#"{"reply": "Oat milk. Any extras?", "updates": {"milk": "oat"}}"#,
        r#"{"reply": "One vanilla syrup. Name for the cup?", "updates": {"extras": ["vanilla syrup"]}}"#,
        r#"{"reply": "All set, Maya!", "updates": {"name": "Maya"}}"#,
    ]);

    let session = IntakeSession::new(coffee::agent(), backend);
    assert!(session.greeting().contains("Harbor Light"));

    let mut record = None;
    for utterance in [
        "can I get a latte",
        "large please",
        "oat milk",
        "add a vanilla syrup",
        "it's for Maya",
    ] {
        let outcome = session
            .handle_utterance(utterance)
            .await
            .expect("session should accept the utterance");
        record = outcome.record;
    }

    let record = record.expect("the final turn should complete the order");
    assert_eq!(record.summary, "large latte with oat milk (vanilla syrup) for Maya");
    assert!(session.is_finished().await);

    let dir = tempfile::tempdir().expect("should create temp dir");
    let path = dir.path().join(coffee::RECORD_FILE);
    append_record(&path, &record).expect("record should persist");

    let stored = load_records(&path);
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].state.get_text("drinkType"), Some("latte"));
    assert_eq!(stored[0].state.get_list("extras"), ["vanilla syrup"]);
}

#[tokio::test]
async fn fenced_json_from_the_model_still_completes_the_turn() {
    let backend = Scripted::new(vec![
        "```json\n{\"reply\": \"Noted!\", \"updates\": {\"drinkType\": \"mocha\"}}\n```",
    ]);
    let session = IntakeSession::new(coffee::agent(), backend);

    let outcome = session
        .handle_utterance("a mocha")
        .await
        .expect("session should accept the utterance");
    assert_eq!(outcome.reply, "Noted!");
    assert_eq!(session.state().await.get_text("drinkType"), Some("mocha"));
}

#[tokio::test]
async fn second_order_appends_to_the_same_file() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let path = dir.path().join(coffee::RECORD_FILE);

    for name in ["Maya", "Luis"] {
        let response = format!(
            r#"{{"reply": "Done!", "updates": {{"drinkType": "drip", "size": "small", "milk": "none", "extras": [], "name": "{name}"}}, "done": true}}"#
        );
        let backend = Scripted::new(vec![response.as_str()]);

        let session = IntakeSession::new(coffee::agent(), backend);
        let outcome = session
            .handle_utterance("small drip, no milk, no extras")
            .await
            .expect("session should accept the utterance");
        let record = outcome.record.expect("done flag should complete the order");
        append_record(&path, &record).expect("record should persist");
    }

    let stored = load_records(&path);
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].state.get_text("name"), Some("Maya"));
    assert_eq!(stored[1].state.get_text("name"), Some("Luis"));
}
