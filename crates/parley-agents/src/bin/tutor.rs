//! The active-recall tutor, on the console transport.
//!
//! Concepts come from a JSON file; set `PARLEY_TUTOR_CONTENT` to point at
//! one, or drop `tutor_concepts.json` in the working directory.

use std::path::PathBuf;

use tokio::sync::broadcast;

use parley_agents::runtime;
use parley_agents::tutor::{load_concepts, TutorSession, DEFAULT_CONTENT_FILE};

#[tokio::main]
async fn main() {
    let _config = runtime::bootstrap("tutor").expect("configuration should load");

    let content_path = std::env::var("PARLEY_TUTOR_CONTENT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONTENT_FILE));
    let concepts = load_concepts(&content_path);
    tracing::info!(count = concepts.len(), "concept library loaded");

    let mut session = TutorSession::new(concepts);
    let mut utterances = runtime::stdin_utterances();

    runtime::speak(session.greeting());

    loop {
        let event = match utterances.recv().await {
            Ok(event) => event,
            Err(broadcast::error::RecvError::Closed) => {
                tracing::info!("transport closed, ending tutoring session");
                return;
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "utterance consumer lagged");
                continue;
            }
        };

        let reply = session.handle_utterance(&event.text);
        runtime::speak(&reply);
    }
}
