//! The daily wellness check-in agent, on the console transport.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::broadcast;

use parley_agents::runtime;
use parley_agents::wellness::{WellnessSession, RECORD_FILE};
use parley_llm::CompletionClient;
use parley_store::append_record;

#[tokio::main]
async fn main() {
    let config = runtime::bootstrap("wellness").expect("configuration should load");
    let backend =
        CompletionClient::new(config.llm.clone()).expect("completion client should build");
    let record_path = Path::new(&config.records.dir).join(RECORD_FILE);

    let session = WellnessSession::new(Arc::new(backend));
    let mut utterances = runtime::stdin_utterances();

    runtime::speak(session.greeting());

    loop {
        let event = match utterances.recv().await {
            Ok(event) => event,
            Err(broadcast::error::RecvError::Closed) => {
                tracing::info!("transport closed before the check-in completed");
                return;
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "utterance consumer lagged");
                continue;
            }
        };

        match session.handle_utterance(&event.text).await {
            Ok(outcome) => {
                runtime::speak(&outcome.reply);
                if let Some(record) = outcome.record {
                    if let Err(err) = append_record(&record_path, &record) {
                        tracing::error!(%err, "failed to write check-in record");
                        std::process::exit(1);
                    }
                    return;
                }
            }
            Err(err) => {
                tracing::warn!(%err, "utterance rejected");
                return;
            }
        }
    }
}
