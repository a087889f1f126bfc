//! The support and lead-capture agent, on the console transport.

use std::path::Path;
use std::sync::Arc;

use parley_agents::{leads, runtime};
use parley_llm::CompletionClient;

#[tokio::main]
async fn main() {
    let config = runtime::bootstrap("leads").expect("configuration should load");
    let backend =
        CompletionClient::new(config.llm.clone()).expect("completion client should build");
    let record_path = Path::new(&config.records.dir).join(leads::RECORD_FILE);

    if let Err(err) = runtime::run_intake(leads::agent(), Arc::new(backend), &record_path).await {
        tracing::error!(%err, "agent run failed");
        std::process::exit(1);
    }
}
