//! The café coffee-ordering agent, on the console transport.

use std::path::Path;
use std::sync::Arc;

use parley_agents::{coffee, runtime};
use parley_llm::CompletionClient;

#[tokio::main]
async fn main() {
    let config = runtime::bootstrap("coffee").expect("configuration should load");
    let backend =
        CompletionClient::new(config.llm.clone()).expect("completion client should build");
    let record_path = Path::new(&config.records.dir).join(coffee::RECORD_FILE);

    if let Err(err) = runtime::run_intake(coffee::agent(), Arc::new(backend), &record_path).await
    {
        tracing::error!(%err, "agent run failed");
        std::process::exit(1);
    }
}
