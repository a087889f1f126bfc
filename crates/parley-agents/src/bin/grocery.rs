//! The grocery-cart ordering agent, on the console transport.

use std::path::Path;
use std::sync::Arc;

use parley_agents::{grocery, runtime};
use parley_llm::CompletionClient;

#[tokio::main]
async fn main() {
    let config = runtime::bootstrap("grocery").expect("configuration should load");
    let backend =
        CompletionClient::new(config.llm.clone()).expect("completion client should build");

    // One order per conversation, each in its own timestamped file.
    let record_path = Path::new(&config.records.dir).join(grocery::order_file_name());

    if let Err(err) = runtime::run_intake(grocery::agent(), Arc::new(backend), &record_path).await
    {
        tracing::error!(%err, "agent run failed");
        std::process::exit(1);
    }
}
