//! The generic voice assistant, on the console transport.

use std::sync::Arc;

use parley_agents::{assistant, runtime};
use parley_llm::CompletionClient;

#[tokio::main]
async fn main() {
    let config = runtime::bootstrap("assistant").expect("configuration should load");
    let backend =
        CompletionClient::new(config.llm.clone()).expect("completion client should build");

    runtime::run_chat(assistant::session(Arc::new(backend))).await;
}
