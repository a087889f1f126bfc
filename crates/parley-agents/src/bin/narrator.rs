//! The text-adventure narrator, on the console transport.

use std::sync::Arc;

use parley_agents::{narrator, runtime};
use parley_llm::CompletionClient;

#[tokio::main]
async fn main() {
    let config = runtime::bootstrap("narrator").expect("configuration should load");
    let backend =
        CompletionClient::new(config.llm.clone()).expect("completion client should build");

    runtime::run_chat(narrator::session(Arc::new(backend))).await;
}
