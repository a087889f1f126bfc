//! Shared bootstrap and console run loops for the agent binaries.
//!
//! Each binary is one agent: it resolves a config path, initialises
//! tracing, builds its session, and runs a console loop that stands in for
//! the voice transport — stdin lines are the recognised utterances, stdout
//! lines are the spoken replies. The loop consumes utterances through the
//! [`UtteranceBus`], the same seam a real transport would publish into.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;
use tracing_subscriber::EnvFilter;

use parley_dialog::{ChatSession, IntakeAgent, IntakeSession, UtteranceBus, UtteranceEvent};
use parley_llm::CompletionBackend;
use parley_store::{append_record, StoreError};

use crate::config::{Config, ConfigError, LoggingConfig};

/// Errors from an agent run loop.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Persisting the completed record failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Loading configuration failed.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Resolves the config path: first CLI argument, then `PARLEY_CONFIG_PATH`,
/// then the default `parley.toml`.
pub fn resolve_config_path() -> (Option<String>, &'static str) {
    if let Some(path) = std::env::args()
        .nth(1)
        .filter(|value| !value.trim().is_empty())
    {
        return (Some(path), "cli-arg");
    }

    if let Ok(path) = std::env::var("PARLEY_CONFIG_PATH") {
        if !path.trim().is_empty() {
            return (Some(path), "env-var");
        }
    }

    (None, "default")
}

/// Initialises the tracing subscriber from logging config.
pub fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_new(&logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    if logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Loads config and initialises tracing for one agent binary.
///
/// # Errors
///
/// Returns `RuntimeError::Config` if a config file exists but is unreadable
/// or malformed.
pub fn bootstrap(agent: &str) -> Result<Config, RuntimeError> {
    let (resolved, source) = resolve_config_path();
    let path = resolved.as_deref().or(Some("parley.toml"));

    let config = crate::config::load_config(path)?;
    init_tracing(&config.logging);

    tracing::info!(
        agent,
        source,
        path = path.unwrap_or("<none>"),
        "agent starting"
    );
    Ok(config)
}

/// Speaks one line to the caller. With the console transport, that is a
/// stdout line.
pub fn speak(text: &str) {
    println!("{text}");
}

/// Spawns a stdin reader that publishes each non-empty line as an
/// utterance, and returns the subscription the run loop consumes.
///
/// The channel closes (and `recv` errors) when stdin reaches EOF.
pub fn stdin_utterances() -> broadcast::Receiver<UtteranceEvent> {
    let bus = UtteranceBus::new();
    let rx = bus.subscribe();

    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let line = line.trim().to_string();
            if line.is_empty() {
                continue;
            }
            if bus.publish("caller", &line).is_err() {
                break;
            }
        }
        // Dropping the bus here closes the channel: EOF ends the call.
    });

    rx
}

/// Runs one intake conversation to completion over the console transport.
///
/// The completed record is appended to `record_path`. Returns after the
/// final turn or when stdin closes.
///
/// # Errors
///
/// Returns `RuntimeError::Store` if the completed record cannot be written.
pub async fn run_intake(
    agent: IntakeAgent,
    backend: Arc<dyn CompletionBackend>,
    record_path: &Path,
) -> Result<(), RuntimeError> {
    let session = IntakeSession::new(agent, backend);
    let mut utterances = stdin_utterances();

    speak(session.greeting());

    loop {
        let event = match utterances.recv().await {
            Ok(event) => event,
            Err(broadcast::error::RecvError::Closed) => {
                tracing::info!("transport closed before the conversation completed");
                return Ok(());
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "utterance consumer lagged");
                continue;
            }
        };

        match session.handle_utterance(&event.text).await {
            Ok(outcome) => {
                speak(&outcome.reply);
                if let Some(record) = outcome.record {
                    append_record(record_path, &record)?;
                    return Ok(());
                }
            }
            Err(err) => {
                tracing::warn!(%err, "utterance rejected");
                return Ok(());
            }
        }
    }
}

/// Runs a free-form chat conversation until stdin closes.
pub async fn run_chat(session: ChatSession) {
    let mut utterances = stdin_utterances();

    speak(session.greeting());

    loop {
        let event = match utterances.recv().await {
            Ok(event) => event,
            Err(broadcast::error::RecvError::Closed) => {
                tracing::info!("transport closed, ending chat");
                return;
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "utterance consumer lagged");
                continue;
            }
        };

        let reply = session.handle_utterance(&event.text).await;
        speak(&reply);
    }
}
