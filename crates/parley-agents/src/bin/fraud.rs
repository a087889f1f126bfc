//! The bank fraud-verification agent, on the console transport.
//!
//! Needs a seeded case database; run the `seed-cases` binary from
//! `parley-db` first, or point `PARLEY_DB_PATH` at an existing one.

use tokio::sync::broadcast;

use parley_agents::fraud::FraudSession;
use parley_agents::runtime;
use parley_db::{create_pool, run_migrations, CasePoolSettings};

#[tokio::main]
async fn main() {
    let config = runtime::bootstrap("fraud").expect("configuration should load");

    let pool = create_pool(&config.database.path, CasePoolSettings::default())
        .expect("case database pool should build");
    {
        let conn = pool.get().expect("case database should be reachable");
        run_migrations(&conn).expect("case database migrations should apply");
    }

    let session = FraudSession::new(pool);
    let mut utterances = runtime::stdin_utterances();

    runtime::speak(session.greeting());

    loop {
        let event = match utterances.recv().await {
            Ok(event) => event,
            Err(broadcast::error::RecvError::Closed) => {
                tracing::info!("transport closed before verification completed");
                return;
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "utterance consumer lagged");
                continue;
            }
        };

        match session.handle_utterance(&event.text).await {
            Ok(reply) => {
                runtime::speak(&reply);
                if session.is_finished().await {
                    return;
                }
            }
            Err(err) => {
                tracing::error!(%err, "verification failed");
                std::process::exit(1);
            }
        }
    }
}
