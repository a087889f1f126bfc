//! Recreates and seeds the fraud-case database.
//!
//! Destructive: wipes the `transactions` table and inserts the five demo
//! rows. Takes the database path as an optional first argument, defaulting
//! to `transactions.sqlite` in the working directory.

use rusqlite::Connection;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let db_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "transactions.sqlite".to_string());

    let conn = Connection::open(&db_path)
        .expect("failed to open database file — check the path is writable");

    parley_db::run_migrations(&conn).expect("failed to create the transactions table");

    let rows = parley_db::seed_demo_cases(&conn).expect("failed to seed demo cases");

    tracing::info!(path = %db_path, rows, "database seeded and ready");
}
