//! Dumps the fraud-case table to a readable markdown report.
//!
//! Arguments: `[db-path] [report-path]`, defaulting to
//! `transactions.sqlite` and `db_report.md`. Run it again after agent
//! sessions to see the latest resolutions.

use std::path::Path;

use rusqlite::Connection;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let db_path = args.next().unwrap_or_else(|| "transactions.sqlite".to_string());
    let report_path = args.next().unwrap_or_else(|| "db_report.md".to_string());

    if !Path::new(&db_path).exists() {
        eprintln!("database file '{db_path}' not found — run seed-cases first");
        std::process::exit(1);
    }

    let conn = Connection::open(&db_path).expect("failed to open database file");

    parley_db::write_report(&conn, Path::new(&report_path))
        .expect("failed to write the case report");

    tracing::info!(path = %report_path, "report ready");
}
