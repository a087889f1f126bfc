//! Fraud-case storage for the bank verification agent.
//!
//! A single SQLite table, `transactions`, holds the flagged transactions
//! the agent walks callers through. Provides connection pooling (via
//! `r2d2`) with WAL mode, an embedded schema migration, exact-name lookup,
//! in-place resolution (status + notes), a destructive demo seed, and a
//! markdown status report.
//!
//! Lookups open no cache: the agent reads and writes rows directly, one
//! statement per operation.

mod cases;
mod migrations;
mod pool;
mod report;

pub use cases::{list_cases, lookup_case, resolve_case, seed_demo_cases, CaseDbError};
pub use migrations::{run_migrations, MigrationError};
pub use pool::{create_pool, CasePool, CasePoolSettings, PoolError};
pub use report::{render_report, write_report, ReportError};
