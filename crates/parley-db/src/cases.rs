//! Lookup, resolution, and seeding of fraud cases.

use std::str::FromStr;

use rusqlite::{params, Connection, OptionalExtension, Row};
use thiserror::Error;

use parley_types::{CaseStatus, FraudCase};

/// Errors from case-store operations.
#[derive(Debug, Error)]
pub enum CaseDbError {
    /// A database operation failed.
    #[error("case database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Checking out a pooled connection failed.
    #[error("case database pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// A stored `case_status` value is not one of the known statuses.
    #[error("row {id} has unknown case status '{status}'")]
    BadStatus { id: i64, status: String },
}

const CASE_COLUMNS: &str = "id, userName, securityId, cardEnding, transactionDescription, \
     transactionAmount, transactionTime, transactionWebsite, case_status, notes";

fn case_from_row(row: &Row<'_>) -> rusqlite::Result<(FraudCase, Option<String>)> {
    let id: i64 = row.get(0)?;
    let status_text: String = row.get(8)?;
    let status = CaseStatus::from_str(&status_text).ok();
    Ok((
        FraudCase {
            id,
            user_name: row.get(1)?,
            security_id: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            card_ending: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            transaction_description: row.get(4)?,
            transaction_amount: row.get(5)?,
            transaction_time: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
            transaction_website: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
            case_status: status.unwrap_or(CaseStatus::PendingReview),
            notes: row.get::<_, Option<String>>(9)?.unwrap_or_default(),
        },
        // Carried alongside so the caller can reject unknown statuses
        // instead of silently defaulting.
        status.is_none().then_some(status_text),
    ))
}

/// Looks up a case by exact customer name.
///
/// Returns the first matching row in `id` order. Multiple customers sharing
/// a name are not disambiguated; callers get whichever row was inserted
/// first, matching the historical behavior of this dataset.
///
/// # Errors
///
/// Returns `CaseDbError::Database` on SQL failure, or `BadStatus` if the
/// matched row holds an unknown `case_status` value.
pub fn lookup_case(conn: &Connection, name: &str) -> Result<Option<FraudCase>, CaseDbError> {
    let sql = format!(
        "SELECT {CASE_COLUMNS} FROM transactions WHERE userName = ?1 ORDER BY id LIMIT 1"
    );
    let found = conn
        .query_row(&sql, params![name], case_from_row)
        .optional()?;

    match found {
        None => Ok(None),
        Some((_, Some(bad))) => {
            let id = conn.query_row(
                "SELECT id FROM transactions WHERE userName = ?1 ORDER BY id LIMIT 1",
                params![name],
                |row| row.get(0),
            )?;
            Err(CaseDbError::BadStatus { id, status: bad })
        }
        Some((case, None)) => Ok(Some(case)),
    }
}

/// Updates the status and notes of a case in place.
///
/// # Errors
///
/// Returns `CaseDbError::Database` on SQL failure, including when no row
/// with `case_id` exists.
pub fn resolve_case(
    conn: &Connection,
    case_id: i64,
    status: CaseStatus,
    notes: &str,
) -> Result<(), CaseDbError> {
    let updated = conn.execute(
        "UPDATE transactions SET case_status = ?1, notes = ?2 WHERE id = ?3",
        params![status.as_str(), notes, case_id],
    )?;
    if updated == 0 {
        return Err(CaseDbError::Database(rusqlite::Error::QueryReturnedNoRows));
    }
    tracing::info!(case_id, status = %status, "case resolved");
    Ok(())
}

/// All cases in `id` order, for the status report.
///
/// # Errors
///
/// Returns `CaseDbError::Database` on SQL failure.
pub fn list_cases(conn: &Connection) -> Result<Vec<FraudCase>, CaseDbError> {
    let sql = format!("SELECT {CASE_COLUMNS} FROM transactions ORDER BY id");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], case_from_row)?;

    let mut cases = Vec::new();
    for row in rows {
        let (case, bad_status) = row?;
        if let Some(status) = bad_status {
            return Err(CaseDbError::BadStatus {
                id: case.id,
                status,
            });
        }
        cases.push(case);
    }
    Ok(cases)
}

/// Replaces the table contents with the five demo rows.
///
/// Destructive by design: the seed wipes whatever is there and starts
/// fresh, exactly like the setup script it replaces.
///
/// # Errors
///
/// Returns `CaseDbError::Database` on SQL failure.
pub fn seed_demo_cases(conn: &Connection) -> Result<usize, CaseDbError> {
    #[allow(clippy::type_complexity)]
    const ROWS: &[(i64, &str, &str, &str, &str, f64, &str, &str, &str, &str)] = &[
        (1, "Alice", "11122", "4521", "Starbucks Coffee", 25.50, "8:30 AM EST", "starbucks.com", "confirmed_safe", "User check complete"),
        (2, "Bob", "22334", "3345", "Apple Store", 1200.00, "2:45 PM EST", "apple.com", "confirmed_fraud", "User initiated chargeback"),
        (3, "James", "33445", "6677", "Walmart ", 340.75, "10:15 AM EST", "walmart.com", "pending_review", "Automated flag: High value"),
        (4, "Mathews", "44556", "8899", "Netflix Subscription", 15.99, "11:00 PM EST", "netflix.com", "pending_review", "Automated flag: International"),
        (5, "Jhon", "55667", "1122", "Amazon Purchase", 85.99, "6:20 PM EST", "amazon.com", "pending_review", "Automated flag: High frequency"),
    ];

    let tx = conn.unchecked_transaction()?;
    tx.execute("DELETE FROM transactions", [])?;
    for row in ROWS {
        tx.execute(
            "INSERT INTO transactions VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                row.0, row.1, row.2, row.3, row.4, row.5, row.6, row.7, row.8, row.9
            ],
        )?;
    }
    tx.commit()?;

    tracing::info!(rows = ROWS.len(), "seeded demo cases");
    Ok(ROWS.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::run_migrations;

    fn seeded_conn() -> Connection {
        let conn = Connection::open_in_memory().expect("should open in-memory db");
        run_migrations(&conn).expect("migrations should succeed");
        seed_demo_cases(&conn).expect("seed should succeed");
        conn
    }

    #[test]
    fn lookup_finds_seeded_customer() {
        let conn = seeded_conn();
        let case = lookup_case(&conn, "Alice")
            .expect("lookup should succeed")
            .expect("Alice should exist");

        assert_eq!(case.id, 1);
        assert_eq!(case.security_id, "11122");
        assert_eq!(case.card_ending, "4521");
        assert_eq!(case.case_status, CaseStatus::ConfirmedSafe);
    }

    #[test]
    fn lookup_is_exact_match_only() {
        let conn = seeded_conn();
        assert!(lookup_case(&conn, "alice").expect("lookup should succeed").is_none());
        assert!(lookup_case(&conn, "Charlie").expect("lookup should succeed").is_none());
    }

    #[test]
    fn resolve_updates_status_and_notes_in_place() {
        let conn = seeded_conn();
        let case = lookup_case(&conn, "James").unwrap().unwrap();
        assert_eq!(case.case_status, CaseStatus::PendingReview);

        resolve_case(
            &conn,
            case.id,
            CaseStatus::ConfirmedFraud,
            "Customer denied the charge; card blocked",
        )
        .expect("resolve should succeed");

        let case = lookup_case(&conn, "James").unwrap().unwrap();
        assert_eq!(case.case_status, CaseStatus::ConfirmedFraud);
        assert_eq!(case.notes, "Customer denied the charge; card blocked");
    }

    #[test]
    fn resolve_unknown_id_fails() {
        let conn = seeded_conn();
        assert!(resolve_case(&conn, 999, CaseStatus::ConfirmedSafe, "n/a").is_err());
    }

    #[test]
    fn reseeding_replaces_existing_rows() {
        let conn = seeded_conn();
        resolve_case(&conn, 3, CaseStatus::ConfirmedSafe, "resolved").unwrap();

        seed_demo_cases(&conn).expect("reseed should succeed");
        let case = lookup_case(&conn, "James").unwrap().unwrap();
        assert_eq!(case.case_status, CaseStatus::PendingReview);
        assert_eq!(list_cases(&conn).unwrap().len(), 5);
    }

    #[test]
    fn unknown_status_in_table_is_rejected() {
        let conn = seeded_conn();
        conn.execute(
            "UPDATE transactions SET case_status = 'escalated' WHERE id = 2",
            [],
        )
        .unwrap();

        assert!(matches!(
            lookup_case(&conn, "Bob"),
            Err(CaseDbError::BadStatus { id: 2, .. })
        ));
    }
}
