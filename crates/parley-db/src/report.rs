//! Markdown status report over the case table.

use std::path::Path;

use rusqlite::Connection;

use crate::cases::{list_cases, CaseDbError};

/// Renders the current case table as a markdown document.
///
/// # Errors
///
/// Returns `CaseDbError` if the table cannot be read.
pub fn render_report(conn: &Connection) -> Result<String, CaseDbError> {
    let cases = list_cases(conn)?;

    let mut out = String::from("## Current Fraud Case Status Report\n\n");
    out.push_str(&format!(
        "**Generated:** {}\n\n",
        chrono::Utc::now().to_rfc3339()
    ));

    if cases.is_empty() {
        out.push_str("The `transactions` table is empty.\n");
        return Ok(out);
    }

    out.push_str(
        "| id | userName | securityId | cardEnding | transactionDescription \
         | transactionAmount | transactionTime | transactionWebsite | case_status | notes |\n",
    );
    out.push_str("| --- | --- | --- | --- | --- | --- | --- | --- | --- | --- |\n");

    for case in &cases {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} | {:.2} | {} | {} | {} | {} |\n",
            case.id,
            case.user_name,
            case.security_id,
            case.card_ending,
            case.transaction_description,
            case.transaction_amount,
            case.transaction_time,
            case.transaction_website,
            case.case_status,
            case.notes,
        ));
    }

    Ok(out)
}

/// Renders the report and writes it to `path`.
///
/// # Errors
///
/// Returns `ReportError::Db` if the table cannot be read, `ReportError::Io`
/// if the file cannot be written.
pub fn write_report(conn: &Connection, path: &Path) -> Result<(), ReportError> {
    let report = render_report(conn)?;
    std::fs::write(path, report)?;
    tracing::info!(path = %path.display(), "case report written");
    Ok(())
}

/// Errors from writing the report file.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Db(#[from] CaseDbError),

    #[error("failed to write report file: {0}")]
    Io(#[from] std::io::Error),
}
