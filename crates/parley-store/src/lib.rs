//! Record persistence for completed conversations.
//!
//! Each agent variant appends its completed-conversation records to a fixed
//! JSON-array file, UTF-8 and pretty-printed. The store is append-only:
//! no update or delete path, no dedup — repeated runs accumulate records.
//!
//! Reads are forgiving (a missing or corrupt file is treated as an empty
//! array and logged), writes propagate errors to the caller. The write is a
//! whole-file rewrite with no locking; concurrent writers to the same file
//! would race. That is a known limitation, not a supported mode.

use std::fs;
use std::path::Path;

use thiserror::Error;

use parley_types::Record;

/// Errors from persisting a record.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Writing the record file failed.
    #[error("failed to write record file: {0}")]
    Io(#[from] std::io::Error),

    /// Serialising the record array failed.
    #[error("failed to serialise records: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// An ISO-8601 timestamp for "now", in UTC.
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Loads the record array at `path`.
///
/// A missing file, unreadable file, or file that does not parse as a record
/// array all yield an empty vec — a corrupt store never fails the caller.
pub fn load_records(path: &Path) -> Vec<Record> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "record file unreadable, treating as empty");
            return Vec::new();
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(records) => records,
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "record file corrupt, treating as empty");
            Vec::new()
        }
    }
}

/// Appends `record` to the array at `path`, creating the file (and parent
/// directories) if needed.
///
/// # Errors
///
/// Returns `StoreError` if the rewritten file cannot be serialised or
/// written. Read-side problems are swallowed by [`load_records`].
pub fn append_record(path: &Path, record: &Record) -> Result<(), StoreError> {
    let mut records = load_records(path);
    records.push(record.clone());

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let body = serde_json::to_vec_pretty(&records)?;
    fs::write(path, body)?;

    tracing::info!(path = %path.display(), total = records.len(), "record appended");
    Ok(())
}
