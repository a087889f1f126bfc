//! The record persisted when an intake conversation completes.

use serde::{Deserialize, Serialize};

use crate::state::ConversationState;

/// A completed conversation snapshot.
///
/// Appended to a per-agent JSON-array file by `parley-store`. Append-only:
/// there is no update or delete path, and repeated runs accumulate records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// ISO-8601 completion time.
    pub timestamp: String,
    /// One-sentence human-readable summary of the collected fields.
    pub summary: String,
    /// The final conversation state.
    pub state: ConversationState,
}
