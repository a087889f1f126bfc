//! Shared types for the Parley voice-agent platform.
//!
//! Defines the vocabulary every other crate speaks: field schemas that
//! describe what an intake conversation collects, the per-call conversation
//! state, the record persisted when a conversation completes, and the
//! fraud-case row used by the bank verification agent.
//!
//! This crate is deliberately logic-free. Merge semantics, sequencing, and
//! persistence live in `parley-dialog`, `parley-store`, and `parley-db`.

pub mod case;
pub mod record;
pub mod schema;
pub mod state;

pub use case::{CaseStatus, FraudCase, ParseCaseStatusError};
pub use record::Record;
pub use schema::{FieldKind, FieldSchema, FieldSpec};
pub use state::{ConversationState, FieldValue};
