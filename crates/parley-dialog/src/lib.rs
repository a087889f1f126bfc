//! Conversation engine for the Parley platform.
//!
//! Implements the turn-taking loop shared by the intake agents: hold a
//! per-call conversation state, send each recognised utterance to the
//! completion service, merge the extracted field updates, and decide the
//! next prompt by scanning required fields in declared order. Chat-style
//! agents (assistant, narrator) use a lighter history-based session.
//!
//! The audio side of a call — capture, speech recognition, synthesis, turn
//! detection, room signaling — is the external voice SDK's problem. The
//! [`transport`] module is the seam where that SDK attaches; an in-process
//! utterance bus stands in for it here.

pub mod chat;
pub mod error;
pub mod merge;
pub mod script;
pub mod sequencer;
pub mod session;
pub mod transport;

pub use chat::ChatSession;
pub use error::DialogError;
pub use merge::apply_updates;
pub use script::LinearScript;
pub use sequencer::next_prompt;
pub use session::{IntakeAgent, IntakeSession, TurnOutcome};
pub use transport::{UtteranceBus, UtteranceEvent};
