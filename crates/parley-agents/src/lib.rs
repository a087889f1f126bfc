//! The agent variants and the shared runtime they run on.
//!
//! Each variant is a module defining its persona, schema or script, and
//! record file; each has a matching binary under `src/bin/` that wires it to
//! config, tracing, a completion backend, and the console transport. Which
//! agent answers the call is decided by which binary you run.

pub mod config;
pub mod runtime;

pub mod assistant;
pub mod coffee;
pub mod coffee_express;
pub mod fraud;
pub mod grocery;
pub mod leads;
pub mod narrator;
pub mod tutor;
pub mod wellness;
