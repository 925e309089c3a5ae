//! Checker coordination
//!
//! Wires the run together: load persisted state, discover internal pages,
//! extract each page's external links, probe them, evaluate the results,
//! then prune and persist the state.

mod coordinator;

pub use coordinator::{run_check, Checker};
