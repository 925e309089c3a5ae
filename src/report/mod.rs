//! Report & decision engine
//!
//! Aggregates probe results against the whitelist and the outage state,
//! prints the broken-link diagnostics, and computes the run's pass/fail
//! outcome. This is the only place the outage state is mutated.

mod engine;
mod summary;

pub use engine::{evaluate, CheckReport};
pub use summary::print_summary;
