//! External-link prober
//!
//! A probe is a bounded-retry reachability check of one external URL:
//! - GET with a timeout that scales linearly with the attempt number
//! - redirects followed manually so the final hop stays observable
//! - HTTP 429 honored via Retry-After (or the linear backoff) before retrying
//! - every outcome classified into a human-readable reason
//!
//! Probing is total: `Prober::probe` always returns a [`ProbeResult`],
//! never an error.

mod outcome;
mod prober;

pub use outcome::ProbeResult;
pub use prober::{Prober, MAX_ATTEMPTS};

pub(crate) use outcome::Classification;
