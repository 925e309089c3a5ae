//! Linktide: a stateful external-link health checker
//!
//! This crate crawls every internal page of a website, probes the external
//! links it finds, and suppresses transient third-party outages using a
//! persisted grace-period state store, so a single flaky external host does
//! not fail every build.

pub mod checker;
pub mod config;
pub mod crawler;
pub mod probe;
pub mod report;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Linktide operations
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("State error: {0}")]
    State(#[from] StateError),

    #[error("Invalid base URL '{url}': {source}")]
    BaseUrl {
        url: String,
        source: ::url::ParseError,
    },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors writing the persisted outage state
///
/// Read failures are deliberately not represented here: a missing or corrupt
/// state file degrades to an empty state, it never aborts the run.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("Failed to write state file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias for Linktide operations
pub type Result<T> = std::result::Result<T, CheckError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use checker::{run_check, Checker};
pub use config::Config;
pub use probe::{ProbeResult, Prober};
pub use report::CheckReport;
pub use state::OutageState;
pub use url::{is_internal, normalize_url, strip_fragment, Whitelist};
