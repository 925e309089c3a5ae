//! Configuration module for Linktide
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. All settings have built-in defaults, so a configuration file is
//! only needed to override them.
//!
//! # Example
//!
//! ```no_run
//! use linktide::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("linktide.toml")).unwrap();
//! println!("Grace window: {} days", config.checker.grace_days);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CheckerConfig, Config, UserAgentConfig, WhitelistConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
