//! Linktide main entry point
//!
//! This is the command-line interface for the Linktide external-link checker.

use clap::Parser;
use linktide::checker::run_check;
use linktide::config::{load_config_with_hash, Config};
use linktide::report::print_summary;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Linktide: a stateful external-link health checker
///
/// Linktide crawls every internal page under BASE_URL, probes the external
/// links it finds, and reports the ones that are broken. Outages of links
/// that were healthy within the grace window are suppressed, so a transient
/// third-party hiccup does not fail the run.
#[derive(Parser, Debug)]
#[command(name = "linktide")]
#[command(version = "1.0.0")]
#[command(about = "A stateful external-link health checker", long_about = None)]
struct Cli {
    /// Base URL of the site to scan; links outside it are treated as external
    #[arg(value_name = "BASE_URL")]
    base_url: String,

    /// Path to read the persisted outage state from
    #[arg(value_name = "STATE_READ_PATH")]
    state_read: PathBuf,

    /// Path to write the pruned outage state to
    #[arg(value_name = "STATE_WRITE_PATH")]
    state_write: PathBuf,

    /// Path to a TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() {
    // Usage errors exit with code 1 (clap would default to 2), while
    // --help/--version keep their success exit.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => match load_config_with_hash(path) {
            Ok((cfg, hash)) => {
                tracing::info!(
                    "Configuration loaded from {} (hash: {})",
                    path.display(),
                    hash
                );
                cfg
            }
            Err(e) => {
                tracing::error!("Failed to load configuration: {}", e);
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };

    let report = match run_check(config, &cli.base_url, &cli.state_read, &cli.state_write).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Check failed: {}", e);
            std::process::exit(1);
        }
    };

    print_summary(&report);

    std::process::exit(if report.is_failure() { 1 } else { 0 });
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("linktide=info,warn"),
            1 => EnvFilter::new("linktide=debug,info"),
            2 => EnvFilter::new("linktide=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
