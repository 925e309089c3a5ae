//! Checker coordinator - main run orchestration logic
//!
//! The run is sequential except for probing: external links are checked on
//! a bounded worker pool, and the results are then evaluated in a single
//! sequential loop so the outage state has exactly one writer.

use crate::config::Config;
use crate::crawler::{build_page_client, discover_internal_pages, fetch_links};
use crate::probe::{ProbeResult, Prober};
use crate::report::{evaluate, CheckReport};
use crate::state::OutageState;
use crate::url::{is_internal, Whitelist};
use crate::CheckError;
use chrono::{Duration, Utc};
use reqwest::Client;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// Main checker structure
pub struct Checker {
    config: Config,
    page_client: Client,
    prober: Arc<Prober>,
    whitelist: Whitelist,
}

impl Checker {
    /// Creates a new checker instance
    ///
    /// # Arguments
    ///
    /// * `config` - The checker configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Checker)` - Successfully created checker
    /// * `Err(CheckError)` - Failed to build the HTTP clients
    pub fn new(config: Config) -> Result<Self, CheckError> {
        let page_client = build_page_client(&config.user_agent.impersonate)?;
        let prober = Arc::new(Prober::new(&config.checker, &config.user_agent.impersonate)?);
        let whitelist = Whitelist::from_config(&config.whitelist);

        if !whitelist.is_empty() {
            tracing::info!("Whitelist has {} entries", whitelist.len());
        }

        Ok(Self {
            config,
            page_client,
            prober,
            whitelist,
        })
    }

    /// Runs a full check against the site rooted at `base_url`
    ///
    /// The state file is read once at the start and written once at the
    /// end; pruning and persisting happen unconditionally, even when the
    /// run finds broken links.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Root of the site to scan
    /// * `state_read` - Path the outage state is loaded from
    /// * `state_write` - Path the pruned outage state is written to
    pub async fn run(
        &self,
        base_url: &str,
        state_read: &Path,
        state_write: &Path,
    ) -> Result<CheckReport, CheckError> {
        Url::parse(base_url).map_err(|e| CheckError::BaseUrl {
            url: base_url.to_string(),
            source: e,
        })?;

        let mut state = OutageState::load(state_read);
        tracing::info!(
            "Loaded {} state entries from {}",
            state.len(),
            state_read.display()
        );

        tracing::info!("Recursively fetching internal pages under {}", base_url);
        let pages = discover_internal_pages(&self.page_client, base_url).await;
        tracing::info!("Fetched {} internal pages", pages.len());

        let edges = self.collect_external_links(base_url, &pages).await;
        tracing::info!("Checking {} external links", edges.len());

        let results = self.probe_all(edges).await;

        let now = Utc::now();
        let report = evaluate(
            &results,
            &self.whitelist,
            &mut state,
            now,
            self.config.checker.grace_days,
        );

        state.prune(now - Duration::days(i64::from(self.config.checker.grace_days)));
        tracing::info!("Saving state to {}", state_write.display());
        state.save(state_write)?;

        Ok(report)
    }

    /// Re-derives each page's links and keeps the external ones
    ///
    /// The crawl already fetched every page, but external links are
    /// deliberately re-derived per page here: discovery answers "which
    /// pages exist", this answers "which external links does each page
    /// carry". Whitelisted destinations are kept - the whitelist only
    /// suppresses reporting, which the engine decides.
    async fn collect_external_links(
        &self,
        base_url: &str,
        pages: &HashSet<String>,
    ) -> Vec<(String, String)> {
        let mut edges = Vec::new();
        for page in pages {
            for link in fetch_links(&self.page_client, page).await {
                if !is_internal(base_url, &link) {
                    edges.push((page.clone(), link));
                }
            }
        }
        edges
    }

    /// Probes every (page, link) pair on a bounded worker pool
    ///
    /// Each probe's retry/backoff state lives in its own task; a 429 sleep
    /// suspends only that task. Result order is not deterministic.
    async fn probe_all(&self, edges: Vec<(String, String)>) -> Vec<ProbeResult> {
        let semaphore = Arc::new(Semaphore::new(
            self.config.checker.max_concurrent_probes as usize,
        ));
        let mut tasks = JoinSet::new();

        for (page, dest) in edges {
            let prober = Arc::clone(&self.prober);
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                // The semaphore is never closed while tasks run
                let _permit = semaphore.acquire_owned().await.unwrap();
                prober.probe(&dest, &page).await
            });
        }

        let mut results = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(result) => results.push(result),
                Err(e) => tracing::error!("Probe task failed: {}", e),
            }
        }
        results
    }
}

/// Runs a full check with the given configuration
///
/// This is the main library entry point, a thin wrapper over
/// [`Checker::run`].
///
/// # Example
///
/// ```no_run
/// use linktide::config::Config;
/// use linktide::checker::run_check;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = run_check(
///     Config::default(),
///     "https://site.test",
///     Path::new("state.json"),
///     Path::new("state.json"),
/// )
/// .await?;
/// std::process::exit(if report.is_failure() { 1 } else { 0 });
/// # }
/// ```
pub async fn run_check(
    config: Config,
    base_url: &str,
    state_read: &Path,
    state_write: &Path,
) -> Result<CheckReport, CheckError> {
    let checker = Checker::new(config)?;
    checker.run(base_url, state_read, state_write).await
}
