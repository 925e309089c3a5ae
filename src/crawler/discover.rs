//! Recursive internal-page discovery
//!
//! Depth-first traversal of the internal link graph, expressed as an
//! explicit stack so a deep site cannot exhaust the call stack. The visited
//! set is keyed on fragment-stripped URLs: URLs differing only by fragment
//! are the same page and are fetched once.

use crate::crawler::fetcher::fetch_links;
use crate::url::{is_internal, strip_fragment};
use reqwest::Client;
use std::collections::HashSet;

/// Discovers every internal page reachable from the base URL
///
/// A URL is internal iff it starts with the base URL after trimming its
/// trailing slash. External links encountered during traversal are
/// discarded here; callers re-derive them per page, keeping "find pages"
/// and "find external links on a page" separate.
///
/// Termination is guaranteed on cyclic link graphs: the visited set only
/// grows and no page is fetched twice.
///
/// # Arguments
///
/// * `client` - The page-fetch HTTP client
/// * `base_url` - Root of the site; also the first page fetched
///
/// # Returns
///
/// The set of discovered internal page URLs, fragment-stripped
pub async fn discover_internal_pages(client: &Client, base_url: &str) -> HashSet<String> {
    let mut visited: HashSet<String> = HashSet::new();
    let mut stack = vec![strip_fragment(base_url)];

    while let Some(url) = stack.pop() {
        if !is_internal(base_url, &url) {
            continue;
        }

        if !visited.insert(url.clone()) {
            continue;
        }

        tracing::debug!("Visiting internal page {}", url);
        for link in fetch_links(client, &url).await {
            stack.push(strip_fragment(&link));
        }
    }

    visited
}

// Traversal behavior (cycle termination, fragment dedup, external cutoff)
// is covered by the wiremock tests in tests/integration/.
