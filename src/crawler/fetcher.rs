//! HTTP fetcher for internal pages
//!
//! Fetching for link extraction is deliberately a total operation: a page
//! that cannot be fetched or parsed simply contributes no links. Downstream
//! code depends on that, so failures are swallowed here (with a debug log),
//! never propagated.

use crate::crawler::parser::extract_links;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Timeout for a single page fetch
const PAGE_FETCH_TIMEOUT_SECS: u64 = 30;

/// Builds the HTTP client used for fetching internal pages
///
/// Redirects are followed normally here; only the external prober needs to
/// observe individual hops.
///
/// # Arguments
///
/// * `user_agent` - Full User-Agent header value
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_page_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(PAGE_FETCH_TIMEOUT_SECS))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page and returns the absolute URLs of its anchor targets
///
/// Issues a single, non-retried GET. Any transport or parse failure returns
/// an empty sequence. The response body is parsed regardless of status code;
/// error pages can still carry links. Relative references are resolved
/// against the requested URL. Order is not guaranteed to be stable across
/// runs.
pub async fn fetch_links(client: &Client, url: &str) -> Vec<String> {
    let body = match fetch_page(client, url).await {
        Some(body) => body,
        None => {
            tracing::debug!("Fetch failed for {}, treating as no links", url);
            return Vec::new();
        }
    };

    let page_url = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::debug!("Unparsable page URL {}: {}", url, e);
            return Vec::new();
        }
    };

    extract_links(&body, &page_url)
}

/// Fetches the raw body of a page, swallowing all failures
async fn fetch_page(client: &Client, url: &str) -> Option<String> {
    let response = client.get(url).send().await.ok()?;
    response.text().await.ok()
}
