//! URL handling module for Linktide
//!
//! This module provides the normalization used for whitelist and state-store
//! comparisons, fragment stripping for crawl deduplication, the
//! internal/external classification, and the whitelist matcher.

mod normalize;
mod whitelist;

// Re-export main functions
pub use normalize::{normalize_url, strip_fragment};
pub use whitelist::Whitelist;

/// Returns true if `url` belongs to the site rooted at `base_url`
///
/// A URL is internal iff it starts with the base URL after trimming a
/// trailing slash from the base, so `https://site.test` and
/// `https://site.test/` classify identically. Everything else is an
/// external link.
///
/// # Examples
///
/// ```
/// use linktide::url::is_internal;
///
/// assert!(is_internal("https://site.test/", "https://site.test/docs"));
/// assert!(!is_internal("https://site.test/", "https://other.test/"));
/// ```
pub fn is_internal(base_url: &str, url: &str) -> bool {
    url.starts_with(base_url.trim_end_matches('/'))
}
