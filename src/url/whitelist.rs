use crate::config::WhitelistConfig;
use crate::url::normalize_url;

/// Static allow-list exempting destinations from crawling recursion and
/// failure reporting
///
/// Entries are normalized once at construction (lowercased host + path,
/// scheme/query/fragment discarded), so membership checks are a plain
/// string comparison. The whitelist gates two independent behaviors at its
/// call sites: the crawler never recurses into whitelisted URLs, and the
/// report engine never counts them as broken.
#[derive(Debug, Clone, Default)]
pub struct Whitelist {
    urls: Vec<String>,
    prefixes: Vec<String>,
}

impl Whitelist {
    /// Creates a whitelist from exact URLs and URL prefixes
    pub fn new(urls: Vec<String>, prefixes: Vec<String>) -> Self {
        Self {
            urls: urls.iter().map(|u| normalize_url(u)).collect(),
            prefixes: prefixes.iter().map(|p| normalize_url(p)).collect(),
        }
    }

    /// Builds a whitelist from the configuration section
    pub fn from_config(config: &WhitelistConfig) -> Self {
        Self::new(config.urls.clone(), config.prefixes.clone())
    }

    /// Checks whether a destination URL is whitelisted
    ///
    /// True if the normalized URL exactly equals an exact entry, or starts
    /// with a prefix entry.
    pub fn is_whitelisted(&self, url: &str) -> bool {
        let cleaned = normalize_url(url);

        if self.urls.iter().any(|entry| *entry == cleaned) {
            return true;
        }

        self.prefixes
            .iter()
            .any(|prefix| cleaned.starts_with(prefix.as_str()))
    }

    /// Returns the total number of entries
    pub fn len(&self) -> usize {
        self.urls.len() + self.prefixes.len()
    }

    /// Returns true if the whitelist has no entries
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty() && self.prefixes.is_empty()
    }
}
