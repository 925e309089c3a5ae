use std::time::Duration;

/// Result of probing one external link
///
/// Produced once per (page, external link) pair and immutable after
/// creation.
#[derive(Debug, Clone)]
pub struct ProbeResult {
    /// The external site the link directs to
    pub dest: String,

    /// The internal page the link was found on
    pub page: String,

    /// HTTP status code of the terminal attempt, or -1 if no HTTP response
    /// was received
    pub code: i32,

    /// Human-readable meaning of the failure; empty for healthy links
    pub reason: String,

    /// Whether the link is considered broken
    pub is_broken: bool,
}

impl ProbeResult {
    /// A link that answered HTTP 200
    pub(crate) fn healthy(dest: String, page: String, code: u16) -> Self {
        Self {
            dest,
            page,
            code: i32::from(code),
            reason: String::new(),
            is_broken: false,
        }
    }

    /// A link whose terminal attempt failed
    pub(crate) fn broken(dest: String, page: String, code: i32, reason: String) -> Self {
        Self {
            dest,
            page,
            code,
            reason,
            is_broken: true,
        }
    }
}

/// Classification of a single probe attempt
///
/// These are the named states of the retry machine: `Healthy` is terminal
/// success, `RateLimited` backs off and retries, `Broken` retries until the
/// attempt cap makes it terminal.
#[derive(Debug)]
pub(crate) enum Classification {
    /// HTTP 200
    Healthy { code: u16 },

    /// HTTP 429; retry after the given delay
    RateLimited { code: u16, delay: Duration },

    /// Everything else, with the reason it is considered broken
    Broken { code: i32, reason: String },
}
