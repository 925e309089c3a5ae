use serde::Deserialize;

/// Main configuration structure for Linktide
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub checker: CheckerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub whitelist: WhitelistConfig,
}

/// Checker behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CheckerConfig {
    /// Trailing window (days) during which a previously healthy link's
    /// outages are suppressed from reporting
    #[serde(rename = "grace-days", default = "default_grace_days")]
    pub grace_days: u32,

    /// Base (seconds) for probe timeouts and 429 backoff; both scale
    /// linearly with the attempt number
    #[serde(rename = "backoff-base-seconds", default = "default_backoff_base")]
    pub backoff_base_seconds: u64,

    /// Maximum number of external links probed concurrently
    #[serde(rename = "max-concurrent-probes", default = "default_max_concurrent")]
    pub max_concurrent_probes: u32,

    /// Maximum number of redirect hops followed per probe attempt
    #[serde(rename = "redirect-limit", default = "default_redirect_limit")]
    pub redirect_limit: u32,
}

/// User agent configuration for outgoing requests
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Full User-Agent header value sent with every request. Defaults to a
    /// common browser string, since some hosts block obvious bots.
    #[serde(default = "default_impersonate")]
    pub impersonate: String,
}

/// Whitelist configuration
///
/// Whitelisted destinations are exempt from both crawl recursion and
/// broken-link reporting. Entries are compared in normalized form
/// (lowercased host + path, scheme/query/fragment ignored).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WhitelistConfig {
    /// Exact URLs to ignore
    #[serde(default)]
    pub urls: Vec<String>,

    /// URL prefixes to ignore
    #[serde(default)]
    pub prefixes: Vec<String>,
}

fn default_grace_days() -> u32 {
    3
}

fn default_backoff_base() -> u64 {
    10
}

fn default_max_concurrent() -> u32 {
    8
}

fn default_redirect_limit() -> u32 {
    10
}

fn default_impersonate() -> String {
    // A current Safari string; enough to avoid trivial bot-blocking.
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 \
     (KHTML, like Gecko) Version/17.4 Safari/605.1.15"
        .to_string()
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            grace_days: default_grace_days(),
            backoff_base_seconds: default_backoff_base(),
            max_concurrent_probes: default_max_concurrent(),
            redirect_limit: default_redirect_limit(),
        }
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            impersonate: default_impersonate(),
        }
    }
}
