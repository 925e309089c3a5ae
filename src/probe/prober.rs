use crate::config::CheckerConfig;
use crate::probe::{Classification, ProbeResult};
use reqwest::header::{LOCATION, RETRY_AFTER};
use reqwest::{redirect::Policy, Client, Response, StatusCode};
use std::time::Duration;
use url::Url;

/// Total number of network attempts per destination; the last attempt's
/// outcome is always terminal
pub const MAX_ATTEMPTS: u32 = 3;

/// Bounded-retry reachability checker for external URLs
pub struct Prober {
    client: Client,
    backoff_base: Duration,
    redirect_limit: u32,
}

impl Prober {
    /// Creates a prober from the checker configuration
    ///
    /// The client never follows redirects on its own; the prober walks the
    /// chain hop by hop so an unresolvable 302/307 stays observable.
    pub fn new(config: &CheckerConfig, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(user_agent)
            .redirect(Policy::none())
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            backoff_base: Duration::from_secs(config.backoff_base_seconds),
            redirect_limit: config.redirect_limit,
        })
    }

    /// Probes one external URL, retrying up to [`MAX_ATTEMPTS`] times
    ///
    /// The retry machine is an explicit loop over {Attempting, Backoff,
    /// Terminal}: a 429 sleeps (Retry-After when numeric, else
    /// `backoff_base * attempt`) before the next attempt, every other
    /// failure retries immediately, and the final attempt's classification
    /// is terminal no matter what. This function never returns an error.
    ///
    /// # Arguments
    ///
    /// * `dest` - The external URL to check
    /// * `page` - The internal page the link was found on, carried through
    ///   into the result
    pub async fn probe(&self, dest: &str, page: &str) -> ProbeResult {
        let mut attempt = 1;
        loop {
            tracing::info!("Checking link {} (on page {}, attempt {})", dest, page, attempt);

            match self.attempt(dest, attempt).await {
                Classification::Healthy { code } => {
                    return ProbeResult::healthy(dest.to_string(), page.to_string(), code);
                }

                Classification::RateLimited { code, delay } => {
                    if attempt >= MAX_ATTEMPTS {
                        return ProbeResult::broken(
                            dest.to_string(),
                            page.to_string(),
                            i32::from(code),
                            "Too many requests".to_string(),
                        );
                    }
                    tracing::info!(
                        "Rate limit hit for {}, retrying in {} seconds",
                        dest,
                        delay.as_secs()
                    );
                    tokio::time::sleep(delay).await;
                }

                Classification::Broken { code, reason } => {
                    if attempt >= MAX_ATTEMPTS {
                        return ProbeResult::broken(dest.to_string(), page.to_string(), code, reason);
                    }
                }
            }

            attempt += 1;
        }
    }

    /// Performs a single network attempt, following redirects manually
    async fn attempt(&self, dest: &str, attempt: u32) -> Classification {
        // Both the request timeout and the 429 fallback delay scale
        // linearly, so later attempts tolerate slower hosts
        let scaled = self.backoff_base * attempt;

        let mut url = dest.to_string();
        let mut last_redirect: Option<StatusCode> = None;

        for _ in 0..=self.redirect_limit {
            let response = match self.client.get(&url).timeout(scaled).send().await {
                Ok(response) => response,
                Err(e) if e.is_timeout() => {
                    return Classification::Broken {
                        code: -1,
                        reason: "Timeout".to_string(),
                    }
                }
                Err(e) => {
                    return Classification::Broken {
                        code: -1,
                        reason: format!("Request error: {}", e),
                    }
                }
            };

            let status = response.status();
            if status.is_redirection() {
                match redirect_target(&response, &url) {
                    Some(next) => {
                        tracing::trace!("{} redirected ({}) to {}", url, status.as_u16(), next);
                        last_redirect = Some(status);
                        url = next;
                        continue;
                    }
                    // A redirect that names no usable target is terminal
                    None => return classify_response(status, last_redirect, None, scaled),
                }
            }

            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .map(|value| value.to_string());

            return classify_response(status, last_redirect, retry_after.as_deref(), scaled);
        }

        // Hop limit exhausted while still being redirected
        match last_redirect {
            Some(status) => classify_response(status, last_redirect, None, scaled),
            None => Classification::Broken {
                code: -1,
                reason: "Unspecified error".to_string(),
            },
        }
    }
}

/// Resolves the Location header of a redirect response against the current
/// URL, returning None when the redirect cannot be followed
fn redirect_target(response: &Response, current: &str) -> Option<String> {
    let location = response.headers().get(LOCATION)?.to_str().ok()?;
    let base = Url::parse(current).ok()?;
    base.join(location).ok().map(|resolved| resolved.to_string())
}

/// Classifies a terminal HTTP response
///
/// `last_redirect` is the status of the redirect hop that led here, if any;
/// an otherwise-unexplained outcome downstream of a 302/307 is reported as
/// an authentication-shaped redirect.
fn classify_response(
    status: StatusCode,
    last_redirect: Option<StatusCode>,
    retry_after: Option<&str>,
    backoff: Duration,
) -> Classification {
    let code = status.as_u16();

    if code == 200 {
        return Classification::Healthy { code };
    }

    if code == 401 {
        return broken(code, "Unauthorized");
    }
    if code == 403 {
        return broken(code, "Forbidden");
    }
    if code == 404 {
        return broken(code, "Page not found");
    }
    if code == 429 {
        return Classification::RateLimited {
            code,
            delay: parse_retry_after(retry_after, backoff),
        };
    }
    if (400..500).contains(&code) {
        return broken(code, "Client error");
    }
    if code >= 500 {
        return broken(code, "Server error (possibly because of authentication)");
    }

    // Unresolvable redirect, or a non-200 success downstream of one
    if status.is_redirection() && (code == 302 || code == 307) {
        return broken(code, "Unauthorized redirect (likely)");
    }
    if let Some(prev) = last_redirect {
        if prev == StatusCode::FOUND || prev == StatusCode::TEMPORARY_REDIRECT {
            return broken(prev.as_u16(), "Unauthorized redirect (likely)");
        }
    }

    broken(code, "Unspecified error")
}

fn broken(code: u16, reason: &str) -> Classification {
    Classification::Broken {
        code: i32::from(code),
        reason: reason.to_string(),
    }
}

/// Parses a Retry-After header value as whole seconds
///
/// Non-numeric values (including HTTP-dates and fractional seconds) fall
/// back to the linear backoff for the current attempt.
fn parse_retry_after(value: Option<&str>, fallback: Duration) -> Duration {
    value
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(fallback)
}
