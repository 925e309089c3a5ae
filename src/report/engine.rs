use crate::probe::ProbeResult;
use crate::state::OutageState;
use crate::url::Whitelist;
use chrono::{DateTime, Duration, Utc};

/// Aggregated outcome of one checker run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    /// Number of (page, external link) pairs probed
    pub total_external: usize,

    /// Broken links that were reported
    pub broken: usize,

    /// Broken links ignored because they are whitelisted
    pub whitelist_ignored: usize,

    /// Broken links suppressed because they were healthy within the grace
    /// window
    pub suppressed: usize,
}

impl CheckReport {
    /// The run fails iff at least one unsuppressed broken link was found
    pub fn is_failure(&self) -> bool {
        self.broken > 0
    }
}

/// Applies the decision rules to every probe result
///
/// For each result, in order:
/// 1. healthy: refresh the state entry for the destination, report nothing
/// 2. broken and whitelisted: count as ignored
/// 3. broken with a last-OK timestamp inside the grace window: warn and
///    suppress; the state entry is NOT refreshed
/// 4. otherwise: count as broken and print destination, source page,
///    status code, and reason
///
/// This loop is the outage state's single writer; probe results may be
/// produced concurrently, but they are evaluated here sequentially.
pub fn evaluate(
    results: &[ProbeResult],
    whitelist: &Whitelist,
    state: &mut OutageState,
    now: DateTime<Utc>,
    grace_days: u32,
) -> CheckReport {
    let cutoff = now - Duration::days(i64::from(grace_days));

    let mut report = CheckReport {
        total_external: results.len(),
        ..CheckReport::default()
    };

    for result in results {
        if !result.is_broken {
            state.record_healthy(&result.dest, now);
            continue;
        }

        if whitelist.is_whitelisted(&result.dest) {
            report.whitelist_ignored += 1;
            continue;
        }

        if let Some(last_ok) = state.last_ok(&result.dest) {
            if last_ok > cutoff {
                tracing::warn!(
                    "Ignoring outage for {} (last OK {}), within the last {} days",
                    result.dest,
                    last_ok.to_rfc3339(),
                    grace_days
                );
                report.suppressed += 1;
                continue;
            }
        }

        report.broken += 1;
        println!("{} {}", result.code, result.reason);
        println!("    link {}", result.dest);
        println!("    on page {}", result.page);
    }

    report
}
