use crate::StateError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::Path;

/// Persisted mapping from external URL to the last confirmed-healthy
/// observation
///
/// Keys are the exact URL strings as first observed, not normalized. The
/// store is loaded once at run start, mutated only by the report engine's
/// sequential result loop, pruned, and written once at run end.
///
/// On disk this is a plain JSON object of URL to ISO-8601 UTC timestamp.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutageState {
    entries: HashMap<String, DateTime<Utc>>,
}

impl OutageState {
    /// Creates an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads persisted state from a file
    ///
    /// Load failures are never fatal: a missing file yields an empty state
    /// silently, and an unreadable or unparsable file yields an empty state
    /// with a warning. The run proceeds either way.
    pub fn load(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No state file at {}, starting fresh", path.display());
                return Self::new();
            }
            Err(e) => {
                tracing::warn!(
                    "Could not read state file {}: {}, starting fresh",
                    path.display(),
                    e
                );
                return Self::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(
                    "Could not parse state file {}: {}, starting fresh",
                    path.display(),
                    e
                );
                Self::new()
            }
        }
    }

    /// Writes the state to a file
    ///
    /// The JSON is written to a sibling temp file first and renamed into
    /// place, so a crash mid-write cannot leave a truncated state file.
    pub fn save(&self, path: &Path) -> Result<(), StateError> {
        let json = serde_json::to_string_pretty(self)?;

        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Records a confirmed-healthy observation for a URL
    ///
    /// Called for every HTTP 200 probe, whitelisted or not. Broken probes
    /// never touch the store; a miss after a prior success is exactly what
    /// the grace period tolerates.
    pub fn record_healthy(&mut self, url: &str, now: DateTime<Utc>) {
        self.entries.insert(url.to_string(), now);
    }

    /// Returns the last confirmed-healthy timestamp for a URL, if any
    pub fn last_ok(&self, url: &str) -> Option<DateTime<Utc>> {
        self.entries.get(url).copied()
    }

    /// Removes every entry whose timestamp is at or before the cutoff
    ///
    /// Invoked once after all probing, immediately before [`save`].
    ///
    /// [`save`]: OutageState::save
    pub fn prune(&mut self, cutoff: DateTime<Utc>) {
        self.entries.retain(|_, timestamp| *timestamp > cutoff);
    }

    /// Returns the number of tracked URLs
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no URLs are tracked
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if the URL has an entry
    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }
}
