//! Recently-reported content hashes
//!
//! Near-simultaneous interceptor firings (a retried fetch plus a socket
//! echo of the same content) would otherwise report twice. Membership in
//! this set is the sole deduplication mechanism; there is no reference
//! counting. Entries self-expire after a fixed horizon, shorter than a
//! user's plausible retry interval.

use dashmap::DashMap;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct RecentlyReportedSet {
    entries: DashMap<String, Instant>,
    horizon: Duration,
}

impl RecentlyReportedSet {
    pub fn new(horizon: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            horizon,
        }
    }

    /// Record a hash; returns true when it was not reported within the
    /// horizon, i.e. the caller should emit the report.
    pub fn insert(&self, content_hash: &str) -> bool {
        self.prune();

        match self.entries.entry(content_hash.to_string()) {
            dashmap::mapref::entry::Entry::Occupied(_) => false,
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(Instant::now());
                true
            }
        }
    }

    /// Membership test without recording
    pub fn contains(&self, content_hash: &str) -> bool {
        self.entries
            .get(content_hash)
            .is_some_and(|inserted| inserted.elapsed() < self.horizon)
    }

    fn prune(&self) {
        self.entries
            .retain(|_, inserted| inserted.elapsed() < self.horizon);
    }
}
