// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Advisory `hostName -> assignedCount` cache. Correctness never depends on
//! this being accurate — the cluster-wide list remains the authority on
//! every allocation, and this only stands in when that list fails.

use std::collections::HashMap;

use parking_lot::RwLock;

/// Per-host assignment tally, reseeded from a cluster-wide list on every
/// successful allocation query and otherwise kept warm by the reconciler's
/// own observations.
#[derive(Default)]
pub struct AssignmentCache {
    counts: RwLock<Option<HashMap<String, u32>>>,
}

impl AssignmentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` once the cache has been seeded at least once in this process's
    /// lifetime. The Selector only trusts this as a fallback once it's warm;
    /// a cold cache means a failed list surfaces as a retriable error instead.
    pub fn is_warm(&self) -> bool {
        self.counts.read().is_some()
    }

    /// Seed (or reseed) the cache from a freshly computed tally.
    pub fn seed(&self, counts: HashMap<String, u32>) {
        *self.counts.write() = Some(counts);
    }

    /// A snapshot of the current tally, or an empty map if never seeded.
    pub fn snapshot(&self) -> HashMap<String, u32> {
        self.counts.read().clone().unwrap_or_default()
    }

    /// Record that `host` just gained a slot.
    pub fn increment(&self, host: &str) {
        let mut guard = self.counts.write();
        let counts = guard.get_or_insert_with(HashMap::new);
        *counts.entry(host.to_string()).or_insert(0) += 1;
    }

    /// Record that `host` just released a slot. No-op if the count is
    /// already zero or the cache has never been seeded for that host.
    pub fn decrement(&self, host: &str) {
        let mut guard = self.counts.write();
        if let Some(counts) = guard.as_mut() {
            if let Some(count) = counts.get_mut(host) {
                *count = count.saturating_sub(1);
            }
        }
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
