// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Picks the host with the most free capacity for a target architecture.

use std::collections::HashMap;

use crate::host::{Host, HostInventory};

/// Select the best host of architecture `target_arch` given the current
/// per-host assignment tally.
///
/// Hosts are visited in the inventory's sorted-by-name order so that ties
/// (equal free capacity) resolve to the first host encountered, making the
/// result deterministic for a given inventory and tally. A host whose free
/// capacity is zero or negative (the over-subscription race documented in
/// the concurrency model) is never selected.
pub fn select_host<'a>(
    target_arch: &str,
    inventory: &'a HostInventory,
    assigned_counts: &HashMap<String, u32>,
) -> Option<&'a Host> {
    let mut best: Option<&Host> = None;
    let mut best_free: i64 = 0;

    for host in inventory.iter() {
        if host.arch != target_arch {
            continue;
        }
        let assigned = *assigned_counts.get(&host.name).unwrap_or(&0) as i64;
        let free = host.concurrency as i64 - assigned;
        if free > best_free {
            best = Some(host);
            best_free = free;
        }
    }

    best
}

/// Build the `hostName -> count` tally from a flat list of `assigned-host`
/// label values (one entry per task-run currently holding a slot).
pub fn tally_assignments<I, S>(assigned_hosts: I) -> HashMap<String, u32>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut counts = HashMap::new();
    for host in assigned_hosts {
        *counts.entry(host.into()).or_insert(0u32) += 1;
    }
    counts
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod tests;
