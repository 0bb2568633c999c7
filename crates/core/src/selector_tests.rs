// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::BTreeMap;

use proptest::prelude::*;

use super::*;
use crate::test_support::strategies::{arb_host, arb_tally_entry};

fn inventory(hosts: Vec<Host>) -> HostInventory {
    let mut data = BTreeMap::new();
    for h in &hosts {
        data.insert(format!("{}.address", h.name), h.address.clone());
        data.insert(format!("{}.user", h.name), h.user.clone());
        data.insert(format!("{}.arch", h.name), h.arch.clone());
        data.insert(format!("{}.secret", h.name), h.secret.clone());
        data.insert(format!("{}.concurrency", h.name), h.concurrency.to_string());
    }
    HostInventory::parse(&data).unwrap()
}

#[test]
fn picks_the_host_with_most_free_capacity() {
    let inv = inventory(vec![
        crate::test_support::host("h1", "arm64", 2),
        crate::test_support::host("h2", "arm64", 4),
    ]);
    let tally = HashMap::new();
    let chosen = select_host("arm64", &inv, &tally).unwrap();
    assert_eq!(chosen.name, "h2");
}

#[test]
fn existing_assignments_reduce_free_capacity() {
    let inv = inventory(vec![
        crate::test_support::host("h1", "arm64", 2),
        crate::test_support::host("h2", "arm64", 4),
    ]);
    let mut tally = HashMap::new();
    tally.insert("h2".to_string(), 3);
    let chosen = select_host("arm64", &inv, &tally).unwrap();
    assert_eq!(chosen.name, "h1");
}

#[test]
fn ties_resolve_to_first_encountered_in_sorted_order() {
    let inv = inventory(vec![
        crate::test_support::host("b-host", "arm64", 2),
        crate::test_support::host("a-host", "arm64", 2),
    ]);
    let tally = HashMap::new();
    let chosen = select_host("arm64", &inv, &tally).unwrap();
    assert_eq!(chosen.name, "a-host");
}

#[test]
fn host_with_zero_concurrency_is_never_selected() {
    let inv = inventory(vec![crate::test_support::host("h1", "arm64", 0)]);
    let tally = HashMap::new();
    assert!(select_host("arm64", &inv, &tally).is_none());
}

#[test]
fn oversubscribed_host_is_not_selected() {
    let inv = inventory(vec![crate::test_support::host("h1", "arm64", 2)]);
    let mut tally = HashMap::new();
    tally.insert("h1".to_string(), 5);
    assert!(select_host("arm64", &inv, &tally).is_none());
}

#[test]
fn no_host_of_the_requested_architecture() {
    let inv = inventory(vec![crate::test_support::host("h1", "amd64", 4)]);
    let tally = HashMap::new();
    assert!(select_host("arm64", &inv, &tally).is_none());
}

#[test]
fn empty_inventory_selects_nothing() {
    let inv = HostInventory::default();
    let tally = HashMap::new();
    assert!(select_host("arm64", &inv, &tally).is_none());
}

#[test]
fn tally_assignments_counts_occurrences() {
    let tally = tally_assignments(vec!["h1", "h2", "h1", "h1"]);
    assert_eq!(tally.get("h1"), Some(&3));
    assert_eq!(tally.get("h2"), Some(&1));
    assert_eq!(tally.get("h3"), None);
}

proptest! {
    #[test]
    fn selection_never_exceeds_concurrency(
        host in arb_host("h1"),
        (name, assigned) in arb_tally_entry("h1"),
    ) {
        let inv = inventory(vec![host.clone()]);
        let mut tally = HashMap::new();
        tally.insert(name, assigned);

        if let Some(chosen) = select_host(&host.arch, &inv, &tally) {
            prop_assert!(assigned < chosen.concurrency);
        }
    }
}
