// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn data(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[test]
fn parses_a_single_host() {
    let inv = HostInventory::parse(&data(&[
        ("h1.address", "1.2.3.4"),
        ("h1.user", "ci"),
        ("h1.arch", "arm64"),
        ("h1.secret", "h1-key"),
        ("h1.concurrency", "2"),
    ]))
    .unwrap();

    let h1 = inv.get("h1").unwrap();
    assert_eq!(h1.address, "1.2.3.4");
    assert_eq!(h1.user, "ci");
    assert_eq!(h1.arch, "arm64");
    assert_eq!(h1.secret, "h1-key");
    assert_eq!(h1.concurrency, 2);
    assert_eq!(inv.len(), 1);
}

#[test]
fn host_name_containing_dots_is_reassembled_on_last_dot() {
    let inv = HostInventory::parse(&data(&[
        ("build.farm.01.arch", "amd64"),
        ("build.farm.01.concurrency", "1"),
    ]))
    .unwrap();

    let host = inv.get("build.farm.01").expect("host name with dots should be grouped correctly");
    assert_eq!(host.arch, "amd64");
    assert_eq!(host.concurrency, 1);
}

#[test]
fn keys_without_a_dot_are_skipped() {
    let inv = HostInventory::parse(&data(&[("nodothere", "whatever")])).unwrap();
    assert!(inv.is_empty());
}

#[test]
fn unknown_attribute_is_recorded_not_rejected() {
    let inv = HostInventory::parse(&data(&[("h1.arch", "arm64"), ("h1.nonsense", "x")])).unwrap();
    assert_eq!(inv.get("h1").unwrap().arch, "arm64");
    assert_eq!(inv.unknown_attributes(), &[("h1".to_string(), "nonsense".to_string())]);
}

#[test]
fn missing_attributes_leave_zero_valued_fields() {
    let inv = HostInventory::parse(&data(&[("h1.arch", "arm64")])).unwrap();
    let h1 = inv.get("h1").unwrap();
    assert_eq!(h1.concurrency, 0);
    assert_eq!(h1.address, "");
}

#[test]
fn invalid_concurrency_aborts_the_whole_load() {
    let err = HostInventory::parse(&data(&[("h1.concurrency", "not-a-number")])).unwrap_err();
    match err {
        CoreError::InvalidConcurrency { host, value } => {
            assert_eq!(host, "h1");
            assert_eq!(value, "not-a-number");
        }
    }
}

#[test]
fn multiple_hosts_are_grouped_independently() {
    let inv = HostInventory::parse(&data(&[
        ("h1.arch", "arm64"),
        ("h1.concurrency", "2"),
        ("h2.arch", "amd64"),
        ("h2.concurrency", "4"),
    ]))
    .unwrap();

    assert_eq!(inv.len(), 2);
    assert_eq!(inv.get("h1").unwrap().concurrency, 2);
    assert_eq!(inv.get("h2").unwrap().concurrency, 4);
}

#[test]
fn empty_document_is_an_empty_inventory() {
    let inv = HostInventory::parse(&BTreeMap::new()).unwrap();
    assert!(inv.is_empty());
}
