// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::{assigned_task, helper_task, user_task, waiting_task};

#[test]
fn task_with_no_labels_is_not_ours() {
    assert_eq!(classify(&BTreeMap::new()), Classification::NotOurs);
}

#[test]
fn task_type_label_wins_over_user_labels() {
    let mut labels = BTreeMap::new();
    labels.insert(LABEL_TASK_TYPE.to_string(), TASK_TYPE_PROVISION.to_string());
    labels.insert(LABEL_TARGET_ARCHITECTURE.to_string(), "arm64".to_string());
    assert_eq!(classify(&labels), Classification::Provision);
}

#[test]
fn clean_task_type_routes_to_clean() {
    let mut labels = BTreeMap::new();
    labels.insert(LABEL_TASK_TYPE.to_string(), TASK_TYPE_CLEAN.to_string());
    assert_eq!(classify(&labels), Classification::Clean);
}

#[test]
fn target_architecture_and_required_flag_together_route_to_user() {
    let mut labels = BTreeMap::new();
    labels.insert(LABEL_TARGET_ARCHITECTURE.to_string(), "arm64".to_string());
    labels.insert(LABEL_MULTI_ARCH_REQUIRED.to_string(), "true".to_string());
    assert_eq!(classify(&labels), Classification::User);
}

#[test]
fn target_architecture_alone_is_not_ours() {
    let mut labels = BTreeMap::new();
    labels.insert(LABEL_TARGET_ARCHITECTURE.to_string(), "arm64".to_string());
    assert_eq!(classify(&labels), Classification::NotOurs);
}

#[test]
fn unrelated_labels_are_not_ours() {
    let mut labels = BTreeMap::new();
    labels.insert("some-other-label".to_string(), "x".to_string());
    assert_eq!(classify(&labels), Classification::NotOurs);
}

#[test]
fn user_task_view_classification_and_accessors() {
    let t = user_task("ns1", "build-1", "arm64", 1000);
    assert_eq!(t.classification(), Classification::User);
    assert!(!t.has_finalizer());
    assert!(!t.is_finishing());
    assert_eq!(t.target_architecture(), Some("arm64"));
    assert_eq!(t.assigned_host(), None);
}

#[test]
fn assigned_task_view_carries_the_finalizer_and_host() {
    let t = assigned_task("ns1", "build-1", "arm64", "h1", 1000);
    assert!(t.has_finalizer());
    assert_eq!(t.assigned_host(), Some("h1"));
}

#[test]
fn waiting_task_view_records_the_parked_architecture() {
    let t = waiting_task("ns1", "build-1", "ppc64le", 1000);
    assert_eq!(t.waiting_for_arch(), Some("ppc64le"));
    assert_eq!(t.assigned_host(), None);
}

#[test]
fn helper_task_view_classifies_by_task_type_label() {
    let t = helper_task(TaskKind::Provision, "operator-ns", "provision-task-abc", "arm64", BTreeMap::new());
    assert_eq!(t.classification(), Classification::Provision);
    assert_eq!(t.namespace, "operator-ns");
}

#[test]
fn completion_time_or_deletion_timestamp_marks_finishing() {
    let mut t = user_task("ns1", "build-1", "arm64", 1000);
    assert!(!t.is_finishing());
    t.completion_time_ms = Some(2000);
    assert!(t.is_finishing());

    let mut t2 = user_task("ns1", "build-2", "arm64", 1000);
    t2.deletion_timestamp_ms = Some(3000);
    assert!(t2.is_finishing());
}
