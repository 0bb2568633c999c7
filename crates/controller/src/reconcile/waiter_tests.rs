// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;
use std::time::Duration;

use hostbroker_core::test_support::waiting_task;

use super::*;
use crate::cache::AssignmentCache;
use crate::store_fake::FakeObjectStore;

const OPERATOR_NS: &str = "multi-arch-controller";

fn ctx(store: Arc<FakeObjectStore>) -> ReconcileContext {
    ReconcileContext {
        store,
        cache: Arc::new(AssignmentCache::new()),
        operator_namespace: OPERATOR_NS.to_string(),
        park_requeue: Duration::from_secs(60),
    }
}

#[tokio::test]
async fn no_waiters_is_a_no_op() {
    let store = Arc::new(FakeObjectStore::new());
    wake(&ctx(store), "arm64").await.unwrap();
}

#[tokio::test]
async fn two_waiters_wakes_the_oldest_first() {
    let store = Arc::new(FakeObjectStore::new());
    let newer = waiting_task("ns1", "build-b", "arm64", 2000);
    let older = waiting_task("ns1", "build-a", "arm64", 1000);
    store.insert_task_run(newer.clone());
    store.insert_task_run(older.clone());

    wake(&ctx(store.clone()), "arm64").await.unwrap();

    assert_eq!(store.task_run("ns1", "build-a").unwrap().waiting_for_arch(), None);
    assert_eq!(store.task_run("ns1", "build-b").unwrap().waiting_for_arch(), Some("arm64"));
}

#[tokio::test]
async fn ties_in_creation_time_break_by_name() {
    let store = Arc::new(FakeObjectStore::new());
    let b = waiting_task("ns1", "build-b", "arm64", 1000);
    let a = waiting_task("ns1", "build-a", "arm64", 1000);
    store.insert_task_run(b.clone());
    store.insert_task_run(a.clone());

    wake(&ctx(store.clone()), "arm64").await.unwrap();

    assert_eq!(store.task_run("ns1", "build-a").unwrap().waiting_for_arch(), None);
    assert_eq!(store.task_run("ns1", "build-b").unwrap().waiting_for_arch(), Some("arm64"));
}

#[tokio::test]
async fn a_waiter_for_a_different_architecture_is_left_alone() {
    let store = Arc::new(FakeObjectStore::new());
    let arm = waiting_task("ns1", "build-a", "arm64", 1000);
    let amd = waiting_task("ns1", "build-b", "amd64", 1000);
    store.insert_task_run(arm.clone());
    store.insert_task_run(amd.clone());

    wake(&ctx(store.clone()), "arm64").await.unwrap();

    assert_eq!(store.task_run("ns1", "build-a").unwrap().waiting_for_arch(), None);
    assert_eq!(store.task_run("ns1", "build-b").unwrap().waiting_for_arch(), Some("amd64"));
}
