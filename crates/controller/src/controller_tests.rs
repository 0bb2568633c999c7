// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;
use std::time::Duration;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::runtime::controller::Action;

use super::*;
use crate::cache::AssignmentCache;
use crate::error::ControllerError;
use crate::resources::TaskRunSpec;
use crate::store_fake::FakeObjectStore;

fn ctx() -> Arc<ReconcileContext> {
    Arc::new(ReconcileContext {
        store: Arc::new(FakeObjectStore::new()),
        cache: Arc::new(AssignmentCache::new()),
        operator_namespace: "multi-arch-controller".to_string(),
        park_requeue: Duration::from_secs(60),
    })
}

#[test]
fn await_change_outcome_becomes_await_change_action() {
    let action = outcome_to_action(ReconcileOutcome::await_change());
    assert_eq!(format!("{action:?}"), format!("{:?}", Action::await_change()));
}

#[test]
fn requeue_outcome_carries_its_delay_into_the_action() {
    let action = outcome_to_action(ReconcileOutcome::requeue(Duration::from_secs(60)));
    assert_eq!(format!("{action:?}"), format!("{:?}", Action::requeue(Duration::from_secs(60))));
}

#[test]
fn a_retriable_error_requeues_after_the_fixed_backoff() {
    let task_run = Arc::new(TaskRun {
        metadata: ObjectMeta {
            name: Some("build-a".to_string()),
            namespace: Some("ns1".to_string()),
            ..Default::default()
        },
        spec: TaskRunSpec::default(),
        status: None,
    });
    let err = ControllerError::HostConfigMissing("host-config".to_string(), "ns".to_string());

    let action = error_policy(task_run, &err, ctx());
    assert_eq!(format!("{action:?}"), format!("{:?}", Action::requeue(ERROR_REQUEUE)));
}
