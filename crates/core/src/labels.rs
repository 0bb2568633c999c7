// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Label keys, the finalizer name, and the classifier that routes an
//! incoming task-run to one of the four reconcile handlers.

use std::collections::BTreeMap;

/// Submitter-set label naming the required CPU architecture, e.g. `arm64`.
pub const LABEL_TARGET_ARCHITECTURE: &str = "target-architecture";
/// Submitter-set label flagging a task as in-scope for this dispatcher.
pub const LABEL_MULTI_ARCH_REQUIRED: &str = "multi-arch-required";
/// Dispatcher-set label on helper task-runs: `provision` or `clean`.
pub const LABEL_TASK_TYPE: &str = "task-type";
/// Dispatcher-set label naming the host currently holding a slot.
pub const LABEL_ASSIGNED_HOST: &str = "assigned-host";
/// Dispatcher-set label naming the architecture a parked task is waiting for.
pub const LABEL_WAITING_FOR_ARCH: &str = "waiting-for-arch";

/// Value of [`LABEL_TASK_TYPE`] on a provisioning helper.
pub const TASK_TYPE_PROVISION: &str = "provision";
/// Value of [`LABEL_TASK_TYPE`] on a cleanup helper.
pub const TASK_TYPE_CLEAN: &str = "clean";

/// Finalizer the dispatcher registers on any user task it has assigned a
/// host to; its presence blocks deletion until the release path completes.
pub const FINALIZER: &str = "multi-arch-finalizer";

/// Fixed service-account identity helper task-runs execute as.
pub const SERVICE_ACCOUNT: &str = "multi-arch-controller";

/// Well-known name of the host-inventory configuration document.
pub const HOST_CONFIG_NAME: &str = "host-config";

/// The kind of helper task-run, derived from [`LABEL_TASK_TYPE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Provision,
    Clean,
}

impl TaskKind {
    pub fn label_value(self) -> &'static str {
        match self {
            TaskKind::Provision => TASK_TYPE_PROVISION,
            TaskKind::Clean => TASK_TYPE_CLEAN,
        }
    }
}

/// Where the State Classifier routes an incoming task-run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// No labels, or no labels this dispatcher recognizes.
    NotOurs,
    Clean,
    Provision,
    User,
}

/// Route a task-run by its labels.
pub fn classify(labels: &BTreeMap<String, String>) -> Classification {
    if labels.is_empty() {
        return Classification::NotOurs;
    }
    match labels.get(LABEL_TASK_TYPE).map(String::as_str) {
        Some(TASK_TYPE_CLEAN) => Classification::Clean,
        Some(TASK_TYPE_PROVISION) => Classification::Provision,
        _ => {
            if labels.contains_key(LABEL_TARGET_ARCHITECTURE)
                && labels.contains_key(LABEL_MULTI_ARCH_REQUIRED)
            {
                Classification::User
            } else {
                Classification::NotOurs
            }
        }
    }
}

/// A read-only snapshot of the task-run fields the reconciler cares about.
///
/// Plain data, independent of the backing object store, so the handlers in
/// `hostbroker-controller` can be exercised without a Kubernetes type in
/// sight. Timestamps are epoch milliseconds rather than a calendar type to
/// keep this crate free of a date/time dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    pub namespace: String,
    pub name: String,
    pub creation_timestamp_ms: i64,
    pub labels: BTreeMap<String, String>,
    pub finalizers: Vec<String>,
    pub completion_time_ms: Option<i64>,
    pub deletion_timestamp_ms: Option<i64>,
    /// `status.conditions[Succeeded]`; only meaningful for helper task-runs.
    pub succeeded: Option<bool>,
    pub params: BTreeMap<String, String>,
}

impl TaskView {
    pub fn classification(&self) -> Classification {
        classify(&self.labels)
    }

    pub fn has_finalizer(&self) -> bool {
        self.finalizers.iter().any(|f| f == FINALIZER)
    }

    /// True once the task has terminated or deletion has been requested.
    pub fn is_finishing(&self) -> bool {
        self.completion_time_ms.is_some() || self.deletion_timestamp_ms.is_some()
    }

    pub fn assigned_host(&self) -> Option<&str> {
        self.labels.get(LABEL_ASSIGNED_HOST).map(String::as_str)
    }

    pub fn target_architecture(&self) -> Option<&str> {
        self.labels.get(LABEL_TARGET_ARCHITECTURE).map(String::as_str)
    }

    pub fn waiting_for_arch(&self) -> Option<&str> {
        self.labels.get(LABEL_WAITING_FOR_ARCH).map(String::as_str)
    }
}

#[cfg(test)]
#[path = "labels_tests.rs"]
mod tests;
