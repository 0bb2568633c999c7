// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use std::collections::BTreeMap;

use crate::host::Host;
use crate::labels::{TaskView, LABEL_MULTI_ARCH_REQUIRED, LABEL_TARGET_ARCHITECTURE};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for core state machine types.
pub mod strategies {
    use proptest::prelude::*;

    use crate::host::Host;

    pub fn arb_arch() -> impl Strategy<Value = String> {
        prop_oneof![Just("arm64".to_string()), Just("amd64".to_string()), Just("ppc64le".to_string())]
    }

    /// A host with a plausible concurrency budget and one of three archs.
    pub fn arb_host(name: &'static str) -> impl Strategy<Value = Host> {
        (arb_arch(), 0u32..8).prop_map(move |(arch, concurrency)| Host {
            name: name.to_string(),
            address: format!("{name}.example.com"),
            user: "ci".to_string(),
            arch,
            secret: format!("{name}-key"),
            concurrency,
        })
    }

    /// A tally entry: a host name paired with an assigned count.
    pub fn arb_tally_entry(name: &'static str) -> impl Strategy<Value = (String, u32)> {
        (0u32..10).prop_map(move |count| (name.to_string(), count))
    }
}

// ── Factory functions ───────────────────────────────────────────────────

pub fn host(name: &str, arch: &str, concurrency: u32) -> Host {
    Host {
        name: name.to_string(),
        address: format!("{name}.example.com"),
        user: "ci".to_string(),
        arch: arch.to_string(),
        secret: format!("{name}-key"),
        concurrency,
    }
}

/// A freshly-submitted user task, unclassified (no `assigned-host`, no
/// `waiting-for-arch`).
pub fn user_task(namespace: &str, name: &str, arch: &str, created_ms: i64) -> TaskView {
    let mut labels = BTreeMap::new();
    labels.insert(LABEL_TARGET_ARCHITECTURE.to_string(), arch.to_string());
    labels.insert(LABEL_MULTI_ARCH_REQUIRED.to_string(), "true".to_string());

    TaskView {
        namespace: namespace.to_string(),
        name: name.to_string(),
        creation_timestamp_ms: created_ms,
        labels,
        finalizers: Vec::new(),
        completion_time_ms: None,
        deletion_timestamp_ms: None,
        succeeded: None,
        params: BTreeMap::new(),
    }
}

/// A user task that has already been assigned `host`.
pub fn assigned_task(namespace: &str, name: &str, arch: &str, host: &str, created_ms: i64) -> TaskView {
    let mut t = user_task(namespace, name, arch, created_ms);
    t.labels.insert(crate::labels::LABEL_ASSIGNED_HOST.to_string(), host.to_string());
    t.finalizers.push(crate::labels::FINALIZER.to_string());
    t
}

/// A user task parked waiting for `arch`.
pub fn waiting_task(namespace: &str, name: &str, arch: &str, created_ms: i64) -> TaskView {
    let mut t = user_task(namespace, name, arch, created_ms);
    t.labels.insert(crate::labels::LABEL_WAITING_FOR_ARCH.to_string(), arch.to_string());
    t
}

/// A provision or clean helper task-run.
pub fn helper_task(
    kind: crate::labels::TaskKind,
    operator_namespace: &str,
    name: &str,
    arch: &str,
    params: BTreeMap<String, String>,
) -> TaskView {
    let mut labels = BTreeMap::new();
    labels.insert(crate::labels::LABEL_TASK_TYPE.to_string(), kind.label_value().to_string());
    labels.insert(LABEL_TARGET_ARCHITECTURE.to_string(), arch.to_string());

    TaskView {
        namespace: operator_namespace.to_string(),
        name: name.to_string(),
        creation_timestamp_ms: 0,
        labels,
        finalizers: Vec::new(),
        completion_time_ms: None,
        deletion_timestamp_ms: None,
        succeeded: None,
        params,
    }
}
