// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `ObjectStore` port: everything the reconcile handlers need from the
//! backing object store. Two implementations exist —
//! [`crate::KubeObjectStore`] against a real cluster, and
//! [`crate::FakeObjectStore`] for handler tests — mirroring this codebase's
//! adapter-trait-plus-fake pattern.

use std::collections::BTreeMap;

use async_trait::async_trait;
use hostbroker_core::dispatch::{FailureSecretSpec, HelperTaskSpec};
use hostbroker_core::labels::TaskView;

use crate::error::ControllerError;

/// Abstraction over the Kubernetes API calls the reconciler makes. No
/// method here does more than one API round trip; handlers compose these
/// to implement the allocation and release transitions.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch a single task-run. `Ok(None)` on not-found — callers treat a
    /// missing task-run at reconcile entry as a benign delete race.
    async fn get_task_run(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<TaskView>, ControllerError>;

    /// Every task-run cluster-wide carrying a non-empty `assigned-host`
    /// label. Called on every allocation to rebuild the selector's tally;
    /// the advisory cache only stands in when this call itself fails.
    async fn list_assigned_task_runs(&self) -> Result<Vec<TaskView>, ControllerError>;

    /// Every task-run parked with `waiting-for-arch = arch`, for the
    /// waiter-wakeup handler.
    async fn list_waiting_task_runs(&self, arch: &str) -> Result<Vec<TaskView>, ControllerError>;

    /// Commit a label/finalizer mutation. Handlers batch all changes to one
    /// task-run into a single call.
    async fn update_task_run(&self, task: &TaskView) -> Result<(), ControllerError>;

    /// Create a provision or clean helper task-run. Returns the
    /// server-assigned name.
    async fn create_helper_task_run(
        &self,
        operator_namespace: &str,
        spec: &HelperTaskSpec,
    ) -> Result<String, ControllerError>;

    /// Delete a task-run by namespace/name. Not-found is not surfaced as an
    /// error by implementations — callers may still see one from other
    /// causes (e.g. a transient API failure), which remains retriable.
    async fn delete_task_run(&self, namespace: &str, name: &str) -> Result<(), ControllerError>;

    /// Read the flat `host-config` document from the operator namespace.
    /// `Ok(None)` when the document itself does not exist.
    async fn get_host_config(
        &self,
        operator_namespace: &str,
    ) -> Result<Option<BTreeMap<String, String>>, ControllerError>;

    /// Whether a secret exists, without reading its contents. The release
    /// path checks this before deleting the credential secret so the
    /// finalizer can drop once the secret is deleted or already absent.
    async fn get_secret(&self, namespace: &str, name: &str) -> Result<bool, ControllerError>;

    /// Create the provision-failure marker secret.
    async fn create_secret(&self, spec: &FailureSecretSpec) -> Result<(), ControllerError>;

    /// Delete a secret. Not-found is acceptable and swallowed by
    /// implementations.
    async fn delete_secret(&self, namespace: &str, name: &str) -> Result<(), ControllerError>;
}
