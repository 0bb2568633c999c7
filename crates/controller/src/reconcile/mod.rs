// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The state classifier and the four reconcile handlers.
//!
//! Each handler takes a [`ReconcileContext`] plus the current
//! [`TaskView`] snapshot and returns a [`ReconcileOutcome`] telling the
//! controller wiring whether and when to requeue.

mod clean_task;
mod provision_task;
mod user_task;
mod waiter;

use std::sync::Arc;
use std::time::Duration;

use hostbroker_core::labels::{Classification, TaskView};
use tracing::debug;

use crate::cache::AssignmentCache;
use crate::error::ControllerError;
use crate::store::ObjectStore;

/// Everything a handler needs beyond the task-run itself: the object-store
/// client, the advisory cache, and the process-wide configuration.
pub struct ReconcileContext {
    pub store: Arc<dyn ObjectStore>,
    pub cache: Arc<AssignmentCache>,
    pub operator_namespace: String,
    pub park_requeue: Duration,
}

/// What the controller wiring should do next (translated to a kube-runtime
/// `Action`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub requeue_after: Option<Duration>,
}

impl ReconcileOutcome {
    pub fn await_change() -> Self {
        Self { requeue_after: None }
    }

    pub fn requeue(after: Duration) -> Self {
        Self { requeue_after: Some(after) }
    }
}

/// Route `task` to its handler, or no-op for anything this dispatcher
/// doesn't recognize.
pub async fn reconcile(
    ctx: &ReconcileContext,
    task: &TaskView,
) -> Result<ReconcileOutcome, ControllerError> {
    match task.classification() {
        Classification::NotOurs => {
            debug!(namespace = %task.namespace, name = %task.name, "not ours, skipping");
            Ok(ReconcileOutcome::await_change())
        }
        Classification::User => user_task::reconcile(ctx, task).await,
        Classification::Provision => provision_task::reconcile(ctx, task).await,
        Classification::Clean => clean_task::reconcile(ctx, task).await,
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
