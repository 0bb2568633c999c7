// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clean handler: deletes the helper task-run on completion, symmetric with
//! the Provision handler rather than leaving clean helpers behind
//! indefinitely.

use hostbroker_core::labels::TaskView;
use tracing::info;

use crate::error::ControllerError;
use crate::reconcile::{ReconcileContext, ReconcileOutcome};

pub async fn reconcile(
    ctx: &ReconcileContext,
    task: &TaskView,
) -> Result<ReconcileOutcome, ControllerError> {
    if task.completion_time_ms.is_none() {
        return Ok(ReconcileOutcome::await_change());
    }

    ctx.store.delete_task_run(&task.namespace, &task.name).await?;
    info!(namespace = %task.namespace, name = %task.name, "clean helper finished, deleted");
    Ok(ReconcileOutcome::await_change())
}

#[cfg(test)]
#[path = "clean_task_tests.rs"]
mod tests;
