// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Provision handler: inspects a completed provision helper and either
//! leaves success alone or writes the failure-marker secret.

use hostbroker_core::dispatch::build_failure_secret;
use hostbroker_core::labels::TaskView;
use tracing::{info, warn};

use crate::error::ControllerError;
use crate::reconcile::{ReconcileContext, ReconcileOutcome};

const PARAM_SECRET_NAME: &str = "SECRET_NAME";
const PARAM_NAMESPACE: &str = "NAMESPACE";

pub async fn reconcile(
    ctx: &ReconcileContext,
    task: &TaskView,
) -> Result<ReconcileOutcome, ControllerError> {
    if task.completion_time_ms.is_none() {
        return Ok(ReconcileOutcome::await_change());
    }

    match task.succeeded {
        Some(true) => {
            info!(namespace = %task.namespace, name = %task.name, "provision succeeded");
        }
        _ => {
            warn!(namespace = %task.namespace, name = %task.name, "provision failed, writing failure secret");
            write_failure_secret(ctx, task).await?;
        }
    }

    ctx.store.delete_task_run(&task.namespace, &task.name).await?;
    Ok(ReconcileOutcome::await_change())
}

async fn write_failure_secret(
    ctx: &ReconcileContext,
    task: &TaskView,
) -> Result<(), ControllerError> {
    let secret_name = task.params.get(PARAM_SECRET_NAME).cloned().unwrap_or_default();
    let namespace = task.params.get(PARAM_NAMESPACE).cloned().unwrap_or_default();
    let target_arch = task.target_architecture().unwrap_or_default();

    let spec = build_failure_secret(&namespace, &secret_name, target_arch);
    ctx.store.create_secret(&spec).await
}

#[cfg(test)]
#[path = "provision_task_tests.rs"]
mod tests;
