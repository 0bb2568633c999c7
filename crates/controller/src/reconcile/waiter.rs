// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Waiter wakeup: picks the oldest parked task for a freed architecture and
//! strips its `waiting-for-arch` label.

use hostbroker_core::labels::LABEL_WAITING_FOR_ARCH;
use tracing::info;

use crate::error::ControllerError;
use crate::reconcile::ReconcileContext;

pub async fn wake(ctx: &ReconcileContext, arch: &str) -> Result<(), ControllerError> {
    let waiters = ctx.store.list_waiting_task_runs(arch).await?;

    let Some(oldest) = waiters
        .iter()
        .min_by_key(|t| (t.creation_timestamp_ms, t.name.clone()))
    else {
        return Ok(());
    };

    let mut updated = oldest.clone();
    updated.labels.remove(LABEL_WAITING_FOR_ARCH);
    ctx.store.update_task_run(&updated).await?;

    info!(namespace = %oldest.namespace, name = %oldest.name, arch = %arch, "woke waiter");
    Ok(())
}

#[cfg(test)]
#[path = "waiter_tests.rs"]
mod tests;
