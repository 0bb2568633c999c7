// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wires the four handlers in `reconcile` to a `kube::runtime::Controller`
//! watch loop over `TaskRun` objects.

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use kube::runtime::controller::Action;
use kube::runtime::watcher;
use kube::runtime::Controller;
use kube::Client;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::error::ControllerError;
use crate::reconcile::{self, ReconcileContext, ReconcileOutcome};
use crate::resources::TaskRun;

const ERROR_REQUEUE: Duration = Duration::from_secs(15);

/// Run the watch loop until `shutdown` fires. Each reconcile is given
/// `reconcile_timeout` to complete; a reconcile that overruns it is treated
/// as a retriable error rather than left to hang. Cancellation drops
/// whatever reconcile is in flight — safe, since every mutation handlers
/// make is idempotent in label space and converges on the next attempt.
pub async fn run(
    client: Client,
    ctx: Arc<ReconcileContext>,
    reconcile_timeout: Duration,
    shutdown: CancellationToken,
) {
    let task_runs = kube::Api::<TaskRun>::all(client);

    Controller::new(task_runs, watcher::Config::default())
        .run(
            move |task_run, ctx| reconcile_one(task_run, ctx, reconcile_timeout),
            error_policy,
            ctx,
        )
        .take_until(shutdown.cancelled())
        .for_each(|result| async move {
            match result {
                Ok((obj_ref, action)) => {
                    info!(?obj_ref, ?action, "reconciled");
                }
                Err(err) => {
                    warn!(error = %err, "reconcile failed");
                }
            }
        })
        .await;

    info!("watch loop stopped");
}

async fn reconcile_one(
    task_run: Arc<TaskRun>,
    ctx: Arc<ReconcileContext>,
    reconcile_timeout: Duration,
) -> Result<Action, ControllerError> {
    let task = crate::resources::task_run::view_of(&task_run);
    let namespace = task.namespace.clone();
    let name = task.name.clone();

    let outcome = tokio::time::timeout(reconcile_timeout, reconcile::reconcile(&ctx, &task))
        .await
        .map_err(|_| ControllerError::Timeout(namespace, name))??;

    Ok(outcome_to_action(outcome))
}

fn outcome_to_action(outcome: ReconcileOutcome) -> Action {
    match outcome.requeue_after {
        Some(after) => Action::requeue(after),
        None => Action::await_change(),
    }
}

fn error_policy(task_run: Arc<TaskRun>, err: &ControllerError, _ctx: Arc<ReconcileContext>) -> Action {
    let name = task_run.metadata.name.clone().unwrap_or_default();
    let namespace = task_run.metadata.namespace.clone().unwrap_or_default();

    if err.is_retriable() {
        warn!(namespace = %namespace, name = %name, error = %err, "retrying after error");
        Action::requeue(ERROR_REQUEUE)
    } else {
        error!(namespace = %namespace, name = %name, error = %err, "giving up, not retriable");
        Action::await_change()
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
