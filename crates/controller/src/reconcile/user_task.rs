// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User handler: allocation, parking, and release.

use hostbroker_core::host::HostInventory;
use hostbroker_core::labels::{TaskView, FINALIZER, LABEL_ASSIGNED_HOST, LABEL_WAITING_FOR_ARCH};
use hostbroker_core::secret::credential_secret_name;
use hostbroker_core::selector::{select_host, tally_assignments};
use hostbroker_core::dispatch::{build_helper_spec, HelperKind};
use tracing::{info, warn};

use crate::error::ControllerError;
use crate::reconcile::{waiter, ReconcileContext, ReconcileOutcome};

pub async fn reconcile(
    ctx: &ReconcileContext,
    task: &TaskView,
) -> Result<ReconcileOutcome, ControllerError> {
    match task.assigned_host() {
        None => reconcile_unassigned(ctx, task).await,
        Some(host_name) => reconcile_assigned(ctx, task, &host_name.to_string()).await,
    }
}

async fn reconcile_unassigned(
    ctx: &ReconcileContext,
    task: &TaskView,
) -> Result<ReconcileOutcome, ControllerError> {
    if task.is_finishing() {
        return Ok(ReconcileOutcome::await_change());
    }

    let target_arch = task.target_architecture().unwrap_or_default().to_string();
    let inventory = load_inventory(ctx).await?;
    let tally = tally_for(ctx).await?;

    match select_host(&target_arch, &inventory, &tally) {
        Some(host) => {
            let secret_name = credential_secret_name(&task.name);
            let spec = build_helper_spec(
                HelperKind::Provision,
                &ctx.operator_namespace,
                &target_arch,
                host,
                &task.namespace,
                &task.name,
                &secret_name,
            );
            ctx.store.create_helper_task_run(&ctx.operator_namespace, &spec).await?;

            let mut updated = task.clone();
            updated.labels.insert(LABEL_ASSIGNED_HOST.to_string(), host.name.clone());
            updated.labels.remove(LABEL_WAITING_FOR_ARCH);
            updated.finalizers.push(FINALIZER.to_string());
            ctx.store.update_task_run(&updated).await?;
            ctx.cache.increment(&host.name);

            info!(
                namespace = %task.namespace, name = %task.name,
                host = %host.name, arch = %target_arch,
                "allocated host"
            );
            Ok(ReconcileOutcome::await_change())
        }
        None => {
            let mut updated = task.clone();
            updated.labels.insert(LABEL_WAITING_FOR_ARCH.to_string(), target_arch.clone());
            ctx.store.update_task_run(&updated).await?;

            info!(namespace = %task.namespace, name = %task.name, arch = %target_arch, "parked, no host available");
            Ok(ReconcileOutcome::requeue(ctx.park_requeue))
        }
    }
}

async fn reconcile_assigned(
    ctx: &ReconcileContext,
    task: &TaskView,
    host_name: &str,
) -> Result<ReconcileOutcome, ControllerError> {
    if !task.is_finishing() {
        return Ok(ReconcileOutcome::await_change());
    }

    let target_arch = task.target_architecture().unwrap_or_default().to_string();
    let secret_name = credential_secret_name(&task.name);

    if let Some(inventory) = ctx.store.get_host_config(&ctx.operator_namespace).await? {
        let inventory = HostInventory::parse(&inventory)?;
        warn_on_unknown_attributes(&inventory);
        if let Some(host) = inventory.get(host_name) {
            let spec = build_helper_spec(
                HelperKind::Clean,
                &ctx.operator_namespace,
                &target_arch,
                host,
                &task.namespace,
                &task.name,
                &secret_name,
            );
            ctx.store.create_helper_task_run(&ctx.operator_namespace, &spec).await?;
        }
    }

    // Only issue the delete when the secret is known to exist; otherwise it's
    // already confirmed absent and the finalizer can drop without a round trip.
    if ctx.store.get_secret(&task.namespace, &secret_name).await? {
        ctx.store.delete_secret(&task.namespace, &secret_name).await?;
    }

    let mut updated = task.clone();
    updated.labels.remove(LABEL_ASSIGNED_HOST);
    updated.finalizers.retain(|f| f != FINALIZER);
    ctx.store.update_task_run(&updated).await?;
    ctx.cache.decrement(host_name);

    info!(namespace = %task.namespace, name = %task.name, host = %host_name, "released host");

    waiter::wake(ctx, &target_arch).await?;

    Ok(ReconcileOutcome::await_change())
}

async fn load_inventory(ctx: &ReconcileContext) -> Result<HostInventory, ControllerError> {
    let data = ctx
        .store
        .get_host_config(&ctx.operator_namespace)
        .await?
        .ok_or_else(|| ControllerError::HostConfigMissing("host-config".to_string(), ctx.operator_namespace.clone()))?;
    let inventory = HostInventory::parse(&data)?;
    warn_on_unknown_attributes(&inventory);
    Ok(inventory)
}

fn warn_on_unknown_attributes(inventory: &HostInventory) {
    for (host, attr) in inventory.unknown_attributes() {
        warn!(host = %host, attribute = %attr, "unrecognized host-config attribute, ignored");
    }
}

/// The cluster-wide list is the authority for every allocation, not just the
/// first one: a single missed watch event would otherwise leave the cache
/// wrong for the lifetime of the process. A successful list always reseeds
/// the cache; the cache only stands in when the list itself fails and there
/// is a previously seeded tally to fall back on.
async fn tally_for(
    ctx: &ReconcileContext,
) -> Result<std::collections::HashMap<String, u32>, ControllerError> {
    match ctx.store.list_assigned_task_runs().await {
        Ok(assigned) => {
            let tally = tally_assignments(assigned.iter().filter_map(|t| t.assigned_host()));
            ctx.cache.seed(tally.clone());
            Ok(tally)
        }
        Err(err) if ctx.cache.is_warm() => {
            warn!(error = %err, "cluster-wide list failed, falling back to advisory cache");
            Ok(ctx.cache.snapshot())
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
#[path = "user_task_tests.rs"]
mod tests;
