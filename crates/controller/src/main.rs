// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `hostbrokerd`: the cross-architecture task dispatcher binary.

use std::sync::Arc;

use hostbroker_controller::cache::AssignmentCache;
use hostbroker_controller::reconcile::ReconcileContext;
use hostbroker_controller::store_kube::KubeObjectStore;
use hostbroker_controller::{controller, env};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), kube::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(env::log_filter()))
        .init();

    let client = kube::Client::try_default().await?;

    let ctx = Arc::new(ReconcileContext {
        store: Arc::new(KubeObjectStore::new(client.clone())),
        cache: Arc::new(AssignmentCache::new()),
        operator_namespace: env::operator_namespace(),
        park_requeue: env::park_requeue(),
    });

    tracing::info!(namespace = %ctx.operator_namespace, "hostbrokerd starting");

    let shutdown = CancellationToken::new();
    let watcher_shutdown = shutdown.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("shutdown signal received");
        watcher_shutdown.cancel();
    });

    controller::run(client, ctx, env::reconcile_timeout(), shutdown).await;
    Ok(())
}
