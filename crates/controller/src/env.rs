// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access. One function per setting, each
//! with its documented default.

use std::time::Duration;

/// Namespace the controller runs in, creates helper task-runs in, and reads
/// `host-config` from. `HOSTBROKER_OPERATOR_NAMESPACE`, default
/// `multi-arch-controller`.
pub fn operator_namespace() -> String {
    std::env::var("HOSTBROKER_OPERATOR_NAMESPACE")
        .unwrap_or_else(|_| "multi-arch-controller".to_string())
}

/// Per-reconcile deadline. `HOSTBROKER_RECONCILE_TIMEOUT_MS`, default 300000.
pub fn reconcile_timeout() -> Duration {
    std::env::var("HOSTBROKER_RECONCILE_TIMEOUT_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_millis(300_000))
}

/// Belt-and-braces requeue delay for parked tasks.
/// `HOSTBROKER_PARK_REQUEUE_SECS`, default 60.
pub fn park_requeue() -> Duration {
    std::env::var("HOSTBROKER_PARK_REQUEUE_SECS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(Duration::from_secs(60))
}

/// `tracing_subscriber::EnvFilter` directive string. `HOSTBROKER_LOG`,
/// default `info`.
pub fn log_filter() -> String {
    std::env::var("HOSTBROKER_LOG").unwrap_or_else(|_| "info".to_string())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
