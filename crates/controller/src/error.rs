// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors surfaced by the object store and the reconcile handlers.

use hostbroker_core::CoreError;
use thiserror::Error;

/// Errors from the controller's side of a reconcile: object-store I/O,
/// plus the core's host-config parse errors passed through unchanged.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("kubernetes api error: {0}")]
    Kube(#[from] kube::Error),

    #[error("host inventory: {0}")]
    HostConfig(#[from] CoreError),

    #[error("host-config document '{0}' not found in namespace '{1}'")]
    HostConfigMissing(String, String),

    #[error("reconcile for {0}/{1} exceeded its deadline")]
    Timeout(String, String),
}

impl ControllerError {
    /// Whether the controller's `error_policy` should requeue this error
    /// rather than treat it as terminal.
    ///
    /// Not-found errors at entry points that the handlers already treat as
    /// benign never reach this type (they're handled inline as `Ok(None)`),
    /// so everything that does reach here is either a transient object-store
    /// failure or a host-config parse error — both retriable.
    pub fn is_retriable(&self) -> bool {
        match self {
            ControllerError::Kube(_) => true,
            ControllerError::HostConfig(_) => true,
            ControllerError::HostConfigMissing(_, _) => true,
            ControllerError::Timeout(_, _) => true,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
