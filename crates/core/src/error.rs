// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors raised by the pure host-allocation logic.

use thiserror::Error;

/// Errors from parsing or using the host inventory.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("host '{host}' has invalid concurrency value '{value}'")]
    InvalidConcurrency { host: String, value: String },
}
