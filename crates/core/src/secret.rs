// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Naming for the per-task credential secret.

/// The credential secret name for a given user task, computed once so
/// allocation, release, and provision-failure paths never disagree on it.
pub fn credential_secret_name(user_task_name: &str) -> String {
    format!("multi-arch-ssl-{user_task_name}")
}

#[cfg(test)]
#[path = "secret_tests.rs"]
mod tests;
