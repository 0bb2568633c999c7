// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builds the data for helper task-runs and the provision-failure marker
//! secret. Pure assembly — no object-store calls happen here.

use std::collections::BTreeMap;

use crate::host::Host;
use crate::labels::{
    TaskKind, LABEL_TARGET_ARCHITECTURE, LABEL_TASK_TYPE, SERVICE_ACCOUNT,
};

pub use crate::labels::TaskKind as HelperKind;

const WORKSPACE_NAME: &str = "ssh";
const PROVISION_TASK_REF: &str = "provision-shared-host";
const CLEAN_TASK_REF: &str = "clean-shared-host";
const PROVISION_GENERATE_NAME: &str = "provision-task";
const CLEAN_GENERATE_NAME: &str = "cleanup-task";

const PARAM_SECRET_NAME: &str = "SECRET_NAME";
const PARAM_TASKRUN_NAME: &str = "TASKRUN_NAME";
const PARAM_NAMESPACE: &str = "NAMESPACE";
const PARAM_HOST: &str = "HOST";
const PARAM_USER: &str = "USER";

/// Everything needed to create a provision or clean helper task-run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperTaskSpec {
    pub kind: HelperKind,
    /// Created in the operator's namespace, never the user's.
    pub namespace: String,
    pub generate_name: String,
    pub labels: BTreeMap<String, String>,
    pub task_ref: String,
    pub workspace_name: String,
    pub workspace_secret: String,
    pub service_account: String,
    pub params: BTreeMap<String, String>,
}

/// Build the spec for a provision or clean helper task-run targeting `host`
/// on behalf of `user_task_name` in `user_task_namespace`.
pub fn build_helper_spec(
    kind: HelperKind,
    operator_namespace: &str,
    target_arch: &str,
    host: &Host,
    user_task_namespace: &str,
    user_task_name: &str,
    secret_name: &str,
) -> HelperTaskSpec {
    let mut labels = BTreeMap::new();
    labels.insert(LABEL_TASK_TYPE.to_string(), kind.label_value().to_string());
    labels.insert(LABEL_TARGET_ARCHITECTURE.to_string(), target_arch.to_string());

    let mut params = BTreeMap::new();
    params.insert(PARAM_SECRET_NAME.to_string(), secret_name.to_string());
    params.insert(PARAM_TASKRUN_NAME.to_string(), user_task_name.to_string());
    params.insert(PARAM_NAMESPACE.to_string(), user_task_namespace.to_string());
    params.insert(PARAM_HOST.to_string(), host.address.clone());
    params.insert(PARAM_USER.to_string(), host.user.clone());

    let (generate_name, task_ref) = match kind {
        TaskKind::Provision => (PROVISION_GENERATE_NAME, PROVISION_TASK_REF),
        TaskKind::Clean => (CLEAN_GENERATE_NAME, CLEAN_TASK_REF),
    };

    HelperTaskSpec {
        kind,
        namespace: operator_namespace.to_string(),
        generate_name: generate_name.to_string(),
        labels,
        task_ref: task_ref.to_string(),
        workspace_name: WORKSPACE_NAME.to_string(),
        workspace_secret: host.secret.clone(),
        service_account: SERVICE_ACCOUNT.to_string(),
        params,
    }
}

/// The error-marker secret the Provision handler writes when its helper
/// reports `Succeeded=false`. Landed in the namespace named by the helper's
/// `NAMESPACE` param — the user task's namespace, not the operator
/// namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureSecretSpec {
    pub namespace: String,
    pub name: String,
    pub labels: BTreeMap<String, String>,
    pub data: BTreeMap<String, Vec<u8>>,
}

pub fn build_failure_secret(namespace: &str, secret_name: &str, target_arch: &str) -> FailureSecretSpec {
    let mut labels = BTreeMap::new();
    labels.insert(LABEL_TARGET_ARCHITECTURE.to_string(), target_arch.to_string());

    let mut data = BTreeMap::new();
    data.insert("error".to_string(), b"provisioning failed".to_vec());

    FailureSecretSpec { namespace: namespace.to_string(), name: secret_name.to_string(), labels, data }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
