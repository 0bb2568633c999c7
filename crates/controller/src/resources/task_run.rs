// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The task-run custom resource this system watches. Modeled on Tekton
//! Pipelines' `TaskRun`, trimmed to the fields the reconciler reads or
//! writes — there is no dependency on the real Tekton CRD's Rust types
//! since none exist in `k8s-openapi`.

use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, Time};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use hostbroker_core::dispatch::HelperTaskSpec;
use hostbroker_core::labels::TaskView;

/// `spec.taskRef` — which task template a task-run executes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TaskRef {
    pub name: String,
}

/// One entry of `spec.params`. Tekton params can be array-typed; this
/// system only ever reads or writes string-typed params.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Param {
    pub name: String,
    pub value: String,
}

/// One entry of `spec.workspaces` — this system only ever binds a secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WorkspaceBinding {
    pub name: String,
    pub secret: WorkspaceSecret,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WorkspaceSecret {
    #[serde(rename = "secretName")]
    pub secret_name: String,
}

/// `status.conditions[]` — only the `Succeeded` condition is consulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Condition {
    #[serde(rename = "type")]
    pub type_: String,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TaskRunStatus {
    #[serde(rename = "completionTime", skip_serializing_if = "Option::is_none")]
    pub completion_time: Option<Time>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

/// Trimmed Tekton `TaskRun`, namespaced, with a private group so this type
/// doesn't collide with a real Tekton install's CRD.
///
/// `kube::CustomResource` generates the `TaskRun` wrapper struct (metadata +
/// spec + status) from this spec type.
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "hostbroker.dev",
    version = "v1",
    kind = "TaskRun",
    namespaced,
    status = "TaskRunStatus",
    derive = "PartialEq"
)]
pub struct TaskRunSpec {
    #[serde(rename = "taskRef", skip_serializing_if = "Option::is_none")]
    pub task_ref: Option<TaskRef>,
    #[serde(rename = "serviceAccountName", skip_serializing_if = "Option::is_none")]
    pub service_account_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Param>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub workspaces: Vec<WorkspaceBinding>,
}

/// Build a [`TaskView`] from a live `TaskRun` object, the shape the pure
/// core crate's classifier and handlers operate on.
pub fn view_of(tr: &TaskRun) -> TaskView {
    let meta = &tr.metadata;
    let labels: BTreeMap<String, String> = meta.labels.clone().unwrap_or_default();
    let finalizers = meta.finalizers.clone().unwrap_or_default();
    let creation_timestamp_ms =
        meta.creation_timestamp.as_ref().map(|t| t.0.timestamp_millis()).unwrap_or(0);
    let deletion_timestamp_ms = meta.deletion_timestamp.as_ref().map(|t| t.0.timestamp_millis());

    let status = tr.status.as_ref();
    let completion_time_ms =
        status.and_then(|s| s.completion_time.as_ref()).map(|t| t.0.timestamp_millis());
    let succeeded = status.and_then(|s| {
        s.conditions.iter().find(|c| c.type_ == "Succeeded").map(|c| c.status == "True")
    });

    let params: BTreeMap<String, String> =
        tr.spec.params.iter().map(|p| (p.name.clone(), p.value.clone())).collect();

    TaskView {
        namespace: meta.namespace.clone().unwrap_or_default(),
        name: meta.name.clone().unwrap_or_default(),
        creation_timestamp_ms,
        labels,
        finalizers,
        completion_time_ms,
        deletion_timestamp_ms,
        succeeded,
        params,
    }
}

/// Build the `TaskRun` object to create for a provision or clean helper.
/// `generate_name` lets the server assign a unique suffix.
pub fn from_helper_spec(spec: &HelperTaskSpec) -> TaskRun {
    TaskRun {
        metadata: ObjectMeta {
            generate_name: Some(format!("{}-", spec.generate_name)),
            namespace: Some(spec.namespace.clone()),
            labels: Some(spec.labels.clone()),
            ..Default::default()
        },
        spec: TaskRunSpec {
            task_ref: Some(TaskRef { name: spec.task_ref.clone() }),
            service_account_name: Some(spec.service_account.clone()),
            params: spec
                .params
                .iter()
                .map(|(name, value)| Param { name: name.clone(), value: value.clone() })
                .collect(),
            workspaces: vec![WorkspaceBinding {
                name: spec.workspace_name.clone(),
                secret: WorkspaceSecret { secret_name: spec.workspace_secret.clone() },
            }],
        },
        status: None,
    }
}

#[cfg(test)]
#[path = "task_run_tests.rs"]
mod tests;
