// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ObjectStore` backed by a real `kube::Client`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use k8s_openapi::api::core::v1::{ConfigMap, Secret};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::ByteString;
use kube::api::{Api, DeleteParams, Patch, PatchParams, PostParams};
use kube::Client;

use hostbroker_core::dispatch::{FailureSecretSpec, HelperTaskSpec};
use hostbroker_core::labels::TaskView;

use crate::error::ControllerError;
use crate::resources::task_run::{self, TaskRun};
use crate::store::ObjectStore;

const HOST_CONFIG_NAME: &str = "host-config";
const FIELD_MANAGER: &str = "hostbroker-controller";
const API_VERSION: &str = "hostbroker.dev/v1";
const KIND: &str = "TaskRun";

/// `ObjectStore` implemented against `kube::Client`.
#[derive(Clone)]
pub struct KubeObjectStore {
    client: Client,
}

impl KubeObjectStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn task_runs(&self, namespace: &str) -> Api<TaskRun> {
        Api::namespaced(self.client.clone(), namespace)
    }

    fn config_maps(&self, namespace: &str) -> Api<ConfigMap> {
        Api::namespaced(self.client.clone(), namespace)
    }

    fn secrets(&self, namespace: &str) -> Api<Secret> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

fn is_not_found(err: &kube::Error) -> bool {
    matches!(err, kube::Error::Api(ae) if ae.code == 404)
}

#[async_trait]
impl ObjectStore for KubeObjectStore {
    async fn get_task_run(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<TaskView>, ControllerError> {
        match self.task_runs(namespace).get(name).await {
            Ok(tr) => Ok(Some(task_run::view_of(&tr))),
            Err(e) if is_not_found(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn list_assigned_task_runs(&self) -> Result<Vec<TaskView>, ControllerError> {
        let api: Api<TaskRun> = Api::all(self.client.clone());
        let lp = kube::api::ListParams::default().labels("assigned-host");
        let list = api.list(&lp).await?;
        Ok(list.items.iter().map(task_run::view_of).collect())
    }

    async fn list_waiting_task_runs(&self, arch: &str) -> Result<Vec<TaskView>, ControllerError> {
        let api: Api<TaskRun> = Api::all(self.client.clone());
        let lp = kube::api::ListParams::default().labels(&format!("waiting-for-arch={arch}"));
        let list = api.list(&lp).await?;
        Ok(list.items.iter().map(task_run::view_of).collect())
    }

    async fn update_task_run(&self, task: &TaskView) -> Result<(), ControllerError> {
        // Server-side apply, not a JSON merge patch: a merge patch only deletes a
        // map key when the patch sets it to `null`, so a label this field manager
        // previously set and has now simply omitted (e.g. `assigned-host` on
        // release, `waiting-for-arch` on wakeup) would never be pruned. SSA
        // reconciles the full set of fields this manager owns against what it
        // submits, so a dropped key is removed on the server too.
        let apply = serde_json::json!({
            "apiVersion": API_VERSION,
            "kind": KIND,
            "metadata": {
                "name": task.name,
                "namespace": task.namespace,
                "labels": task.labels,
                "finalizers": task.finalizers,
            }
        });
        self.task_runs(&task.namespace)
            .patch(&task.name, &PatchParams::apply(FIELD_MANAGER), &Patch::Apply(apply))
            .await?;
        Ok(())
    }

    async fn create_helper_task_run(
        &self,
        operator_namespace: &str,
        spec: &HelperTaskSpec,
    ) -> Result<String, ControllerError> {
        let obj = task_run::from_helper_spec(spec);
        let created = self.task_runs(operator_namespace).create(&PostParams::default(), &obj).await?;
        Ok(created.metadata.name.unwrap_or_default())
    }

    async fn delete_task_run(&self, namespace: &str, name: &str) -> Result<(), ControllerError> {
        match self.task_runs(namespace).delete(name, &DeleteParams::default()).await {
            Ok(_) => Ok(()),
            Err(e) if is_not_found(&e) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn get_host_config(
        &self,
        operator_namespace: &str,
    ) -> Result<Option<BTreeMap<String, String>>, ControllerError> {
        match self.config_maps(operator_namespace).get(HOST_CONFIG_NAME).await {
            Ok(cm) => Ok(Some(cm.data.unwrap_or_default().into_iter().collect())),
            Err(e) if is_not_found(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn get_secret(&self, namespace: &str, name: &str) -> Result<bool, ControllerError> {
        match self.secrets(namespace).get(name).await {
            Ok(_) => Ok(true),
            Err(e) if is_not_found(&e) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn create_secret(&self, spec: &FailureSecretSpec) -> Result<(), ControllerError> {
        let data: BTreeMap<String, ByteString> =
            spec.data.iter().map(|(k, v)| (k.clone(), ByteString(v.clone()))).collect();

        let secret = Secret {
            metadata: ObjectMeta {
                name: Some(spec.name.clone()),
                namespace: Some(spec.namespace.clone()),
                labels: Some(spec.labels.clone()),
                ..Default::default()
            },
            data: Some(data),
            ..Default::default()
        };

        self.secrets(&spec.namespace).create(&PostParams::default(), &secret).await?;
        Ok(())
    }

    async fn delete_secret(&self, namespace: &str, name: &str) -> Result<(), ControllerError> {
        match self.secrets(namespace).delete(name, &DeleteParams::default()).await {
            Ok(_) => Ok(()),
            Err(e) if is_not_found(&e) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
