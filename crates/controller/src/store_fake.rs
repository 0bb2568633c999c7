// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory `ObjectStore` for handler-level tests — no cluster required.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use hostbroker_core::dispatch::{FailureSecretSpec, HelperTaskSpec};
use hostbroker_core::labels::TaskView;

use crate::error::ControllerError;
use crate::store::ObjectStore;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct NamespacedName {
    namespace: String,
    name: String,
}

#[derive(Default)]
struct State {
    task_runs: BTreeMap<NamespacedName, TaskView>,
    host_configs: BTreeMap<String, BTreeMap<String, String>>,
    secrets: BTreeMap<NamespacedName, BTreeMap<String, Vec<u8>>>,
    next_generated_suffix: u32,
}

/// In-memory `ObjectStore`. Panics are never used for missing state — every
/// method returns the same `Ok`/`Err` shape a real cluster would.
#[derive(Default)]
pub struct FakeObjectStore {
    state: Mutex<State>,
}

impl FakeObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a task-run directly, bypassing the `create_helper_task_run` path.
    pub fn insert_task_run(&self, task: TaskView) {
        let key = NamespacedName { namespace: task.namespace.clone(), name: task.name.clone() };
        self.state.lock().task_runs.insert(key, task);
    }

    /// Seed the `host-config` document for a namespace.
    pub fn set_host_config(&self, namespace: &str, data: BTreeMap<String, String>) {
        self.state.lock().host_configs.insert(namespace.to_string(), data);
    }

    pub fn task_run(&self, namespace: &str, name: &str) -> Option<TaskView> {
        let key = NamespacedName { namespace: namespace.to_string(), name: name.to_string() };
        self.state.lock().task_runs.get(&key).cloned()
    }

    pub fn all_task_runs(&self) -> Vec<TaskView> {
        self.state.lock().task_runs.values().cloned().collect()
    }

    pub fn secret_data(&self, namespace: &str, name: &str) -> Option<BTreeMap<String, Vec<u8>>> {
        let key = NamespacedName { namespace: namespace.to_string(), name: name.to_string() };
        self.state.lock().secrets.get(&key).cloned()
    }
}

#[async_trait]
impl ObjectStore for FakeObjectStore {
    async fn get_task_run(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<TaskView>, ControllerError> {
        Ok(self.task_run(namespace, name))
    }

    async fn list_assigned_task_runs(&self) -> Result<Vec<TaskView>, ControllerError> {
        Ok(self.state.lock().task_runs.values().filter(|t| t.assigned_host().is_some()).cloned().collect())
    }

    async fn list_waiting_task_runs(&self, arch: &str) -> Result<Vec<TaskView>, ControllerError> {
        Ok(self
            .state
            .lock()
            .task_runs
            .values()
            .filter(|t| t.waiting_for_arch() == Some(arch))
            .cloned()
            .collect())
    }

    async fn update_task_run(&self, task: &TaskView) -> Result<(), ControllerError> {
        let key = NamespacedName { namespace: task.namespace.clone(), name: task.name.clone() };
        self.state.lock().task_runs.insert(key, task.clone());
        Ok(())
    }

    async fn create_helper_task_run(
        &self,
        operator_namespace: &str,
        spec: &HelperTaskSpec,
    ) -> Result<String, ControllerError> {
        let mut state = self.state.lock();
        state.next_generated_suffix += 1;
        let name = format!("{}-{:04}", spec.generate_name, state.next_generated_suffix);

        let task = TaskView {
            namespace: operator_namespace.to_string(),
            name: name.clone(),
            creation_timestamp_ms: 0,
            labels: spec.labels.clone(),
            finalizers: Vec::new(),
            completion_time_ms: None,
            deletion_timestamp_ms: None,
            succeeded: None,
            params: spec.params.clone(),
        };
        let key = NamespacedName { namespace: operator_namespace.to_string(), name: name.clone() };
        state.task_runs.insert(key, task);
        Ok(name)
    }

    async fn delete_task_run(&self, namespace: &str, name: &str) -> Result<(), ControllerError> {
        let key = NamespacedName { namespace: namespace.to_string(), name: name.to_string() };
        self.state.lock().task_runs.remove(&key);
        Ok(())
    }

    async fn get_host_config(
        &self,
        operator_namespace: &str,
    ) -> Result<Option<BTreeMap<String, String>>, ControllerError> {
        Ok(self.state.lock().host_configs.get(operator_namespace).cloned())
    }

    async fn get_secret(&self, namespace: &str, name: &str) -> Result<bool, ControllerError> {
        let key = NamespacedName { namespace: namespace.to_string(), name: name.to_string() };
        Ok(self.state.lock().secrets.contains_key(&key))
    }

    async fn create_secret(&self, spec: &FailureSecretSpec) -> Result<(), ControllerError> {
        let key = NamespacedName { namespace: spec.namespace.clone(), name: spec.name.clone() };
        self.state.lock().secrets.insert(key, spec.data.clone());
        Ok(())
    }

    async fn delete_secret(&self, namespace: &str, name: &str) -> Result<(), ControllerError> {
        let key = NamespacedName { namespace: namespace.to_string(), name: name.to_string() };
        self.state.lock().secrets.remove(&key);
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_fake_tests.rs"]
mod tests;
