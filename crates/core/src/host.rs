// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host inventory: a reachable machine of a given CPU architecture with a
//! bounded number of concurrent slots, and the loader that reconstructs the
//! inventory from the flat `host-config` document on every allocation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One entry in the host inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    pub name: String,
    pub address: String,
    pub user: String,
    pub arch: String,
    pub secret: String,
    pub concurrency: u32,
}

impl Host {
    fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: String::new(),
            user: String::new(),
            arch: String::new(),
            secret: String::new(),
            concurrency: 0,
        }
    }
}

/// The parsed `host-config` document: every host keyed by name, plus any
/// `<host>.<attr>` keys whose `<attr>` was not recognized (the caller is
/// expected to log these; this crate does no logging of its own).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostInventory {
    hosts: BTreeMap<String, Host>,
    unknown_attributes: Vec<(String, String)>,
}

impl HostInventory {
    /// Parse a flat `<hostName>.<attribute> = value` map into an inventory.
    ///
    /// Host names may themselves contain dots, so each key is split on its
    /// *last* `.`. Keys with no `.` at all are silently skipped (not ours).
    /// An unparseable `concurrency` value aborts the whole load, since a
    /// malformed document should park every allocation rather than silently
    /// under- or over-provision one host.
    pub fn parse(data: &BTreeMap<String, String>) -> Result<Self, CoreError> {
        let mut hosts: BTreeMap<String, Host> = BTreeMap::new();
        let mut unknown_attributes = Vec::new();

        for (key, value) in data {
            let Some(pos) = key.rfind('.') else {
                continue;
            };
            let name = &key[..pos];
            let attr = &key[pos + 1..];
            let host = hosts.entry(name.to_string()).or_insert_with(|| Host::empty(name));

            match attr {
                "address" => host.address = value.clone(),
                "user" => host.user = value.clone(),
                "arch" => host.arch = value.clone(),
                "secret" => host.secret = value.clone(),
                "concurrency" => {
                    host.concurrency = value.parse().map_err(|_| CoreError::InvalidConcurrency {
                        host: name.to_string(),
                        value: value.clone(),
                    })?;
                }
                other => unknown_attributes.push((name.to_string(), other.to_string())),
            }
        }

        Ok(Self { hosts, unknown_attributes })
    }

    pub fn get(&self, name: &str) -> Option<&Host> {
        self.hosts.get(name)
    }

    /// Iterate hosts in sorted-by-name order, so selection is deterministic.
    pub fn iter(&self) -> impl Iterator<Item = &Host> {
        self.hosts.values()
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// `(hostName, attribute)` pairs the loader saw but did not recognize.
    pub fn unknown_attributes(&self) -> &[(String, String)] {
        &self.unknown_attributes
    }
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;
