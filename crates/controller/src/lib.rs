// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! hostbroker-controller: the Kubernetes-facing half of the cross-architecture
//! task dispatcher. Wraps `hostbroker-core`'s pure state machine with an
//! object-store client, a `kube::runtime::Controller` watch loop, and the
//! ambient process concerns (configuration, logging, error taxonomy).

pub mod cache;
pub mod controller;
pub mod env;
pub mod error;
pub mod reconcile;
pub mod resources;
pub mod store;
pub mod store_kube;

#[cfg(any(test, feature = "test-support"))]
pub mod store_fake;

pub use cache::AssignmentCache;
pub use controller::run;
pub use error::ControllerError;
pub use store::ObjectStore;
pub use store_kube::KubeObjectStore;

#[cfg(any(test, feature = "test-support"))]
pub use store_fake::FakeObjectStore;
