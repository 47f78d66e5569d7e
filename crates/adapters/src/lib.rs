// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for the cluster resources a workspace is built from

pub mod binding;
pub mod catalog;
mod error;
pub mod kubectl;
pub mod namespace;
pub mod subprocess;
pub mod traced;

pub use binding::{BindingStore, KubectlBindingStore, RoleBinding};
pub use catalog::{
    ConditionStatus, InstanceCondition, InstanceSpec, InstanceStatus, KubectlServiceCatalog,
    ServiceCatalog, ServiceClass, ServiceInstance, READY_CONDITION,
};
pub use error::StoreError;
pub use kubectl::Kubectl;
pub use namespace::{KubectlNamespaceStore, Namespace, NamespaceSpec, NamespaceStore};
pub use traced::{TracedBindings, TracedCatalog, TracedNamespaces};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use binding::{BindingCall, FakeBindingStore};
#[cfg(any(test, feature = "test-support"))]
pub use catalog::{CatalogCall, FakeInstance, FakeServiceCatalog};
#[cfg(any(test, feature = "test-support"))]
pub use namespace::{FakeNamespaceStore, NamespaceCall};
