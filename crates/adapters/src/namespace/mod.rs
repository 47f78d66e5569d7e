// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Namespace store

mod kubectl;

pub use self::kubectl::KubectlNamespaceStore;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeNamespaceStore, NamespaceCall};

use crate::error::StoreError;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Desired namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceSpec {
    pub name: String,
    pub labels: BTreeMap<String, String>,
}

impl NamespaceSpec {
    /// A namespace carrying the provisioner's managed-by label.
    pub fn managed(name: impl Into<String>) -> Self {
        let mut labels = BTreeMap::new();
        labels.insert(wsp_core::MANAGED_LABEL.to_string(), "true".to_string());
        Self {
            name: name.into(),
            labels,
        }
    }
}

/// Namespace as it exists in the cluster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    pub name: String,
    pub labels: BTreeMap<String, String>,
}

impl Namespace {
    /// Whether the provisioner created (or adopted) this namespace.
    pub fn is_managed(&self) -> bool {
        self.labels
            .get(wsp_core::MANAGED_LABEL)
            .is_some_and(|v| v == "true")
    }
}

/// Store for cluster namespaces
#[async_trait]
pub trait NamespaceStore: Clone + Send + Sync + 'static {
    /// Create a namespace.
    ///
    /// Fails with [`StoreError::AlreadyExists`] if the name is taken.
    async fn create(&self, spec: &NamespaceSpec) -> Result<Namespace, StoreError>;

    /// Look a namespace up by name.
    async fn get(&self, name: &str) -> Result<Option<Namespace>, StoreError>;
}
