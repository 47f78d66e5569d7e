// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake namespace store for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{Namespace, NamespaceSpec, NamespaceStore};
use crate::error::StoreError;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Recorded namespace call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceCall {
    Create { name: String },
    Get { name: String },
}

#[derive(Default)]
struct FakeNamespaceState {
    namespaces: BTreeMap<String, Namespace>,
    calls: Vec<NamespaceCall>,
    create_error: Option<StoreError>,
    get_error: Option<StoreError>,
}

/// Fake namespace store for testing
#[derive(Clone, Default)]
pub struct FakeNamespaceStore {
    inner: Arc<Mutex<FakeNamespaceState>>,
}

impl FakeNamespaceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<NamespaceCall> {
        self.inner.lock().calls.clone()
    }

    /// Get a namespace by name
    pub fn get_namespace(&self, name: &str) -> Option<Namespace> {
        self.inner.lock().namespaces.get(name).cloned()
    }

    /// Number of namespaces held
    pub fn len(&self) -> usize {
        self.inner.lock().namespaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add a pre-existing namespace without the managed label
    pub fn add_namespace(&self, name: &str) {
        self.inner.lock().namespaces.insert(
            name.to_string(),
            Namespace {
                name: name.to_string(),
                labels: BTreeMap::new(),
            },
        );
    }

    /// Make every subsequent create fail with `error` (`None` to clear)
    pub fn set_create_error(&self, error: Option<StoreError>) {
        self.inner.lock().create_error = error;
    }

    /// Make every subsequent get fail with `error` (`None` to clear)
    pub fn set_get_error(&self, error: Option<StoreError>) {
        self.inner.lock().get_error = error;
    }

    /// Remove a namespace, simulating deletion between create and get
    pub fn remove_namespace(&self, name: &str) {
        self.inner.lock().namespaces.remove(name);
    }
}

#[async_trait]
impl NamespaceStore for FakeNamespaceStore {
    async fn create(&self, spec: &NamespaceSpec) -> Result<Namespace, StoreError> {
        let mut inner = self.inner.lock();

        inner.calls.push(NamespaceCall::Create {
            name: spec.name.clone(),
        });

        if let Some(err) = inner.create_error.clone() {
            return Err(err);
        }
        if inner.namespaces.contains_key(&spec.name) {
            return Err(StoreError::AlreadyExists(format!("namespace/{}", spec.name)));
        }

        let namespace = Namespace {
            name: spec.name.clone(),
            labels: spec.labels.clone(),
        };
        inner
            .namespaces
            .insert(spec.name.clone(), namespace.clone());
        Ok(namespace)
    }

    async fn get(&self, name: &str) -> Result<Option<Namespace>, StoreError> {
        let mut inner = self.inner.lock();

        inner.calls.push(NamespaceCall::Get {
            name: name.to_string(),
        });

        if let Some(err) = inner.get_error.clone() {
            return Err(err);
        }
        Ok(inner.namespaces.get(name).cloned())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
