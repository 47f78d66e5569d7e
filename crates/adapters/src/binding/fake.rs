// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake role binding store for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{BindingStore, RoleBinding};
use crate::error::StoreError;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Recorded binding call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingCall {
    Create { namespace: String, name: String },
}

#[derive(Default)]
struct FakeBindingState {
    /// Keyed by (namespace, name)
    bindings: BTreeMap<(String, String), RoleBinding>,
    calls: Vec<BindingCall>,
    create_error: Option<StoreError>,
}

/// Fake role binding store for testing
#[derive(Clone, Default)]
pub struct FakeBindingStore {
    inner: Arc<Mutex<FakeBindingState>>,
}

impl FakeBindingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<BindingCall> {
        self.inner.lock().calls.clone()
    }

    /// All bindings currently held
    pub fn bindings(&self) -> Vec<RoleBinding> {
        self.inner.lock().bindings.values().cloned().collect()
    }

    /// Add a pre-existing binding
    pub fn add_binding(&self, binding: RoleBinding) {
        self.inner.lock().bindings.insert(
            (binding.namespace.clone(), binding.name.clone()),
            binding,
        );
    }

    /// Make every subsequent create fail with `error` (`None` to clear)
    pub fn set_create_error(&self, error: Option<StoreError>) {
        self.inner.lock().create_error = error;
    }
}

#[async_trait]
impl BindingStore for FakeBindingStore {
    async fn create(&self, binding: &RoleBinding) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();

        inner.calls.push(BindingCall::Create {
            namespace: binding.namespace.clone(),
            name: binding.name.clone(),
        });

        if let Some(err) = inner.create_error.clone() {
            return Err(err);
        }

        let key = (binding.namespace.clone(), binding.name.clone());
        if inner.bindings.contains_key(&key) {
            return Err(StoreError::AlreadyExists(format!(
                "rolebinding/{}",
                binding.name
            )));
        }
        inner.bindings.insert(key, binding.clone());
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
