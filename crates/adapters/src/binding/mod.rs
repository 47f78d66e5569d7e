// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Role binding store

mod kubectl;

pub use self::kubectl::KubectlBindingStore;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{BindingCall, FakeBindingStore};

use crate::error::StoreError;
use async_trait::async_trait;

/// Grants one user one cluster role inside one namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleBinding {
    pub name: String,
    pub namespace: String,
    /// Cluster role being granted
    pub role: String,
    /// User the role is granted to
    pub user: String,
}

/// Store for role bindings
#[async_trait]
pub trait BindingStore: Clone + Send + Sync + 'static {
    /// Create a binding.
    ///
    /// Fails with [`StoreError::AlreadyExists`] if a binding with the same
    /// name exists in the namespace.
    async fn create(&self, binding: &RoleBinding) -> Result<(), StoreError>;
}
