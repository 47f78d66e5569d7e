// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! kubectl-backed role binding store

use super::{BindingStore, RoleBinding};
use crate::error::StoreError;
use crate::kubectl::Kubectl;
use async_trait::async_trait;
use serde_json::{json, Value};

const RBAC_GROUP: &str = "rbac.authorization.k8s.io";

/// Role bindings managed through `kubectl`
#[derive(Debug, Clone, Default)]
pub struct KubectlBindingStore {
    kubectl: Kubectl,
}

impl KubectlBindingStore {
    pub fn new(kubectl: Kubectl) -> Self {
        Self { kubectl }
    }
}

#[async_trait]
impl BindingStore for KubectlBindingStore {
    async fn create(&self, binding: &RoleBinding) -> Result<(), StoreError> {
        self.kubectl.create(&role_binding_manifest(binding)).await?;
        Ok(())
    }
}

pub(crate) fn role_binding_manifest(binding: &RoleBinding) -> Value {
    json!({
        "apiVersion": format!("{}/v1", RBAC_GROUP),
        "kind": "RoleBinding",
        "metadata": {
            "name": binding.name,
            "namespace": binding.namespace,
            "labels": { (wsp_core::MANAGED_LABEL): "true" },
        },
        "roleRef": {
            "kind": "ClusterRole",
            "name": binding.role,
            "apiGroup": RBAC_GROUP,
        },
        "subjects": [{
            "kind": "User",
            "name": binding.user,
            "apiGroup": RBAC_GROUP,
        }],
    })
}

#[cfg(test)]
#[path = "kubectl_tests.rs"]
mod tests;
