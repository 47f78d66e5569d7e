// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! kubectl-backed namespace store

use super::{Namespace, NamespaceSpec, NamespaceStore};
use crate::error::StoreError;
use crate::kubectl::{object_name, Kubectl};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Namespaces managed through `kubectl`
#[derive(Debug, Clone, Default)]
pub struct KubectlNamespaceStore {
    kubectl: Kubectl,
}

impl KubectlNamespaceStore {
    pub fn new(kubectl: Kubectl) -> Self {
        Self { kubectl }
    }
}

#[async_trait]
impl NamespaceStore for KubectlNamespaceStore {
    async fn create(&self, spec: &NamespaceSpec) -> Result<Namespace, StoreError> {
        let created = self.kubectl.create(&namespace_manifest(spec)).await?;
        parse_namespace(&created)
    }

    async fn get(&self, name: &str) -> Result<Option<Namespace>, StoreError> {
        match self.kubectl.get(&["namespace", name]).await? {
            Some(object) => parse_namespace(&object).map(Some),
            None => Ok(None),
        }
    }
}

pub(crate) fn namespace_manifest(spec: &NamespaceSpec) -> Value {
    json!({
        "apiVersion": "v1",
        "kind": "Namespace",
        "metadata": {
            "name": spec.name,
            "labels": spec.labels,
        },
    })
}

pub(crate) fn parse_namespace(object: &Value) -> Result<Namespace, StoreError> {
    let labels: BTreeMap<String, String> = object["metadata"]["labels"]
        .as_object()
        .map(|map| {
            map.iter()
                .filter_map(|(k, v)| v.as_str().map(|v| (k.clone(), v.to_string())))
                .collect()
        })
        .unwrap_or_default();

    Ok(Namespace {
        name: object_name(object)?,
        labels,
    })
}

#[cfg(test)]
#[path = "kubectl_tests.rs"]
mod tests;
