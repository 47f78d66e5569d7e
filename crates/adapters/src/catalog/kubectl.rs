// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! kubectl-backed service catalog

use super::{InstanceSpec, InstanceStatus, ServiceCatalog, ServiceClass, ServiceInstance};
use crate::error::StoreError;
use crate::kubectl::{object_name, Kubectl};
use async_trait::async_trait;
use serde_json::{json, Value};
use wsp_core::InstanceId;

const CATALOG_API: &str = "servicecatalog.k8s.io/v1beta1";

/// Service catalog reached through `kubectl`
#[derive(Debug, Clone, Default)]
pub struct KubectlServiceCatalog {
    kubectl: Kubectl,
}

impl KubectlServiceCatalog {
    pub fn new(kubectl: Kubectl) -> Self {
        Self { kubectl }
    }
}

#[async_trait]
impl ServiceCatalog for KubectlServiceCatalog {
    async fn list_classes(&self) -> Result<Vec<ServiceClass>, StoreError> {
        match self.kubectl.get(&["clusterserviceclasses"]).await? {
            Some(list) => parse_classes(&list),
            None => Ok(Vec::new()),
        }
    }

    async fn create_instance(
        &self,
        namespace: &str,
        spec: &InstanceSpec,
    ) -> Result<InstanceId, StoreError> {
        let created = self
            .kubectl
            .create(&instance_manifest(namespace, spec))
            .await?;
        object_name(&created).map(InstanceId::new)
    }

    async fn get_instance(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<ServiceInstance>, StoreError> {
        match self
            .kubectl
            .get(&["serviceinstance", name, "-n", namespace])
            .await?
        {
            Some(object) => parse_instance(&object).map(Some),
            None => Ok(None),
        }
    }

    async fn instance_status(
        &self,
        namespace: &str,
        id: &InstanceId,
    ) -> Result<InstanceStatus, StoreError> {
        let object = self
            .kubectl
            .get(&["serviceinstance", id.as_str(), "-n", namespace])
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("serviceinstance/{}", id)))?;
        parse_status(&object)
    }
}

pub(crate) fn instance_manifest(namespace: &str, spec: &InstanceSpec) -> Value {
    json!({
        "apiVersion": CATALOG_API,
        "kind": "ServiceInstance",
        "metadata": {
            "name": spec.name,
            "namespace": namespace,
        },
        "spec": {
            "clusterServiceClassExternalName": spec.class.external_name,
            "clusterServiceClassRef": { "name": spec.class.id },
            "parameters": spec.parameters,
        },
    })
}

pub(crate) fn parse_classes(list: &Value) -> Result<Vec<ServiceClass>, StoreError> {
    let items = list["items"]
        .as_array()
        .ok_or_else(|| StoreError::InvalidResponse("class list has no items".to_string()))?;

    items
        .iter()
        .map(|item| {
            let id = object_name(item)?;
            let external_name = item["spec"]["externalName"]
                .as_str()
                .ok_or_else(|| {
                    StoreError::InvalidResponse(format!("class {} has no externalName", id))
                })?
                .to_string();
            Ok(ServiceClass { id, external_name })
        })
        .collect()
}

pub(crate) fn parse_instance(object: &Value) -> Result<ServiceInstance, StoreError> {
    let id = object_name(object)?;
    let class_id = object["spec"]["clusterServiceClassRef"]["name"]
        .as_str()
        .ok_or_else(|| {
            StoreError::InvalidResponse(format!("instance {} has no class reference", id))
        })?
        .to_string();
    Ok(ServiceInstance {
        id: InstanceId::new(id),
        class_id,
    })
}

/// A freshly created instance has no status yet; that reads as no conditions.
pub(crate) fn parse_status(object: &Value) -> Result<InstanceStatus, StoreError> {
    match object.get("status") {
        None | Some(Value::Null) => Ok(InstanceStatus::default()),
        Some(status) => serde_json::from_value(status.clone())
            .map_err(|e| StoreError::InvalidResponse(format!("bad instance status: {}", e))),
    }
}

#[cfg(test)]
#[path = "kubectl_tests.rs"]
mod tests;
