// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Service catalog: classes, instances and their conditions

mod kubectl;

pub use self::kubectl::KubectlServiceCatalog;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{CatalogCall, FakeInstance, FakeServiceCatalog};

use crate::error::StoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use wsp_core::InstanceId;

/// Condition type an instance reports once it can be used
pub const READY_CONDITION: &str = "Ready";

/// A class of service offered by the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceClass {
    /// Cluster-unique object name
    pub id: String,
    /// Human-facing name requests refer to
    pub external_name: String,
}

impl ServiceClass {
    pub fn new(id: impl Into<String>, external_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            external_name: external_name.into(),
        }
    }
}

/// An existing instance and the class it was created from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInstance {
    pub id: InstanceId,
    /// Object name of the referenced class ([`ServiceClass::id`])
    pub class_id: String,
}

/// Desired service instance
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceSpec {
    pub name: String,
    pub class: ServiceClass,
    pub parameters: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionStatus {
    True,
    False,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceCondition {
    #[serde(rename = "type")]
    pub kind: String,
    pub status: ConditionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl InstanceCondition {
    pub fn new(kind: impl Into<String>, status: ConditionStatus) -> Self {
        Self {
            kind: kind.into(),
            status,
            message: None,
        }
    }
}

/// Observed state of a service instance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceStatus {
    #[serde(default)]
    pub conditions: Vec<InstanceCondition>,
}

impl InstanceStatus {
    /// First condition of the given type, if reported
    pub fn condition(&self, kind: &str) -> Option<&InstanceCondition> {
        self.conditions.iter().find(|c| c.kind == kind)
    }
}

/// Catalog of provisionable services
#[async_trait]
pub trait ServiceCatalog: Clone + Send + Sync + 'static {
    /// Every class the catalog currently offers.
    async fn list_classes(&self) -> Result<Vec<ServiceClass>, StoreError>;

    /// Create an instance of `spec.class` in `namespace`.
    ///
    /// Fails with [`StoreError::AlreadyExists`] if an instance with the same
    /// name exists in the namespace.
    async fn create_instance(
        &self,
        namespace: &str,
        spec: &InstanceSpec,
    ) -> Result<InstanceId, StoreError>;

    /// Look up an instance by name, `None` if it does not exist.
    async fn get_instance(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<ServiceInstance>, StoreError>;

    /// Current conditions of an instance.
    async fn instance_status(
        &self,
        namespace: &str,
        id: &InstanceId,
    ) -> Result<InstanceStatus, StoreError>;
}
