// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake service catalog for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{
    ConditionStatus, InstanceCondition, InstanceSpec, InstanceStatus, ServiceCatalog,
    ServiceClass, ServiceInstance, READY_CONDITION,
};
use crate::error::StoreError;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use wsp_core::InstanceId;

/// Recorded catalog call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogCall {
    ListClasses,
    CreateInstance {
        namespace: String,
        name: String,
        class: String,
    },
    GetInstance {
        namespace: String,
        name: String,
    },
    InstanceStatus {
        namespace: String,
        id: InstanceId,
    },
}

/// An instance held by the fake catalog
#[derive(Debug, Clone, PartialEq)]
pub struct FakeInstance {
    pub namespace: String,
    pub name: String,
    /// External name of the class, empty when seeded directly
    pub class: String,
    /// Id of the class, empty when seeded directly
    pub class_id: String,
    pub parameters: Value,
    pub conditions: Vec<InstanceCondition>,
}

#[derive(Default)]
struct FakeCatalogState {
    classes: Vec<ServiceClass>,
    /// Keyed by (namespace, name)
    instances: BTreeMap<(String, String), FakeInstance>,
    calls: Vec<CatalogCall>,
    /// Create errors keyed by class external name
    create_errors: HashMap<String, StoreError>,
    list_error: Option<StoreError>,
    status_error: Option<StoreError>,
}

/// Fake service catalog for testing
#[derive(Clone, Default)]
pub struct FakeServiceCatalog {
    inner: Arc<Mutex<FakeCatalogState>>,
}

impl FakeServiceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<CatalogCall> {
        self.inner.lock().calls.clone()
    }

    /// Offer a class; its id is derived from the external name
    pub fn add_class(&self, external_name: &str) {
        self.add_class_with_id(&format!("class-{}", external_name), external_name);
    }

    pub fn add_class_with_id(&self, id: &str, external_name: &str) {
        self.inner
            .lock()
            .classes
            .push(ServiceClass::new(id, external_name));
    }

    /// All instances, ordered by namespace then name
    pub fn instances(&self) -> Vec<FakeInstance> {
        self.inner.lock().instances.values().cloned().collect()
    }

    pub fn instance(&self, namespace: &str, name: &str) -> Option<FakeInstance> {
        self.inner
            .lock()
            .instances
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
    }

    /// Set an instance's `Ready` condition, seeding the instance if absent
    pub fn set_ready(&self, namespace: &str, name: &str, ready: bool) {
        let status = if ready {
            ConditionStatus::True
        } else {
            ConditionStatus::False
        };
        self.set_conditions(
            namespace,
            name,
            vec![InstanceCondition::new(READY_CONDITION, status)],
        );
    }

    /// Seed an instance of the given class, as if created by an earlier pass
    pub fn seed_instance(&self, namespace: &str, name: &str, class: &ServiceClass) {
        self.inner.lock().instances.insert(
            (namespace.to_string(), name.to_string()),
            FakeInstance {
                namespace: namespace.to_string(),
                name: name.to_string(),
                class: class.external_name.clone(),
                class_id: class.id.clone(),
                parameters: Value::Object(Default::default()),
                conditions: Vec::new(),
            },
        );
    }

    /// Replace an instance's conditions, seeding the instance if absent
    pub fn set_conditions(&self, namespace: &str, name: &str, conditions: Vec<InstanceCondition>) {
        let mut inner = self.inner.lock();
        let instance = inner
            .instances
            .entry((namespace.to_string(), name.to_string()))
            .or_insert_with(|| FakeInstance {
                namespace: namespace.to_string(),
                name: name.to_string(),
                class: String::new(),
                class_id: String::new(),
                parameters: Value::Object(Default::default()),
                conditions: Vec::new(),
            });
        instance.conditions = conditions;
    }

    /// Fail creation of instances of the class with this external name
    pub fn fail_create_for(&self, external_name: &str, error: StoreError) {
        self.inner
            .lock()
            .create_errors
            .insert(external_name.to_string(), error);
    }

    pub fn clear_create_failures(&self) {
        self.inner.lock().create_errors.clear();
    }

    pub fn set_list_error(&self, error: Option<StoreError>) {
        self.inner.lock().list_error = error;
    }

    pub fn set_status_error(&self, error: Option<StoreError>) {
        self.inner.lock().status_error = error;
    }
}

#[async_trait]
impl ServiceCatalog for FakeServiceCatalog {
    async fn list_classes(&self) -> Result<Vec<ServiceClass>, StoreError> {
        let mut inner = self.inner.lock();
        inner.calls.push(CatalogCall::ListClasses);

        if let Some(err) = inner.list_error.clone() {
            return Err(err);
        }
        Ok(inner.classes.clone())
    }

    async fn create_instance(
        &self,
        namespace: &str,
        spec: &InstanceSpec,
    ) -> Result<InstanceId, StoreError> {
        let mut inner = self.inner.lock();
        inner.calls.push(CatalogCall::CreateInstance {
            namespace: namespace.to_string(),
            name: spec.name.clone(),
            class: spec.class.external_name.clone(),
        });

        if let Some(err) = inner.create_errors.get(&spec.class.external_name) {
            return Err(err.clone());
        }

        let key = (namespace.to_string(), spec.name.clone());
        if inner.instances.contains_key(&key) {
            return Err(StoreError::AlreadyExists(format!(
                "serviceinstance/{}",
                spec.name
            )));
        }
        inner.instances.insert(
            key,
            FakeInstance {
                namespace: namespace.to_string(),
                name: spec.name.clone(),
                class: spec.class.external_name.clone(),
                class_id: spec.class.id.clone(),
                parameters: spec.parameters.clone(),
                conditions: Vec::new(),
            },
        );
        Ok(InstanceId::new(spec.name.clone()))
    }

    async fn get_instance(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<ServiceInstance>, StoreError> {
        let mut inner = self.inner.lock();
        inner.calls.push(CatalogCall::GetInstance {
            namespace: namespace.to_string(),
            name: name.to_string(),
        });

        if let Some(err) = inner.status_error.clone() {
            return Err(err);
        }
        Ok(inner
            .instances
            .get(&(namespace.to_string(), name.to_string()))
            .map(|instance| ServiceInstance {
                id: InstanceId::new(instance.name.clone()),
                class_id: instance.class_id.clone(),
            }))
    }

    async fn instance_status(
        &self,
        namespace: &str,
        id: &InstanceId,
    ) -> Result<InstanceStatus, StoreError> {
        let mut inner = self.inner.lock();
        inner.calls.push(CatalogCall::InstanceStatus {
            namespace: namespace.to_string(),
            id: id.clone(),
        });

        if let Some(err) = inner.status_error.clone() {
            return Err(err);
        }
        inner
            .instances
            .get(&(namespace.to_string(), id.to_string()))
            .map(|instance| InstanceStatus {
                conditions: instance.conditions.clone(),
            })
            .ok_or_else(|| StoreError::NotFound(format!("serviceinstance/{}", id)))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
