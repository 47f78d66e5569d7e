// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced store wrappers for consistent observability

use crate::binding::{BindingStore, RoleBinding};
use crate::catalog::{InstanceSpec, InstanceStatus, ServiceCatalog, ServiceClass, ServiceInstance};
use crate::error::StoreError;
use crate::namespace::{Namespace, NamespaceSpec, NamespaceStore};
use async_trait::async_trait;
use std::time::Instant;
use tracing::Instrument;
use wsp_core::InstanceId;

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

/// Wrapper that adds tracing to any NamespaceStore
#[derive(Clone)]
pub struct TracedNamespaces<N> {
    inner: N,
}

impl<N> TracedNamespaces<N> {
    pub fn new(inner: N) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<N: NamespaceStore> NamespaceStore for TracedNamespaces<N> {
    async fn create(&self, spec: &NamespaceSpec) -> Result<Namespace, StoreError> {
        async {
            tracing::info!("creating");
            let start = Instant::now();
            let result = self.inner.create(spec).await;
            let elapsed_ms = elapsed_ms(start);
            match &result {
                Ok(_) => tracing::info!(elapsed_ms, "namespace created"),
                // Callers decide whether a duplicate is fine
                Err(e) if e.is_already_exists() => {
                    tracing::info!(elapsed_ms, "namespace already exists")
                }
                Err(e) => tracing::error!(elapsed_ms, error = %e, "create failed"),
            }
            result
        }
        .instrument(tracing::info_span!("namespace.create", name = %spec.name))
        .await
    }

    async fn get(&self, name: &str) -> Result<Option<Namespace>, StoreError> {
        let result = self.inner.get(name).await;
        tracing::info_span!("namespace.get", name).in_scope(|| match &result {
            Ok(found) => tracing::debug!(found = found.is_some(), "looked up"),
            Err(e) => tracing::error!(error = %e, "get failed"),
        });
        result
    }
}

/// Wrapper that adds tracing to any BindingStore
#[derive(Clone)]
pub struct TracedBindings<B> {
    inner: B,
}

impl<B> TracedBindings<B> {
    pub fn new(inner: B) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<B: BindingStore> BindingStore for TracedBindings<B> {
    async fn create(&self, binding: &RoleBinding) -> Result<(), StoreError> {
        let span = tracing::info_span!(
            "binding.create",
            name = %binding.name,
            namespace = %binding.namespace,
        );
        async {
            tracing::info!(role = %binding.role, user = %binding.user, "creating");
            let start = Instant::now();
            let result = self.inner.create(binding).await;
            let elapsed_ms = elapsed_ms(start);
            match &result {
                Ok(()) => tracing::info!(elapsed_ms, "binding created"),
                Err(e) if e.is_already_exists() => {
                    tracing::info!(elapsed_ms, "binding already exists")
                }
                Err(e) => tracing::error!(elapsed_ms, error = %e, "create failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any ServiceCatalog
#[derive(Clone)]
pub struct TracedCatalog<C> {
    inner: C,
}

impl<C> TracedCatalog<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<C: ServiceCatalog> ServiceCatalog for TracedCatalog<C> {
    async fn list_classes(&self) -> Result<Vec<ServiceClass>, StoreError> {
        async {
            let start = Instant::now();
            let result = self.inner.list_classes().await;
            let elapsed_ms = elapsed_ms(start);
            match &result {
                Ok(classes) => tracing::debug!(count = classes.len(), elapsed_ms, "listed"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "list failed"),
            }
            result
        }
        .instrument(tracing::info_span!("catalog.list_classes"))
        .await
    }

    async fn create_instance(
        &self,
        namespace: &str,
        spec: &InstanceSpec,
    ) -> Result<InstanceId, StoreError> {
        let span = tracing::info_span!("catalog.create_instance", namespace, name = %spec.name);
        async {
            tracing::info!(class = %spec.class.external_name, "creating");
            let start = Instant::now();
            let result = self.inner.create_instance(namespace, spec).await;
            let elapsed_ms = elapsed_ms(start);
            match &result {
                Ok(id) => tracing::info!(instance_id = %id, elapsed_ms, "instance created"),
                Err(e) if e.is_already_exists() => {
                    tracing::info!(elapsed_ms, "instance already exists")
                }
                Err(e) => tracing::error!(elapsed_ms, error = %e, "create failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn get_instance(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<ServiceInstance>, StoreError> {
        let result = self.inner.get_instance(namespace, name).await;
        tracing::info_span!("catalog.get_instance", namespace, name).in_scope(|| match &result {
            Ok(Some(instance)) => tracing::debug!(class_id = %instance.class_id, "looked up"),
            Ok(None) => tracing::debug!(found = false, "looked up"),
            Err(e) => tracing::error!(error = %e, "get failed"),
        });
        result
    }

    async fn instance_status(
        &self,
        namespace: &str,
        id: &InstanceId,
    ) -> Result<InstanceStatus, StoreError> {
        let result = self.inner.instance_status(namespace, id).await;
        tracing::info_span!("catalog.instance_status", namespace, instance_id = %id).in_scope(
            || match &result {
                Ok(status) => tracing::trace!(conditions = status.conditions.len(), "checked"),
                Err(e) => tracing::error!(error = %e, "status failed"),
            },
        );
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
