// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::PhaseResult;
use crate::error::{PhaseError, UnresolvedService};
use crate::Reconciler;
use serde_json::json;
use wsp_adapters::{
    BindingStore, InstanceSpec, NamespaceStore, ServiceCatalog, ServiceClass, StoreError,
};
use wsp_core::{instance_name, InstanceId, Phase, WorkspaceRequest};
use wsp_storage::RecordStore;

impl<N, B, C, R> Reconciler<N, B, C, R>
where
    N: NamespaceStore,
    B: BindingStore,
    C: ServiceCatalog,
    R: RecordStore,
{
    /// Resolve every required service to a catalog class, then create an
    /// instance for each service not already provisioned.
    pub(crate) async fn provision_services(&self, record: &WorkspaceRequest) -> PhaseResult {
        let classes = self
            .catalog
            .list_classes()
            .await
            .map_err(|e| PhaseError::provisioning("list service classes", e))?;

        let resolved = resolve(&record.spec.services(), &classes)?;

        let namespace = &record.status.namespace;
        let mut status = record.status.clone();
        for (service, class) in resolved {
            if status.provisioned_services.contains_key(&service) {
                continue;
            }

            let spec = InstanceSpec {
                name: instance_name(record.name(), &service),
                class: class.clone(),
                parameters: json!({}),
            };
            let id = match self.catalog.create_instance(namespace, &spec).await {
                Ok(id) => id,
                Err(e) if e.is_already_exists() => {
                    tracing::info!(service = %service, instance = %spec.name, "instance already exists");
                    self.adopt_instance(namespace, &service, &spec).await?
                }
                Err(e) => {
                    return Err(PhaseError::provisioning(
                        format!("create instance of {} in {}", service, namespace),
                        e,
                    ))
                }
            };
            status.provisioned_services.insert(service, id);
        }

        status.phase = Phase::ProvisionedServices;
        Ok(Some(record.with_status(status)))
    }
}

impl<N, B, C, R> Reconciler<N, B, C, R>
where
    N: NamespaceStore,
    B: BindingStore,
    C: ServiceCatalog,
    R: RecordStore,
{
    /// Take over an instance an earlier pass created, provided it was made
    /// from the class this service resolved to.
    async fn adopt_instance(
        &self,
        namespace: &str,
        service: &str,
        spec: &InstanceSpec,
    ) -> Result<InstanceId, PhaseError> {
        let action = || format!("adopt instance {} for {} in {}", spec.name, service, namespace);
        let existing = self
            .catalog
            .get_instance(namespace, &spec.name)
            .await
            .map_err(|e| PhaseError::provisioning(action(), e))?
            .ok_or_else(|| {
                PhaseError::provisioning(
                    action(),
                    StoreError::NotFound(format!("serviceinstance/{}", spec.name)),
                )
            })?;

        if existing.class_id != spec.class.id {
            return Err(PhaseError::provisioning(
                action(),
                StoreError::Conflict(format!(
                    "serviceinstance/{} has class {:?}, expected {:?}",
                    spec.name, existing.class_id, spec.class.id
                )),
            ));
        }
        Ok(existing.id)
    }
}

/// Match each service to exactly one class by external name.
///
/// Every service that matches zero or several classes is reported, not just
/// the first.
fn resolve<'a>(
    services: &indexmap::IndexSet<String>,
    classes: &'a [ServiceClass],
) -> Result<Vec<(String, &'a ServiceClass)>, PhaseError> {
    let mut resolved = Vec::with_capacity(services.len());
    let mut unresolved = Vec::new();

    for service in services {
        let matches: Vec<&ServiceClass> = classes
            .iter()
            .filter(|c| c.external_name == *service)
            .collect();
        match matches.as_slice() {
            [class] => resolved.push((service.clone(), *class)),
            _ => unresolved.push(UnresolvedService {
                name: service.clone(),
                matches: matches.len(),
            }),
        }
    }

    if unresolved.is_empty() {
        Ok(resolved)
    } else {
        Err(PhaseError::CatalogResolution { unresolved })
    }
}

#[cfg(test)]
#[path = "services_tests.rs"]
mod tests;
