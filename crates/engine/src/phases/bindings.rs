// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::PhaseResult;
use crate::error::PhaseError;
use crate::Reconciler;
use wsp_adapters::{BindingStore, NamespaceStore, RoleBinding, ServiceCatalog};
use wsp_core::{binding_name, Phase, RequestStatus, WorkspaceRequest, USER_ROLES};
use wsp_storage::RecordStore;

impl<N, B, C, R> Reconciler<N, B, C, R>
where
    N: NamespaceStore,
    B: BindingStore,
    C: ServiceCatalog,
    R: RecordStore,
{
    /// Grant the user every role in [`USER_ROLES`] inside their namespace.
    pub(crate) async fn bind_roles(&self, record: &WorkspaceRequest) -> PhaseResult {
        for role in USER_ROLES {
            let binding = RoleBinding {
                name: binding_name(record.name(), role),
                namespace: record.status.namespace.clone(),
                role: role.to_string(),
                user: record.spec.user().to_string(),
            };

            match self.bindings.create(&binding).await {
                Ok(()) => {}
                Err(e) if e.is_already_exists() => {
                    tracing::debug!(binding = %binding.name, "binding already exists");
                }
                Err(e) => {
                    return Err(PhaseError::provisioning(
                        format!("bind role {} in {}", role, binding.namespace),
                        e,
                    ))
                }
            }
        }

        Ok(Some(record.with_status(RequestStatus {
            phase: Phase::ProvisionServices,
            ..record.status.clone()
        })))
    }
}
