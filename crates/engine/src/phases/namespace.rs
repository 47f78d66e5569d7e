// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::PhaseResult;
use crate::error::PhaseError;
use crate::Reconciler;
use wsp_adapters::{BindingStore, NamespaceSpec, NamespaceStore, ServiceCatalog, StoreError};
use wsp_core::{namespace_for_user, Phase, RequestStatus, WorkspaceRequest};
use wsp_storage::RecordStore;

impl<N, B, C, R> Reconciler<N, B, C, R>
where
    N: NamespaceStore,
    B: BindingStore,
    C: ServiceCatalog,
    R: RecordStore,
{
    /// Create `<user>-workspace`, accepting one that already exists.
    pub(crate) async fn provision_namespace(&self, record: &WorkspaceRequest) -> PhaseResult {
        let name = namespace_for_user(record.spec.user());

        match self.namespaces.create(&NamespaceSpec::managed(&name)).await {
            Ok(_) => {}
            Err(e) if e.is_already_exists() => self.confirm_namespace(&name).await?,
            Err(e) => {
                return Err(PhaseError::provisioning(
                    format!("create namespace {}", name),
                    e,
                ))
            }
        }

        Ok(Some(record.with_status(RequestStatus {
            phase: Phase::RoleBindings,
            namespace: name,
            ..record.status.clone()
        })))
    }

    async fn confirm_namespace(&self, name: &str) -> Result<(), PhaseError> {
        let action = || format!("confirm namespace {}", name);
        let existing = self
            .namespaces
            .get(name)
            .await
            .map_err(|e| PhaseError::provisioning(action(), e))?
            .ok_or_else(|| {
                PhaseError::provisioning(action(), StoreError::NotFound(format!("namespace/{}", name)))
            })?;

        if existing.is_managed() {
            tracing::info!(namespace = name, "namespace already provisioned");
        } else {
            tracing::warn!(namespace = name, "adopting namespace not created by the provisioner");
        }
        Ok(())
    }
}
