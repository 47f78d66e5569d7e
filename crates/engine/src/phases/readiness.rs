// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::PhaseResult;
use crate::error::PhaseError;
use crate::readiness::{evaluate, Readiness};
use crate::Reconciler;
use std::collections::BTreeMap;
use wsp_adapters::{BindingStore, NamespaceStore, ServiceCatalog};
use wsp_core::{Phase, RequestStatus, WorkspaceRequest};
use wsp_storage::RecordStore;

impl<N, B, C, R> Reconciler<N, B, C, R>
where
    N: NamespaceStore,
    B: BindingStore,
    C: ServiceCatalog,
    R: RecordStore,
{
    /// Complete the record once every provisioned instance reports ready.
    ///
    /// Not ready yet is not an error; the next resync asks again.
    pub(crate) async fn check_readiness(&self, record: &WorkspaceRequest) -> PhaseResult {
        let namespace = &record.status.namespace;
        let mut statuses = BTreeMap::new();
        for (service, id) in &record.status.provisioned_services {
            let status = self
                .catalog
                .instance_status(namespace, id)
                .await
                .map_err(|e| {
                    PhaseError::provisioning(format!("query instance {} in {}", id, namespace), e)
                })?;
            statuses.insert(service.clone(), status);
        }

        match evaluate(&record.spec.services(), &statuses) {
            Readiness::Ready => Ok(Some(record.with_status(RequestStatus {
                phase: Phase::Complete,
                ready: true,
                ..record.status.clone()
            }))),
            Readiness::Pending { waiting } => {
                tracing::debug!(?waiting, "services not ready");
                Ok(None)
            }
        }
    }
}
