// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::PhaseResult;
use crate::Reconciler;
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
    /// Validate the request spec and reset the status. No external side effects.
    pub(crate) fn initialize(&self, record: &WorkspaceRequest) -> PhaseResult {
        record.spec.validate()?;

        Ok(Some(record.with_status(RequestStatus {
            phase: Phase::ProvisionNamespace,
            ..RequestStatus::default()
        })))
    }
}
