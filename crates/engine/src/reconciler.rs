// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Drives a workspace request one phase per pass.

use crate::error::ReconcileError;
use std::future::Future;
use tracing::Instrument;
use wsp_adapters::{BindingStore, NamespaceStore, ServiceCatalog};
use wsp_core::{Phase, RequestEvent, RequestId, WorkspaceRequest};
use wsp_storage::RecordStore;

/// Reconciler store dependencies
pub struct ReconcilerDeps<N, B, C, R> {
    pub namespaces: N,
    pub bindings: B,
    pub catalog: C,
    pub records: R,
}

/// Result of a successful reconcile pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciled {
    /// The record no longer exists; nothing was done
    Gone(RequestId),
    /// No phase change; nothing was persisted
    Unchanged(WorkspaceRequest),
    /// One phase completed and the new record was committed
    Advanced {
        from: Phase,
        record: WorkspaceRequest,
    },
}

/// Workspace request reconciler
pub struct Reconciler<N, B, C, R> {
    pub(crate) namespaces: N,
    pub(crate) bindings: B,
    pub(crate) catalog: C,
    pub(crate) records: R,
}

impl<N, B, C, R> Reconciler<N, B, C, R>
where
    N: NamespaceStore,
    B: BindingStore,
    C: ServiceCatalog,
    R: RecordStore,
{
    pub fn new(deps: ReconcilerDeps<N, B, C, R>) -> Self {
        Self {
            namespaces: deps.namespaces,
            bindings: deps.bindings,
            catalog: deps.catalog,
            records: deps.records,
        }
    }

    pub fn records(&self) -> &R {
        &self.records
    }

    /// Run at most one phase for the record in `event`.
    ///
    /// On success the committed record (or the unchanged input) is returned.
    /// On any error nothing has been persisted.
    pub async fn reconcile(&self, event: &RequestEvent) -> Result<Reconciled, ReconcileError> {
        let record = match event {
            RequestEvent::Deleted { name } => {
                tracing::debug!(request = %name, event = event.kind(), "nothing to do");
                return Ok(Reconciled::Gone(name.clone()));
            }
            RequestEvent::Upserted { record } => record,
        };

        let phase = record.phase();
        let span = tracing::info_span!(
            "reconcile",
            event = event.kind(),
            request = %record.name(),
            phase = %phase,
            version = record.meta.resource_version,
        );
        self.reconcile_record(record, phase).instrument(span).await
    }

    /// [`Self::reconcile`], abandoned as soon as `cancelled` resolves.
    ///
    /// Dropping the in-flight pass kills any external command it started;
    /// commits are synchronous, so a cancelled pass never half-persists.
    pub async fn reconcile_until<F>(
        &self,
        event: &RequestEvent,
        cancelled: F,
    ) -> Result<Reconciled, ReconcileError>
    where
        F: Future<Output = ()>,
    {
        let phase = match event {
            RequestEvent::Upserted { record } => record.phase(),
            RequestEvent::Deleted { .. } => Phase::New,
        };

        tokio::select! {
            biased;
            result = self.reconcile(event) => result,
            () = cancelled => {
                tracing::warn!(request = %event.name(), %phase, "reconcile cancelled");
                Err(ReconcileError::Cancelled { phase })
            }
        }
    }

    async fn reconcile_record(
        &self,
        record: &WorkspaceRequest,
        phase: Phase,
    ) -> Result<Reconciled, ReconcileError> {
        let outcome = match phase {
            Phase::New => self.initialize(record),
            Phase::ProvisionNamespace => self.provision_namespace(record).await,
            Phase::RoleBindings => self.bind_roles(record).await,
            Phase::ProvisionServices => self.provision_services(record).await,
            Phase::ProvisionedServices => self.check_readiness(record).await,
            Phase::Complete => Ok(None),
        };

        let next = match outcome {
            Ok(Some(next)) => next,
            Ok(None) => return Ok(Reconciled::Unchanged(record.clone())),
            Err(source) => {
                tracing::debug!(kind = %source.kind(), error = %source, "phase failed");
                return Err(ReconcileError::Phase { phase, source });
            }
        };

        let committed = self
            .records
            .replace(&next)
            .map_err(|source| ReconcileError::Persist { phase, source })?;

        tracing::info!(
            to = %committed.phase(),
            version = committed.meta.resource_version,
            "phase advanced"
        );
        Ok(Reconciled::Advanced {
            from: phase,
            record: committed,
        })
    }
}

#[cfg(test)]
#[path = "reconciler_tests/mod.rs"]
mod tests;
