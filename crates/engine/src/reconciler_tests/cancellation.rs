// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use async_trait::async_trait;
use std::time::Duration;
use wsp_adapters::{FakeBindingStore, FakeServiceCatalog, Namespace, NamespaceSpec};
use wsp_storage::MemoryRecordStore;

/// Namespace store whose calls never complete
#[derive(Clone)]
struct StalledNamespaces;

#[async_trait]
impl NamespaceStore for StalledNamespaces {
    async fn create(&self, _spec: &NamespaceSpec) -> Result<Namespace, StoreError> {
        std::future::pending().await
    }

    async fn get(&self, _name: &str) -> Result<Option<Namespace>, StoreError> {
        std::future::pending().await
    }
}

#[tokio::test]
async fn cancellation_aborts_in_flight_phase() {
    let records = MemoryRecordStore::new();
    let reconciler = Reconciler::new(ReconcilerDeps {
        namespaces: StalledNamespaces,
        bindings: FakeBindingStore::new(),
        catalog: FakeServiceCatalog::new(),
        records: records.clone(),
    });
    let record = records
        .create(
            RequestBuilder::new("alice-dev", "alice")
                .phase(Phase::ProvisionNamespace)
                .build(),
        )
        .unwrap();

    let result = reconciler
        .reconcile_until(
            &RequestEvent::upserted(record.clone()),
            tokio::time::sleep(Duration::from_millis(20)),
        )
        .await;

    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Cancelled);
    assert_eq!(err.phase(), Phase::ProvisionNamespace);
    assert_eq!(records.get(record.name()).unwrap(), Some(record));
}

#[tokio::test]
async fn finished_pass_wins_over_pending_cancellation() {
    let ctx = setup();
    let record = ctx.store(alice_request());

    let result = ctx
        .reconciler
        .reconcile_until(
            &RequestEvent::upserted(record),
            std::future::pending::<()>(),
        )
        .await;

    assert!(advanced(result).phase() == Phase::ProvisionNamespace);
}

#[tokio::test]
async fn already_cancelled_still_lets_instant_pass_finish() {
    // biased select polls the pass first; fakes complete on first poll
    let ctx = setup();
    let record = ctx.store(alice_request());

    let result = ctx
        .reconciler
        .reconcile_until(&RequestEvent::upserted(record), std::future::ready(()))
        .await;

    assert!(result.is_ok());
}
