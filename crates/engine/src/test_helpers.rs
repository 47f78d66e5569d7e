// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for the engine crate.

use crate::{ReconcileError, Reconciled, Reconciler, ReconcilerDeps};
use wsp_adapters::{FakeBindingStore, FakeNamespaceStore, FakeServiceCatalog};
use wsp_core::{Phase, RequestEvent, RequestId, WorkspaceRequest};
use wsp_storage::{MemoryRecordStore, RecordStore};

/// Convenience alias for the fully-faked reconciler.
pub(crate) type TestReconciler =
    Reconciler<FakeNamespaceStore, FakeBindingStore, FakeServiceCatalog, MemoryRecordStore>;

/// Test context holding the reconciler and handles to its fakes.
pub(crate) struct TestContext {
    pub reconciler: TestReconciler,
    pub namespaces: FakeNamespaceStore,
    pub bindings: FakeBindingStore,
    pub catalog: FakeServiceCatalog,
    pub records: MemoryRecordStore,
}

/// A reconciler whose catalog offers `db` and `cache`.
pub(crate) fn setup() -> TestContext {
    let ctx = setup_with_classes(&[]);
    ctx.catalog.add_class("db");
    ctx.catalog.add_class("cache");
    ctx
}

pub(crate) fn setup_with_classes(classes: &[&str]) -> TestContext {
    let namespaces = FakeNamespaceStore::new();
    let bindings = FakeBindingStore::new();
    let catalog = FakeServiceCatalog::new();
    let records = MemoryRecordStore::new();
    for class in classes {
        catalog.add_class(class);
    }

    let reconciler = Reconciler::new(ReconcilerDeps {
        namespaces: namespaces.clone(),
        bindings: bindings.clone(),
        catalog: catalog.clone(),
        records: records.clone(),
    });

    TestContext {
        reconciler,
        namespaces,
        bindings,
        catalog,
        records,
    }
}

impl TestContext {
    /// Persist `record` as a new record and return the stored copy.
    pub fn store(&self, record: WorkspaceRequest) -> WorkspaceRequest {
        self.records.create(record).unwrap()
    }

    /// Current stored copy of the named record.
    pub fn stored(&self, name: &str) -> WorkspaceRequest {
        self.records.get(&RequestId::new(name)).unwrap().unwrap()
    }

    /// One reconcile pass over `record`.
    pub async fn step(&self, record: &WorkspaceRequest) -> Result<Reconciled, ReconcileError> {
        self.reconciler
            .reconcile(&RequestEvent::upserted(record.clone()))
            .await
    }

    /// Reconcile the stored record until a pass changes nothing or fails,
    /// returning every phase it passed through.
    pub async fn drive(&self, name: &str) -> Vec<Phase> {
        let mut phases = vec![self.stored(name).phase()];
        for _ in 0..Phase::ALL.len() {
            match self.step(&self.stored(name)).await {
                Ok(Reconciled::Advanced { record, .. }) => phases.push(record.phase()),
                _ => break,
            }
        }
        phases
    }

    /// Mark every instance the catalog holds as ready (or not).
    pub fn set_all_ready(&self, ready: bool) {
        for instance in self.catalog.instances() {
            self.catalog
                .set_ready(&instance.namespace, &instance.name, ready);
        }
    }
}
