// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Feeds record changes to the reconciler, one event at a time.
//!
//! Changes are detected by diffing `resourceVersion`s against the last
//! scan. A scan runs whenever the record directory changes, and every
//! record is redelivered on the resync interval. A record that advanced is
//! queued again straight away so the next phase does not wait for a scan.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use wsp_adapters::{BindingStore, NamespaceStore, ServiceCatalog};
use wsp_core::{RequestEvent, RequestId};
use wsp_engine::{ErrorKind, ReconcileError, Reconciled, Reconciler};
use wsp_storage::{RecordStore, StoreError};

use crate::queue::EventQueue;
use crate::shutdown::Shutdown;

pub struct Delivery<N, B, C, R> {
    reconciler: Reconciler<N, B, C, R>,
    /// Last version seen (or committed) per record
    known: HashMap<RequestId, u64>,
    queue: EventQueue,
}

impl<N, B, C, R> Delivery<N, B, C, R>
where
    N: NamespaceStore,
    B: BindingStore,
    C: ServiceCatalog,
    R: RecordStore,
{
    pub fn new(reconciler: Reconciler<N, B, C, R>) -> Self {
        Self {
            reconciler,
            known: HashMap::new(),
            queue: EventQueue::default(),
        }
    }

    /// Number of events waiting to be processed
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Diff the store against what was last seen and queue the differences.
    ///
    /// With `resync` every existing record is queued, changed or not.
    /// Returns the number of events queued.
    pub fn scan(&mut self, resync: bool) -> Result<usize, StoreError> {
        let records = self.reconciler.records().list()?;
        let mut queued = 0;

        let mut seen = HashMap::with_capacity(records.len());
        for record in records {
            let version = record.meta.resource_version;
            seen.insert(record.name().clone(), version);
            if resync || self.known.get(record.name()) != Some(&version) {
                self.queue.push(RequestEvent::upserted(record));
                queued += 1;
            }
        }

        for name in self.known.keys() {
            if !seen.contains_key(name) {
                self.queue.push(RequestEvent::deleted(name.clone()));
                queued += 1;
            }
        }

        self.known = seen;
        Ok(queued)
    }

    /// Process the next queued event, abandoning it if `shutdown` fires.
    ///
    /// Returns `None` when the queue is empty.
    pub async fn process_next(
        &mut self,
        shutdown: &mut Shutdown,
    ) -> Option<Result<Reconciled, ReconcileError>> {
        let event = self.queue.pop()?;
        let result = self
            .reconciler
            .reconcile_until(&event, shutdown.wait())
            .await;

        match &result {
            Ok(Reconciled::Advanced { record, .. }) => {
                self.known
                    .insert(record.name().clone(), record.meta.resource_version);
                if !record.is_complete() {
                    self.queue.push(RequestEvent::upserted(record.clone()));
                }
            }
            Ok(Reconciled::Gone(name)) => {
                self.known.remove(name);
            }
            Ok(Reconciled::Unchanged(_)) => {}
            Err(e) => log_failure(event.name(), e),
        }
        Some(result)
    }

    /// Process everything queued, stopping early on shutdown.
    pub async fn drain(&mut self, shutdown: &mut Shutdown) {
        while !shutdown.is_triggered() {
            if self.process_next(shutdown).await.is_none() {
                break;
            }
        }
    }

    /// Run until shutdown: drain the queue, then wait for a directory
    /// change or the resync tick.
    pub async fn run(
        mut self,
        mut wake: mpsc::Receiver<()>,
        resync: Duration,
        mut shutdown: Shutdown,
    ) {
        let mut resync_tick = tokio::time::interval(resync);
        let mut watcher_gone = false;

        loop {
            self.drain(&mut shutdown).await;
            if shutdown.is_triggered() {
                break;
            }

            let full = tokio::select! {
                _ = shutdown.wait() => break,
                _ = resync_tick.tick() => true,
                woke = wake.recv(), if !watcher_gone => match woke {
                    Some(()) => false,
                    None => {
                        warn!("record watcher stopped, relying on resync");
                        watcher_gone = true;
                        continue;
                    }
                },
            };

            match self.scan(full) {
                Ok(0) => {}
                Ok(queued) => debug!(queued, resync = full, "scan queued events"),
                Err(e) => error!(error = %e, "failed to scan records"),
            }
        }

        info!(pending = self.pending(), "delivery stopped");
    }
}

fn log_failure(name: &RequestId, err: &ReconcileError) {
    match err.kind() {
        // Expected during shutdown or after a concurrent write; the next
        // scan delivers the newer version
        ErrorKind::Cancelled | ErrorKind::Persistence => warn!(
            request = %name,
            kind = %err.kind(),
            phase = %err.phase(),
            error = %err,
            "reconcile did not commit",
        ),
        _ => error!(
            request = %name,
            kind = %err.kind(),
            phase = %err.phase(),
            error = %err,
            "reconcile failed",
        ),
    }
}

#[cfg(test)]
#[path = "delivery_tests.rs"]
mod tests;
