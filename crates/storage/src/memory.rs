// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory record store with the same semantics as the file store

use crate::store::{check_name, initial, successor, RecordStore, StoreError};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use wsp_core::{RequestId, WorkspaceRequest};

/// Clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    records: Arc<Mutex<BTreeMap<RequestId, WorkspaceRequest>>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryRecordStore {
    fn get(&self, name: &RequestId) -> Result<Option<WorkspaceRequest>, StoreError> {
        Ok(self.records.lock().get(name).cloned())
    }

    fn list(&self) -> Result<Vec<WorkspaceRequest>, StoreError> {
        Ok(self.records.lock().values().cloned().collect())
    }

    fn create(&self, record: WorkspaceRequest) -> Result<WorkspaceRequest, StoreError> {
        check_name(record.name())?;
        let mut records = self.records.lock();
        if records.contains_key(record.name()) {
            return Err(StoreError::AlreadyExists(record.meta.name));
        }
        let record = initial(record);
        records.insert(record.name().clone(), record.clone());
        Ok(record)
    }

    fn replace(&self, record: &WorkspaceRequest) -> Result<WorkspaceRequest, StoreError> {
        let mut records = self.records.lock();
        let stored = records
            .get(record.name())
            .ok_or_else(|| StoreError::NotFound(record.name().clone()))?;
        let next = successor(stored, record)?;
        records.insert(next.name().clone(), next.clone());
        Ok(next)
    }

    fn delete(&self, name: &RequestId) -> Result<(), StoreError> {
        self.records
            .lock()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(name.clone()))
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
