// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Record store contract shared by every backend.

use chrono::Utc;
use thiserror::Error;
use wsp_core::{RequestId, WorkspaceRequest};

/// Longest record name accepted (DNS-1123 subdomain limit)
const MAX_NAME_LEN: usize = 253;

/// Errors from record store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record {0} not found")]
    NotFound(RequestId),
    #[error("record {0} already exists")]
    AlreadyExists(RequestId),
    #[error("record {name} changed concurrently (expected version {expected}, found {found})")]
    Conflict {
        name: RequestId,
        expected: u64,
        found: u64,
    },
    #[error("invalid record name {0:?}")]
    InvalidName(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Durable home of workspace request records.
///
/// Writes are compare-and-swap on `resourceVersion`: `replace` only
/// succeeds when the caller saw the latest version.
pub trait RecordStore: Clone + Send + Sync + 'static {
    fn get(&self, name: &RequestId) -> Result<Option<WorkspaceRequest>, StoreError>;

    /// All readable records, ordered by name.
    fn list(&self) -> Result<Vec<WorkspaceRequest>, StoreError>;

    /// Store a new record at version 1, stamped with the creation time.
    fn create(&self, record: WorkspaceRequest) -> Result<WorkspaceRequest, StoreError>;

    /// Overwrite a record whose stored version equals `record`'s, returning
    /// the stored copy with the version bumped.
    fn replace(&self, record: &WorkspaceRequest) -> Result<WorkspaceRequest, StoreError>;

    fn delete(&self, name: &RequestId) -> Result<(), StoreError>;
}

/// Whether `name` may be used as a record name: a DNS-1123 subdomain
/// (lowercase alphanumerics, `-` and `.`, alphanumeric at both ends).
pub fn is_valid_record_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    if bytes.is_empty() || bytes.len() > MAX_NAME_LEN {
        return false;
    }
    let alnum = |b: &u8| b.is_ascii_lowercase() || b.is_ascii_digit();
    bytes.iter().all(|b| alnum(b) || *b == b'-' || *b == b'.')
        && bytes.first().is_some_and(alnum)
        && bytes.last().is_some_and(alnum)
}

pub(crate) fn check_name(name: &RequestId) -> Result<(), StoreError> {
    if is_valid_record_name(name.as_str()) {
        Ok(())
    } else {
        Err(StoreError::InvalidName(name.to_string()))
    }
}

/// The record as first stored.
pub(crate) fn initial(mut record: WorkspaceRequest) -> WorkspaceRequest {
    record.meta.resource_version = 1;
    record.meta.created_at = Some(Utc::now());
    record
}

/// The record that replaces `stored`, or a conflict if `incoming` is stale.
pub(crate) fn successor(
    stored: &WorkspaceRequest,
    incoming: &WorkspaceRequest,
) -> Result<WorkspaceRequest, StoreError> {
    let found = stored.meta.resource_version;
    let expected = incoming.meta.resource_version;
    if found != expected {
        return Err(StoreError::Conflict {
            name: incoming.meta.name.clone(),
            expected,
            found,
        });
    }

    let mut next = incoming.clone();
    next.meta.resource_version = found + 1;
    next.meta.created_at = stored.meta.created_at;
    Ok(next)
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
