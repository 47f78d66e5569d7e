// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors shared by every resource store

use thiserror::Error;

/// Errors from resource store operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The object already exists. Callers that create by deterministic name
    /// treat this as success.
    #[error("already exists: {0}")]
    AlreadyExists(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("command failed: {0}")]
    CommandFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    /// An object with the expected name exists but is not the one asked for.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl StoreError {
    pub fn is_already_exists(&self) -> bool {
        matches!(self, StoreError::AlreadyExists(_))
    }
}
