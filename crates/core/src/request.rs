// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The declarative workspace request record.

use crate::id::{InstanceId, RequestId};
use crate::phase::Phase;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identity and bookkeeping owned by the record store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMeta {
    pub name: RequestId,
    /// Version token for compare-and-swap updates. Bumped by the store on
    /// every successful write; `0` means "never stored".
    #[serde(default)]
    pub resource_version: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Client-supplied desired state. Immutable once the record exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSpec {
    pub user_name: String,
    #[serde(default)]
    pub required_services: Vec<String>,
}

/// Reconciler-owned observed state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestStatus {
    #[serde(default)]
    pub phase: Phase,
    #[serde(default)]
    pub ready: bool,
    /// Namespace created for the user; empty until provisioned.
    #[serde(default)]
    pub namespace: String,
    /// Requested service name -> instance created for it.
    #[serde(default)]
    pub provisioned_services: BTreeMap<String, InstanceId>,
}

/// A user's request for a provisioned workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceRequest {
    pub meta: RecordMeta,
    pub spec: RequestSpec,
    #[serde(default)]
    pub status: RequestStatus,
}

impl WorkspaceRequest {
    /// Create an unsaved request with an empty status.
    pub fn new(name: impl Into<RequestId>, spec: RequestSpec) -> Self {
        Self {
            meta: RecordMeta {
                name: name.into(),
                ..RecordMeta::default()
            },
            spec,
            status: RequestStatus::default(),
        }
    }

    pub fn name(&self) -> &RequestId {
        &self.meta.name
    }

    pub fn phase(&self) -> Phase {
        self.status.phase
    }

    pub fn is_complete(&self) -> bool {
        self.status.phase.is_terminal()
    }

    /// Copy of this record with `status` replaced.
    ///
    /// Phase executors build their result through this so the input record
    /// is never touched.
    pub fn with_status(&self, status: RequestStatus) -> Self {
        Self {
            meta: self.meta.clone(),
            spec: self.spec.clone(),
            status,
        }
    }

    /// Whether every provisioned service key is, verbatim, one of
    /// `requiredServices`.
    pub fn services_within_spec(&self) -> bool {
        let required = self.spec.services();
        self.status
            .provisioned_services
            .keys()
            .all(|name| required.contains(name.as_str()))
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
