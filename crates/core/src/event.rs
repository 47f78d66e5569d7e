// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Delivery events handed to the reconciler.

use crate::id::RequestId;
use crate::request::WorkspaceRequest;
use serde::{Deserialize, Serialize};

/// A change observed on a workspace request.
///
/// The delivery layer decodes whatever it watches into one of these; the
/// reconciler never sees other object kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequestEvent {
    /// The record was created, updated, or is being resynced.
    Upserted { record: WorkspaceRequest },
    /// The record no longer exists.
    Deleted { name: RequestId },
}

impl RequestEvent {
    pub fn upserted(record: WorkspaceRequest) -> Self {
        RequestEvent::Upserted { record }
    }

    pub fn deleted(name: impl Into<RequestId>) -> Self {
        RequestEvent::Deleted { name: name.into() }
    }

    /// Name of the record this event concerns.
    pub fn name(&self) -> &RequestId {
        match self {
            RequestEvent::Upserted { record } => record.name(),
            RequestEvent::Deleted { name } => name,
        }
    }

    /// Short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            RequestEvent::Upserted { .. } => "upserted",
            RequestEvent::Deleted { .. } => "deleted",
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
