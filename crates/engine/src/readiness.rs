// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Aggregates per-instance conditions into one readiness verdict.

use std::collections::BTreeMap;
use wsp_adapters::{ConditionStatus, InstanceStatus, READY_CONDITION};

/// Outcome of a readiness evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    /// Services that are not ready yet, in required order
    Pending { waiting: Vec<String> },
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready)
    }
}

/// An instance is ready iff it reports `Ready=True`.
pub fn instance_ready(status: &InstanceStatus) -> bool {
    status
        .condition(READY_CONDITION)
        .is_some_and(|c| c.status == ConditionStatus::True)
}

/// Ready iff every required service has a status and that status is ready.
///
/// A required service missing from `statuses` counts as not ready.
pub fn evaluate<'a>(
    required: impl IntoIterator<Item = &'a String>,
    statuses: &BTreeMap<String, InstanceStatus>,
) -> Readiness {
    let waiting: Vec<String> = required
        .into_iter()
        .filter(|service| !statuses.get(*service).is_some_and(instance_ready))
        .cloned()
        .collect();

    if waiting.is_empty() {
        Readiness::Ready
    } else {
        Readiness::Pending { waiting }
    }
}

#[cfg(test)]
#[path = "readiness_tests.rs"]
mod tests;
