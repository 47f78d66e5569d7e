// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the reconciler

use std::fmt;
use thiserror::Error;
use wsp_core::{Phase, SpecError};

/// Coarse classification of a reconcile failure, for logs and callers
/// deciding whether a retry can help.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request spec is unusable; needs client correction
    Validation,
    /// An external create or query failed
    Provisioning,
    /// A required service matched zero or several catalog classes
    CatalogResolution,
    /// The new record could not be committed
    Persistence,
    /// The pass was aborted by shutdown
    Cancelled,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Provisioning => "provisioning",
            ErrorKind::CatalogResolution => "catalog_resolution",
            ErrorKind::Persistence => "persistence",
            ErrorKind::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A required service the catalog could not resolve to exactly one class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedService {
    pub name: String,
    pub matches: usize,
}

impl fmt::Display for UnresolvedService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} matching classes)", self.name, self.matches)
    }
}

/// Failure of a single phase executor
#[derive(Debug, Error)]
pub enum PhaseError {
    #[error("invalid spec: {0}")]
    Validation(#[from] SpecError),
    #[error("{action}: {source}")]
    Provisioning {
        action: String,
        #[source]
        source: wsp_adapters::StoreError,
    },
    #[error("unresolved services: {}", join(.unresolved))]
    CatalogResolution { unresolved: Vec<UnresolvedService> },
}

fn join(unresolved: &[UnresolvedService]) -> String {
    unresolved
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl PhaseError {
    pub(crate) fn provisioning(action: impl Into<String>, source: wsp_adapters::StoreError) -> Self {
        PhaseError::Provisioning {
            action: action.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PhaseError::Validation(_) => ErrorKind::Validation,
            PhaseError::Provisioning { .. } => ErrorKind::Provisioning,
            PhaseError::CatalogResolution { .. } => ErrorKind::CatalogResolution,
        }
    }
}

/// Failure of one reconcile pass, tagged with the phase it happened in.
///
/// The stored record is unchanged whenever one of these is returned.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("phase {phase}: {source}")]
    Phase {
        phase: Phase,
        #[source]
        source: PhaseError,
    },
    #[error("phase {phase}: commit failed: {source}")]
    Persist {
        phase: Phase,
        #[source]
        source: wsp_storage::StoreError,
    },
    #[error("phase {phase}: cancelled")]
    Cancelled { phase: Phase },
}

impl ReconcileError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReconcileError::Phase { source, .. } => source.kind(),
            ReconcileError::Persist { .. } => ErrorKind::Persistence,
            ReconcileError::Cancelled { .. } => ErrorKind::Cancelled,
        }
    }

    /// Phase the record was in when the pass failed
    pub fn phase(&self) -> Phase {
        match self {
            ReconcileError::Phase { phase, .. }
            | ReconcileError::Persist { phase, .. }
            | ReconcileError::Cancelled { phase } => *phase,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
