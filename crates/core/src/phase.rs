// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Provisioning phases.
//!
//! A request moves through the phases strictly in declaration order. The
//! derived `Ord` follows that order, so `a < b` means `a` comes first.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stage of the provisioning state machine.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Freshly created record with an empty status
    #[default]
    #[serde(rename = "")]
    New,
    /// Creating the user's namespace
    ProvisionNamespace,
    /// Granting the user roles inside the namespace
    RoleBindings,
    /// Creating service instances from the catalog
    ProvisionServices,
    /// Polling service instances until all report ready
    ProvisionedServices,
    /// Terminal: every service is ready
    Complete,
}

impl Phase {
    /// All phases, in order.
    pub const ALL: [Phase; 6] = [
        Phase::New,
        Phase::ProvisionNamespace,
        Phase::RoleBindings,
        Phase::ProvisionServices,
        Phase::ProvisionedServices,
        Phase::Complete,
    ];

    /// The phase that follows this one, or `None` at the terminal phase.
    pub fn next(self) -> Option<Phase> {
        match self {
            Phase::New => Some(Phase::ProvisionNamespace),
            Phase::ProvisionNamespace => Some(Phase::RoleBindings),
            Phase::RoleBindings => Some(Phase::ProvisionServices),
            Phase::ProvisionServices => Some(Phase::ProvisionedServices),
            Phase::ProvisionedServices => Some(Phase::Complete),
            Phase::Complete => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Phase::Complete
    }

    /// Wire name, as it appears in the persisted record.
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::New => "",
            Phase::ProvisionNamespace => "provision_namespace",
            Phase::RoleBindings => "role_bindings",
            Phase::ProvisionServices => "provision_services",
            Phase::ProvisionedServices => "provisioned_services",
            Phase::Complete => "complete",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // The empty wire name reads badly in logs
            Phase::New => f.write_str("new"),
            other => f.write_str(other.as_str()),
        }
    }
}

#[cfg(test)]
#[path = "phase_tests.rs"]
mod tests;
