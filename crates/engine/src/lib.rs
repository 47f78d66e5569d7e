// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Workspace provisioning reconciler

mod error;
mod phases;
pub mod readiness;
mod reconciler;

#[cfg(test)]
mod test_helpers;

pub use error::{ErrorKind, PhaseError, ReconcileError, UnresolvedService};
pub use readiness::Readiness;
pub use reconciler::{Reconciled, Reconciler, ReconcilerDeps};
