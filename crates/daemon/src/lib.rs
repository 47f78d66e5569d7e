// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace provisioner daemon library
//!
//! Bootstrap, configuration and the delivery loop that feeds the
//! reconciler. `main.rs` wires these together.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod config;
pub mod delivery;
pub mod env;
pub mod lifecycle;
mod queue;
mod shutdown;

pub use config::{records_dir, Config, DaemonArgs};
pub use delivery::Delivery;
pub use lifecycle::{DaemonReconciler, LifecycleError};
pub use shutdown::{shutdown_channel, Shutdown, ShutdownTrigger};
