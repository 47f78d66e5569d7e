// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Phase executors.
//!
//! Each executor borrows the current record and returns either the next
//! record (built from a clone), `None` when nothing changed, or an error.
//! The input record is never mutated.

mod bindings;
mod init;
mod namespace;
mod readiness;
mod services;

use crate::error::PhaseError;
use wsp_core::WorkspaceRequest;

pub(crate) type PhaseResult = Result<Option<WorkspaceRequest>, PhaseError>;
