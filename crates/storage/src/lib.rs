// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Persistence for workspace request records

mod atomic;
mod file;
mod memory;
mod store;

pub use file::FileRecordStore;
pub use memory::MemoryRecordStore;
pub use store::{is_valid_record_name, RecordStore, StoreError};
