// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! wsp-core: Record types and naming rules for the workspace provisioner

pub mod event;
pub mod id;
pub mod naming;
pub mod phase;
pub mod request;
pub mod validate;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use event::RequestEvent;
pub use id::{InstanceId, RequestId};
pub use naming::{
    binding_name, instance_name, is_dns_label, namespace_for_user, MANAGED_LABEL, USER_ROLES,
};
pub use phase::Phase;
pub use request::{RecordMeta, RequestSpec, RequestStatus, WorkspaceRequest};
pub use validate::SpecError;
