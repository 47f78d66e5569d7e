// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{InstanceId, Phase, RequestSpec, RequestStatus, WorkspaceRequest};

/// Builder for [`WorkspaceRequest`] fixtures.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    record: WorkspaceRequest,
}

impl RequestBuilder {
    /// A new-phase request named `name` for `user` with no services.
    pub fn new(name: &str, user: &str) -> Self {
        Self {
            record: WorkspaceRequest::new(
                name,
                RequestSpec {
                    user_name: user.to_string(),
                    required_services: Vec::new(),
                },
            ),
        }
    }

    pub fn services(mut self, services: &[&str]) -> Self {
        self.record.spec.required_services = services.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn phase(mut self, phase: Phase) -> Self {
        self.record.status.phase = phase;
        self
    }

    pub fn namespace(mut self, namespace: &str) -> Self {
        self.record.status.namespace = namespace.to_string();
        self
    }

    pub fn provisioned(mut self, service: &str, instance: &str) -> Self {
        self.record
            .status
            .provisioned_services
            .insert(service.to_string(), InstanceId::new(instance));
        self
    }

    pub fn ready(mut self, ready: bool) -> Self {
        self.record.status.ready = ready;
        self
    }

    pub fn version(mut self, version: u64) -> Self {
        self.record.meta.resource_version = version;
        self
    }

    pub fn status(mut self, status: RequestStatus) -> Self {
        self.record.status = status;
        self
    }

    pub fn build(self) -> WorkspaceRequest {
        self.record
    }
}

/// `alice` asking for `db` and `cache`: the record most tests start from.
pub fn alice_request() -> WorkspaceRequest {
    RequestBuilder::new("alice-dev", "alice")
        .services(&["db", "cache"])
        .build()
}
