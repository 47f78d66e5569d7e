// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reconciler tests

mod bindings;
mod cancellation;
mod init;
mod namespace;
mod persistence;
mod properties;
mod readiness;
mod services;

use super::*;
use crate::test_helpers::{setup, setup_with_classes, TestContext};
use crate::ErrorKind;
use wsp_adapters::StoreError;
use wsp_core::test_support::{alice_request, RequestBuilder};
use wsp_core::{instance_name, RequestId};

/// Name of the instance provisioned for `service` on behalf of `alice-dev`.
fn alice_instance(service: &str) -> String {
    instance_name(&RequestId::new("alice-dev"), service)
}

/// `alice-dev` stored at `phase` with the status earlier phases would
/// have produced.
fn alice_at(ctx: &TestContext, phase: Phase) -> WorkspaceRequest {
    let mut builder = RequestBuilder::new("alice-dev", "alice")
        .services(&["db", "cache"])
        .phase(phase);
    if phase > Phase::ProvisionNamespace {
        builder = builder.namespace("alice-workspace");
    }
    if phase > Phase::ProvisionServices {
        builder = builder
            .provisioned("db", &alice_instance("db"))
            .provisioned("cache", &alice_instance("cache"));
    }
    ctx.store(builder.build())
}

/// Assert a pass failed with `kind` in `phase` and left the store alone.
fn assert_failed_unchanged(
    ctx: &TestContext,
    before: &WorkspaceRequest,
    result: Result<Reconciled, ReconcileError>,
    kind: ErrorKind,
) {
    let err = match result {
        Err(err) => err,
        Ok(other) => panic!("expected {kind} error, got {other:?}"),
    };
    assert_eq!(err.kind(), kind, "{err}");
    assert_eq!(err.phase(), before.phase());
    assert_eq!(&ctx.stored(before.name().as_str()), before);
}

fn advanced(result: Result<Reconciled, ReconcileError>) -> WorkspaceRequest {
    match result {
        Ok(Reconciled::Advanced { record, .. }) => record,
        other => panic!("expected phase advance, got {other:?}"),
    }
}
