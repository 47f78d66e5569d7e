// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn alice_is_initialized() {
    let ctx = setup();
    let record = ctx.store(alice_request());

    let next = advanced(ctx.step(&record).await);

    assert_eq!(next.phase(), Phase::ProvisionNamespace);
    assert!(!next.status.ready);
    assert!(next.status.provisioned_services.is_empty());
    assert_eq!(next.meta.resource_version, 2);
    assert_eq!(ctx.stored("alice-dev"), next);
    // Initialization touches nothing outside the record
    assert!(ctx.namespaces.calls().is_empty());
    assert!(ctx.catalog.calls().is_empty());
}

#[tokio::test]
async fn initialization_clears_leftover_status() {
    let ctx = setup();
    let record = ctx.store(
        RequestBuilder::new("alice-dev", "alice")
            .namespace("stale")
            .ready(true)
            .build(),
    );

    let next = advanced(ctx.step(&record).await);

    assert_eq!(next.status.namespace, "");
    assert!(!next.status.ready);
}

#[yare::parameterized(
    empty_user      = { "", &["db"] },
    blank_user      = { "   ", &["db"] },
    uppercase_user  = { "Alice", &["db"] },
    empty_service   = { "alice", &["db", " "] },
)]
fn invalid_spec_is_rejected(user: &str, services: &[&str]) {
    let ctx = setup();
    let record = ctx.store(
        RequestBuilder::new("bad", user)
            .services(services)
            .build(),
    );

    let result = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(ctx.step(&record));

    assert_failed_unchanged(&ctx, &record, result, ErrorKind::Validation);
}
