// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn all_ready_completes() {
    let ctx = setup();
    ctx.catalog.set_ready("alice-workspace", &alice_instance("db"), true);
    ctx.catalog.set_ready("alice-workspace", &alice_instance("cache"), true);
    let record = alice_at(&ctx, Phase::ProvisionedServices);

    let next = advanced(ctx.step(&record).await);

    assert_eq!(next.phase(), Phase::Complete);
    assert!(next.status.ready);
    assert_eq!(ctx.stored("alice-dev"), next);
}

#[tokio::test]
async fn one_not_ready_is_unchanged_without_error() {
    let ctx = setup();
    ctx.catalog.set_ready("alice-workspace", &alice_instance("db"), true);
    ctx.catalog.set_ready("alice-workspace", &alice_instance("cache"), false);
    let record = alice_at(&ctx, Phase::ProvisionedServices);

    let result = ctx.step(&record).await.unwrap();

    assert_eq!(result, Reconciled::Unchanged(record.clone()));
    assert_eq!(ctx.stored("alice-dev"), record);
}

#[tokio::test]
async fn missing_provisioned_entry_is_not_ready() {
    let ctx = setup();
    ctx.catalog.set_ready("alice-workspace", &alice_instance("db"), true);
    let record = ctx.store(
        RequestBuilder::new("alice-dev", "alice")
            .services(&["db", "cache"])
            .phase(Phase::ProvisionedServices)
            .namespace("alice-workspace")
            .provisioned("db", &alice_instance("db"))
            .build(),
    );

    let result = ctx.step(&record).await.unwrap();

    assert!(matches!(result, Reconciled::Unchanged(_)), "{result:?}");
}

#[tokio::test]
async fn status_query_failure_is_provisioning_error() {
    let ctx = setup();
    ctx.catalog
        .set_status_error(Some(StoreError::CommandFailed("timeout".into())));
    let record = alice_at(&ctx, Phase::ProvisionedServices);

    let result = ctx.step(&record).await;

    assert_failed_unchanged(&ctx, &record, result, ErrorKind::Provisioning);
}

#[tokio::test]
async fn complete_is_a_no_op() {
    let ctx = setup();
    let record = ctx.store(
        RequestBuilder::new("alice-dev", "alice")
            .phase(Phase::Complete)
            .ready(true)
            .build(),
    );

    let result = ctx.step(&record).await.unwrap();

    assert_eq!(result, Reconciled::Unchanged(record));
    assert!(ctx.catalog.calls().is_empty());
    assert!(ctx.namespaces.calls().is_empty());
}
