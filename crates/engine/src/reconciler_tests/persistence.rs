// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use wsp_core::RequestEvent;

#[tokio::test]
async fn stale_event_fails_to_commit() {
    let ctx = setup();
    let stale = ctx.store(alice_request());
    let current = advanced(ctx.step(&stale).await);

    let result = ctx.step(&stale).await;

    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Persistence);
    assert_eq!(err.phase(), Phase::New);
    assert_eq!(ctx.stored("alice-dev"), current);
}

#[tokio::test]
async fn record_deleted_mid_pass_fails_to_commit() {
    let ctx = setup();
    let record = alice_at(&ctx, Phase::ProvisionNamespace);
    ctx.records.delete(record.name()).unwrap();

    let err = ctx.step(&record).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Persistence);
    assert!(matches!(
        err,
        ReconcileError::Persist {
            source: wsp_storage::StoreError::NotFound(_),
            ..
        }
    ));
}

#[tokio::test]
async fn deletion_event_does_nothing() {
    let ctx = setup();

    let result = ctx
        .reconciler
        .reconcile(&RequestEvent::deleted("alice-dev"))
        .await
        .unwrap();

    assert_eq!(result, Reconciled::Gone(RequestId::new("alice-dev")));
    assert!(ctx.namespaces.calls().is_empty());
    assert!(ctx.records.list().unwrap().is_empty());
}
