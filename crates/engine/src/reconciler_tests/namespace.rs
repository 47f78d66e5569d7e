// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use wsp_adapters::NamespaceCall;

#[tokio::test]
async fn creates_managed_namespace() {
    let ctx = setup();
    let record = alice_at(&ctx, Phase::ProvisionNamespace);

    let next = advanced(ctx.step(&record).await);

    assert_eq!(next.phase(), Phase::RoleBindings);
    assert_eq!(next.status.namespace, "alice-workspace");
    let ns = ctx.namespaces.get_namespace("alice-workspace").unwrap();
    assert!(ns.is_managed());
}

#[tokio::test]
async fn existing_namespace_is_adopted() {
    let ctx = setup();
    ctx.namespaces.add_namespace("alice-workspace");
    let record = alice_at(&ctx, Phase::ProvisionNamespace);

    let next = advanced(ctx.step(&record).await);

    assert_eq!(next.phase(), Phase::RoleBindings);
    assert_eq!(next.status.namespace, "alice-workspace");
    assert_eq!(ctx.namespaces.len(), 1);
    assert_eq!(
        ctx.namespaces.calls(),
        vec![
            NamespaceCall::Create {
                name: "alice-workspace".to_string()
            },
            NamespaceCall::Get {
                name: "alice-workspace".to_string()
            },
        ]
    );
}

#[tokio::test]
async fn namespace_phase_is_idempotent() {
    let ctx = setup();
    let record = alice_at(&ctx, Phase::ProvisionNamespace);

    let first = ctx.reconciler.provision_namespace(&record).await.unwrap();
    let second = ctx.reconciler.provision_namespace(&record).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(ctx.namespaces.len(), 1);
    // The executor borrows its input
    assert_eq!(record.phase(), Phase::ProvisionNamespace);
}

#[tokio::test]
async fn create_failure_leaves_record_unchanged() {
    let ctx = setup();
    ctx.namespaces
        .set_create_error(Some(StoreError::CommandFailed("forbidden".into())));
    let record = alice_at(&ctx, Phase::ProvisionNamespace);

    let result = ctx.step(&record).await;

    assert_failed_unchanged(&ctx, &record, result, ErrorKind::Provisioning);
}

#[tokio::test]
async fn vanished_namespace_is_provisioning_error() {
    let ctx = setup();
    ctx.namespaces.set_create_error(Some(StoreError::AlreadyExists(
        "namespace/alice-workspace".into(),
    )));
    let record = alice_at(&ctx, Phase::ProvisionNamespace);

    let result = ctx.step(&record).await;

    assert_failed_unchanged(&ctx, &record, result, ErrorKind::Provisioning);
}

#[tokio::test]
async fn confirm_failure_is_provisioning_error() {
    let ctx = setup();
    ctx.namespaces.add_namespace("alice-workspace");
    ctx.namespaces
        .set_get_error(Some(StoreError::CommandFailed("timeout".into())));
    let record = alice_at(&ctx, Phase::ProvisionNamespace);

    let result = ctx.step(&record).await;

    assert_failed_unchanged(&ctx, &record, result, ErrorKind::Provisioning);
}
