// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use wsp_adapters::RoleBinding;
use wsp_core::binding_name;

fn alice_edit() -> RoleBinding {
    RoleBinding {
        name: binding_name(&RequestId::new("alice-dev"), "edit"),
        namespace: "alice-workspace".to_string(),
        role: "edit".to_string(),
        user: "alice".to_string(),
    }
}

#[tokio::test]
async fn grants_edit_in_workspace() {
    let ctx = setup();
    let record = alice_at(&ctx, Phase::RoleBindings);

    let next = advanced(ctx.step(&record).await);

    assert_eq!(next.phase(), Phase::ProvisionServices);
    assert_eq!(ctx.bindings.bindings(), vec![alice_edit()]);
}

#[tokio::test]
async fn existing_binding_is_success() {
    let ctx = setup();
    ctx.bindings.add_binding(alice_edit());
    let record = alice_at(&ctx, Phase::RoleBindings);

    let next = advanced(ctx.step(&record).await);

    assert_eq!(next.phase(), Phase::ProvisionServices);
    assert_eq!(ctx.bindings.bindings().len(), 1);
}

#[tokio::test]
async fn binding_failure_leaves_record_unchanged() {
    let ctx = setup();
    ctx.bindings
        .set_create_error(Some(StoreError::CommandFailed("forbidden".into())));
    let record = alice_at(&ctx, Phase::RoleBindings);

    let result = ctx.step(&record).await;

    assert_failed_unchanged(&ctx, &record, result, ErrorKind::Provisioning);
}
