// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;
use wsp_adapters::{CatalogCall, ServiceClass};
use wsp_core::InstanceId;

#[tokio::test]
async fn creates_one_instance_per_service() {
    let ctx = setup();
    let record = alice_at(&ctx, Phase::ProvisionServices);

    let next = advanced(ctx.step(&record).await);

    assert_eq!(next.phase(), Phase::ProvisionedServices);
    assert_eq!(
        next.status.provisioned_services.get("db"),
        Some(&InstanceId::new(alice_instance("db")))
    );
    assert_eq!(
        next.status.provisioned_services.get("cache"),
        Some(&InstanceId::new(alice_instance("cache")))
    );
    let db = ctx
        .catalog
        .instance("alice-workspace", &alice_instance("db"))
        .unwrap();
    assert_eq!(db.class, "db");
    assert_eq!(db.parameters, json!({}));
    assert_eq!(ctx.catalog.instances().len(), 2);
}

#[tokio::test]
async fn missing_class_creates_nothing() {
    let ctx = setup_with_classes(&["db"]);
    let record = alice_at(&ctx, Phase::ProvisionServices);

    let result = ctx.step(&record).await;

    let message = match &result {
        Err(err) => err.to_string(),
        Ok(_) => String::new(),
    };
    assert!(message.contains("cache (0 matching classes)"), "{message}");
    assert_failed_unchanged(&ctx, &record, result, ErrorKind::CatalogResolution);
    assert!(ctx.catalog.instances().is_empty());
}

#[tokio::test]
async fn ambiguous_class_is_resolution_error() {
    let ctx = setup();
    ctx.catalog.add_class_with_id("other-db", "db");
    let record = alice_at(&ctx, Phase::ProvisionServices);

    let result = ctx.step(&record).await;

    assert_failed_unchanged(&ctx, &record, result, ErrorKind::CatalogResolution);
}

#[tokio::test]
async fn retry_after_partial_failure_does_not_duplicate() {
    let ctx = setup();
    ctx.catalog
        .fail_create_for("cache", StoreError::CommandFailed("quota exceeded".into()));
    let record = alice_at(&ctx, Phase::ProvisionServices);

    let result = ctx.step(&record).await;
    assert_failed_unchanged(&ctx, &record, result, ErrorKind::Provisioning);
    assert_eq!(ctx.catalog.instances().len(), 1);

    ctx.catalog.clear_create_failures();
    let next = advanced(ctx.step(&record).await);

    assert_eq!(ctx.catalog.instances().len(), 2);
    assert_eq!(
        next.status.provisioned_services.get("db"),
        Some(&InstanceId::new(alice_instance("db")))
    );
}

#[tokio::test]
async fn already_provisioned_services_are_skipped() {
    let ctx = setup();
    let record = ctx.store(
        RequestBuilder::new("alice-dev", "alice")
            .services(&["db", "cache"])
            .phase(Phase::ProvisionServices)
            .namespace("alice-workspace")
            .provisioned("db", "db-from-earlier")
            .build(),
    );

    let next = advanced(ctx.step(&record).await);

    assert_eq!(
        next.status.provisioned_services.get("db"),
        Some(&InstanceId::new("db-from-earlier"))
    );
    let created: Vec<String> = ctx.catalog.instances().into_iter().map(|i| i.name).collect();
    assert_eq!(created, vec![alice_instance("cache")]);
}

#[tokio::test]
async fn duplicate_services_collapse() {
    let ctx = setup();
    let record = ctx.store(
        RequestBuilder::new("alice-dev", "alice")
            .services(&["db", "db", "db"])
            .phase(Phase::ProvisionServices)
            .namespace("alice-workspace")
            .build(),
    );

    let next = advanced(ctx.step(&record).await);

    assert_eq!(next.status.provisioned_services.len(), 1);
    assert_eq!(ctx.catalog.instances().len(), 1);
}

#[tokio::test]
async fn class_listing_failure_is_provisioning_error() {
    let ctx = setup();
    ctx.catalog
        .set_list_error(Some(StoreError::CommandFailed("no catalog".into())));
    let record = alice_at(&ctx, Phase::ProvisionServices);

    let result = ctx.step(&record).await;

    assert_failed_unchanged(&ctx, &record, result, ErrorKind::Provisioning);
}

#[tokio::test]
async fn services_differing_only_in_case_get_their_own_instances() {
    let ctx = setup_with_classes(&["DB", "db"]);
    let record = ctx.store(
        RequestBuilder::new("alice-dev", "alice")
            .services(&["DB", "db"])
            .phase(Phase::ProvisionServices)
            .namespace("alice-workspace")
            .build(),
    );

    let next = advanced(ctx.step(&record).await);

    let upper = &next.status.provisioned_services["DB"];
    let lower = &next.status.provisioned_services["db"];
    assert_ne!(upper, lower);
    let class_of = |id: &InstanceId| {
        ctx.catalog
            .instance("alice-workspace", id.as_str())
            .map(|i| i.class_id)
    };
    assert_eq!(class_of(upper), Some("class-DB".to_string()));
    assert_eq!(class_of(lower), Some("class-db".to_string()));
    assert_eq!(ctx.catalog.instances().len(), 2);
}

#[tokio::test]
async fn existing_instance_of_the_resolved_class_is_adopted() {
    let ctx = setup();
    ctx.catalog.seed_instance(
        "alice-workspace",
        &alice_instance("db"),
        &ServiceClass::new("class-db", "db"),
    );
    let record = alice_at(&ctx, Phase::ProvisionServices);

    let next = advanced(ctx.step(&record).await);

    assert_eq!(
        next.status.provisioned_services.get("db"),
        Some(&InstanceId::new(alice_instance("db")))
    );
    assert!(ctx.catalog.calls().contains(&CatalogCall::GetInstance {
        namespace: "alice-workspace".to_string(),
        name: alice_instance("db"),
    }));
    assert_eq!(ctx.catalog.instances().len(), 2);
}

#[tokio::test]
async fn existing_instance_of_another_class_is_not_adopted() {
    let ctx = setup();
    ctx.catalog.seed_instance(
        "alice-workspace",
        &alice_instance("db"),
        &ServiceClass::new("class-cache", "cache"),
    );
    let record = alice_at(&ctx, Phase::ProvisionServices);

    let result = ctx.step(&record).await;

    let message = match &result {
        Err(err) => err.to_string(),
        Ok(_) => String::new(),
    };
    assert!(message.contains("expected \"class-db\""), "{message}");
    assert_failed_unchanged(&ctx, &record, result, ErrorKind::Provisioning);
}
