//! End-to-end provisioning specs
//!
//! wspd drives requests written by wsp through every phase against a
//! scripted kubectl.

use crate::prelude::*;

#[test]
fn request_reaches_complete() {
    let mut ws = Workspace::empty();
    ws.start_daemon();

    ws.wsp()
        .args(&[
            "create", "alice-dev", "--user", "alice", "--service", "db", "--service", "cache",
        ])
        .passes();

    let done = wait_for(SPEC_PROVISION_MAX_MS, || ws.phase_of("alice-dev") == "complete");
    assert!(done, "request never completed\n{}", ws.daemon_log());

    let shown = ws.wsp().args(&["show", "alice-dev"]).passes().json();
    assert_eq!(shown["status"]["ready"], true);
    assert_eq!(shown["status"]["namespace"], "alice-workspace");
    let instance = |service: &str| {
        shown["status"]["provisionedServices"][service]
            .as_str()
            .unwrap_or_default()
            .to_string()
    };
    assert!(instance("db").starts_with("db-alice-dev-"), "{shown}");
    assert!(instance("cache").starts_with("cache-alice-dev-"), "{shown}");
}

#[test]
fn request_created_before_startup_is_picked_up() {
    let mut ws = Workspace::empty();
    ws.wsp()
        .args(&["create", "bob-dev", "--user", "bob"])
        .passes();

    ws.start_daemon();

    let done = wait_for(SPEC_PROVISION_MAX_MS, || ws.phase_of("bob-dev") == "complete");
    assert!(done, "request never completed\n{}", ws.daemon_log());
}

#[test]
fn unknown_service_stalls_before_creating_instances() {
    let mut ws = Workspace::empty();
    ws.start_daemon();

    ws.wsp()
        .args(&["create", "alice-dev", "--user", "alice", "--service", "search"])
        .passes();

    let failed = wait_for(SPEC_PROVISION_MAX_MS, || {
        ws.daemon_log().contains("catalog_resolution")
    });
    assert!(failed, "no resolution failure logged\n{}", ws.daemon_log());
    assert_eq!(ws.phase_of("alice-dev"), "provision_services");
}

#[test]
fn invalid_record_does_not_block_others() {
    let mut ws = Workspace::empty();
    std::fs::create_dir_all(ws.records_path()).unwrap();
    // Bypasses CLI validation the way a hand-edited record would
    std::fs::write(
        ws.records_path().join("broken.json"),
        r#"{"meta":{"name":"broken","resourceVersion":1},"spec":{"userName":""}}"#,
    )
    .unwrap();
    ws.start_daemon();

    ws.wsp()
        .args(&["create", "alice-dev", "--user", "alice"])
        .passes();

    let done = wait_for(SPEC_PROVISION_MAX_MS, || ws.phase_of("alice-dev") == "complete");
    assert!(done, "request never completed\n{}", ws.daemon_log());
    assert_eq!(ws.phase_of("broken"), "");
}
