//! Request lifecycle specs without a daemon
//!
//! The CLI only writes records; nothing is provisioned until wspd runs.

use crate::prelude::*;

#[test]
fn create_then_list() {
    let ws = Workspace::empty();
    ws.wsp()
        .args(&[
            "create", "alice-dev", "--user", "alice", "--service", "db", "--service", "cache",
        ])
        .passes()
        .stdout_eq("Created request alice-dev for user alice (services: db, cache)\n");

    ws.wsp().args(&["list"]).passes().stdout_eq(
        "NAME       USER   PHASE  READY  SERVICES  NAMESPACE\n\
         alice-dev  alice  new    no          0/2  \n",
    );
}

#[test]
fn create_writes_record_file() {
    let ws = Workspace::empty();
    ws.wsp()
        .args(&["create", "alice-dev", "--user", "alice"])
        .passes();

    let text = std::fs::read_to_string(ws.records_path().join("alice-dev.json")).unwrap();
    let record: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(record["spec"]["userName"], "alice");
    assert_eq!(record["meta"]["resourceVersion"], 1);
    assert_eq!(record["status"]["phase"], "");
}

#[test]
fn show_prints_the_record() {
    let ws = Workspace::empty();
    ws.wsp()
        .args(&["create", "alice-dev", "--user", "alice", "--service", "db"])
        .passes();

    let shown = ws.wsp().args(&["show", "alice-dev"]).passes().json();
    assert_eq!(shown["meta"]["name"], "alice-dev");
    assert_eq!(shown["spec"]["requiredServices"][0], "db");
    assert_eq!(shown["status"]["ready"], false);
}

#[test]
fn list_json() {
    let ws = Workspace::empty();
    ws.wsp()
        .args(&["create", "alice-dev", "--user", "alice"])
        .passes();
    ws.wsp().args(&["create", "bob-dev", "--user", "bob"]).passes();

    let listed = ws.wsp().args(&["list", "-o", "json"]).passes().json();
    let names: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["meta"]["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["alice-dev", "bob-dev"]);
}

#[test]
fn delete_removes_the_record() {
    let ws = Workspace::empty();
    ws.wsp()
        .args(&["create", "alice-dev", "--user", "alice"])
        .passes();

    ws.wsp()
        .args(&["delete", "alice-dev"])
        .passes()
        .stdout_eq("Deleted request alice-dev\n");
    assert!(!ws.records_path().join("alice-dev.json").exists());
    ws.wsp().args(&["list"]).passes().stdout_eq("No requests\n");
}

#[test]
fn state_dir_flag_overrides_environment() {
    let ws = Workspace::empty();
    let other = tempfile::tempdir().unwrap();
    ws.wsp()
        .args(&[
            "create",
            "alice-dev",
            "--user",
            "alice",
            "--state-dir",
            other.path().to_str().unwrap(),
        ])
        .passes();

    assert!(other.path().join("records/alice-dev.json").exists());
    ws.wsp().args(&["list"]).passes().stdout_eq("No requests\n");
}
