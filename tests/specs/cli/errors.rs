//! CLI error handling specs
//!
//! Verify error messages and exit codes for rejected input.

use crate::prelude::*;

#[test]
fn create_without_user_is_a_usage_error() {
    let ws = Workspace::empty();
    ws.wsp()
        .args(&["create", "alice-dev"])
        .fails()
        .stderr_has("--user <USER>");
}

#[test]
fn create_with_blank_user_is_rejected() {
    let ws = Workspace::empty();
    ws.wsp()
        .args(&["create", "alice-dev", "--user", " "])
        .fails()
        .stderr_has("userName must not be empty");
    ws.wsp().args(&["list"]).passes().stdout_eq("No requests\n");
}

#[test]
fn create_with_unusable_user_is_rejected() {
    let ws = Workspace::empty();
    ws.wsp()
        .args(&["create", "alice-dev", "--user", "Alice_Smith"])
        .fails()
        .stderr_has("does not yield a valid namespace name");
}

#[test]
fn create_with_blank_service_is_rejected() {
    let ws = Workspace::empty();
    ws.wsp()
        .args(&["create", "alice-dev", "--user", "alice", "--service", ""])
        .fails()
        .stderr_has("requiredServices[0] is empty");
}

#[test]
fn create_with_padded_service_is_rejected() {
    let ws = Workspace::empty();
    ws.wsp()
        .args(&["create", "alice-dev", "--user", "alice", "--service", " db "])
        .fails()
        .stderr_has("has surrounding whitespace");
    ws.wsp().args(&["list"]).passes().stdout_eq("No requests\n");
}

#[test]
fn create_duplicate_is_rejected() {
    let ws = Workspace::empty();
    ws.wsp()
        .args(&["create", "alice-dev", "--user", "alice"])
        .passes();
    ws.wsp()
        .args(&["create", "alice-dev", "--user", "alice"])
        .fails()
        .stderr_has("request already exists: alice-dev");
}

#[test]
fn show_unknown_request() {
    let ws = Workspace::empty();
    ws.wsp()
        .args(&["show", "ghost"])
        .fails()
        .stderr_has("request not found: ghost");
}

#[test]
fn delete_unknown_request() {
    let ws = Workspace::empty();
    ws.wsp()
        .args(&["delete", "ghost"])
        .fails()
        .stderr_has("request not found: ghost");
}
