//! Daemon lifecycle specs
//!
//! Single-instance lock, logging, and signal handling.

use crate::prelude::*;

#[test]
fn daemon_writes_pid_and_log() {
    let mut ws = Workspace::empty();
    ws.start_daemon();

    let pid = std::fs::read_to_string(ws.state_path().join("daemon.pid")).unwrap();
    assert!(pid.trim().parse::<u32>().is_ok(), "pid file: {pid:?}");
    assert!(
        wait_for(SPEC_WAIT_MAX_MS, || ws.daemon_log().contains("daemon ready")),
        "log: {}",
        ws.daemon_log()
    );
}

#[test]
fn second_daemon_refuses_to_start() {
    let mut ws = Workspace::empty();
    ws.start_daemon();

    let output = ws.wspd_command().output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("wspd is already running"), "got: {stderr}");
}

#[test]
fn sigterm_stops_the_daemon() {
    let mut ws = Workspace::empty();
    ws.start_daemon();

    let status = ws.stop_daemon();
    assert!(status.success(), "exit status: {status:?}");
    assert!(
        wait_for(SPEC_WAIT_MAX_MS, || ws.daemon_log().contains("daemon stopped")),
        "log: {}",
        ws.daemon_log()
    );
}

#[test]
fn invalid_config_file_fails_startup() {
    let ws = Workspace::empty();
    std::fs::write(ws.state_path().join("config.toml"), "bogus_key = 1\n").unwrap();

    let output = ws.wspd_command().output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("config.toml"), "got: {stderr}");
}
