//! Daemon help and version specs
//!
//! Verify wspd --help and --version work without taking the lock.

use crate::prelude::*;
use std::process::Command;

fn wspd() -> Command {
    Command::new(wspd_binary())
}

#[test]
fn wspd_version() {
    let output = wspd().arg("--version").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("wspd 0.1.0"), "got: {stdout}");
}

#[test]
fn wspd_help_lists_flags() {
    let output = wspd().arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in [
        "--resync",
        "--log-level",
        "--state-dir",
        "--kubectl",
        "--kubectl-timeout",
    ] {
        assert!(stdout.contains(flag), "expected {flag} in: {stdout}");
    }
}

#[test]
fn wspd_rejects_unknown_flag() {
    let output = wspd().arg("--bogus").output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--bogus"), "got: {stderr}");
}
