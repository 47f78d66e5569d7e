// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::config::{DaemonArgs, FileConfig};
use std::time::Duration;
use tempfile::tempdir;
use wsp_core::test_support::alice_request;
use wsp_storage::RecordStore;

fn test_config(dir: &std::path::Path) -> Config {
    Config::resolve(dir.to_path_buf(), FileConfig::default(), &DaemonArgs::default())
}

#[test]
fn lock_writes_pid() {
    let dir = tempdir().unwrap();
    let config = test_config(dir.path());

    let _lock = acquire_lock(&config).unwrap();

    let pid = std::fs::read_to_string(&config.lock_path).unwrap();
    assert_eq!(pid.trim(), std::process::id().to_string());
}

#[test]
fn second_lock_fails_and_keeps_pid() {
    let dir = tempdir().unwrap();
    let config = test_config(dir.path());

    // Hold an exclusive lock (simulating the running daemon)
    let held = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&config.lock_path)
        .unwrap();
    held.lock_exclusive().unwrap();
    std::fs::write(&config.lock_path, b"12345").unwrap();

    let err = acquire_lock(&config).unwrap_err();

    assert!(matches!(err, LifecycleError::LockFailed(_)), "{err:?}");
    assert_eq!(std::fs::read_to_string(&config.lock_path).unwrap(), "12345");
}

#[test]
fn build_reconciler_creates_records_dir() {
    let dir = tempdir().unwrap();
    let config = test_config(dir.path());

    let reconciler = build_reconciler(&config).unwrap();

    assert!(config.records_dir.is_dir());
    assert!(reconciler.records().list().unwrap().is_empty());
}

#[tokio::test]
async fn watcher_wakes_on_record_write() {
    let dir = tempdir().unwrap();
    let config = test_config(dir.path());
    let records = wsp_storage::FileRecordStore::open(&config.records_dir).unwrap();
    let (tx, mut rx) = mpsc::channel(1);

    let _watcher = watch_records(&config, tx).unwrap();
    records.create(alice_request()).unwrap();

    let woke = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
    assert!(matches!(woke, Ok(Some(()))), "no wake-up: {woke:?}");
}
