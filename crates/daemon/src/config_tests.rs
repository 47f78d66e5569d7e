// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::tempdir;

#[test]
fn defaults_without_file_or_flags() {
    let config = Config::resolve(
        PathBuf::from("/state"),
        FileConfig::default(),
        &DaemonArgs::default(),
    );

    assert_eq!(config.records_dir, PathBuf::from("/state/records"));
    assert_eq!(config.lock_path, PathBuf::from("/state/daemon.pid"));
    assert_eq!(config.log_path, PathBuf::from("/state/daemon.log"));
    assert_eq!(config.resync, Duration::from_secs(60));
    assert_eq!(config.log_level, "info");
    assert_eq!(config.kubectl, PathBuf::from("kubectl"));
    assert_eq!(config.kubectl_timeout, Duration::from_secs(30));
    assert_eq!(config.kube_context, None);
}

#[test]
fn flags_override_file() {
    let file: FileConfig = toml::from_str(
        r#"
        resync_secs = 10
        log_level = "debug"
        kubectl = "/opt/kubectl"
        kube_context = "staging"
        "#,
    )
    .unwrap();
    let args =
        DaemonArgs::try_parse_from(["wspd", "--resync", "5", "--kubectl-timeout", "7"]).unwrap();

    let config = Config::resolve(PathBuf::from("/state"), file, &args);

    assert_eq!(config.resync, Duration::from_secs(5));
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.kubectl, PathBuf::from("/opt/kubectl"));
    assert_eq!(config.kubectl_timeout, Duration::from_secs(7));
    assert_eq!(config.kube_context.as_deref(), Some("staging"));
}

#[test]
fn zero_resync_is_clamped() {
    let args = DaemonArgs::try_parse_from(["wspd", "--resync", "0"]).unwrap();
    let config = Config::resolve(PathBuf::from("/s"), FileConfig::default(), &args);
    assert_eq!(config.resync, Duration::from_secs(1));
}

#[test]
fn load_reads_config_file_from_state_dir() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "log_level = \"warn\"\n").unwrap();
    let args = DaemonArgs {
        state_dir: Some(dir.path().to_path_buf()),
        ..DaemonArgs::default()
    };

    let config = Config::load(&args).unwrap();

    assert_eq!(config.state_dir, dir.path());
    assert_eq!(config.log_level, "warn");
}

#[test]
fn unknown_config_key_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "resync = 5\n").unwrap();

    let err = FileConfig::load(&path).unwrap_err();

    assert!(matches!(err, LifecycleError::Config { .. }), "{err:?}");
}

#[test]
fn missing_config_file_is_empty() {
    let dir = tempdir().unwrap();
    let file = FileConfig::load(&dir.path().join("config.toml")).unwrap();
    assert_eq!(file, FileConfig::default());
}
