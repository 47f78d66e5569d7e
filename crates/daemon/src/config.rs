// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon configuration.
//!
//! Precedence: command-line flags, then `<state>/config.toml`, then
//! built-in defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;

use crate::lifecycle::LifecycleError;

const DEFAULT_RESYNC_SECS: u64 = 60;
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_KUBECTL: &str = "kubectl";
const DEFAULT_KUBECTL_TIMEOUT_SECS: u64 = 30;

/// Directory holding one JSON file per request, inside `state_dir`.
///
/// Shared with the CLI, which writes records the daemon picks up.
pub fn records_dir(state_dir: &Path) -> PathBuf {
    state_dir.join("records")
}

/// Workspace provisioner daemon
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "wspd", version, about)]
pub struct DaemonArgs {
    /// Seconds between full resyncs of every record
    #[arg(long, value_name = "SECS")]
    pub resync: Option<u64>,

    /// Log level used when RUST_LOG is unset
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// State directory (records, log, lock file)
    #[arg(long, value_name = "PATH")]
    pub state_dir: Option<PathBuf>,

    /// kubectl binary to invoke
    #[arg(long, value_name = "PATH")]
    pub kubectl: Option<PathBuf>,

    /// Seconds before a kubectl invocation is killed
    #[arg(long, value_name = "SECS")]
    pub kubectl_timeout: Option<u64>,
}

/// Contents of `config.toml`; every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub resync_secs: Option<u64>,
    pub log_level: Option<String>,
    pub kubectl: Option<PathBuf>,
    pub kubectl_timeout_secs: Option<u64>,
    pub kube_context: Option<String>,
}

impl FileConfig {
    /// Read `path`, treating a missing file as empty.
    pub fn load(path: &Path) -> Result<Self, LifecycleError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        toml::from_str(&text).map_err(|source| LifecycleError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Resolved daemon configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root state directory (e.g. ~/.local/state/wsp)
    pub state_dir: PathBuf,
    /// One JSON file per workspace request
    pub records_dir: PathBuf,
    /// Path to lock/PID file
    pub lock_path: PathBuf,
    /// Path to daemon log file
    pub log_path: PathBuf,
    pub resync: Duration,
    pub log_level: String,
    pub kubectl: PathBuf,
    pub kubectl_timeout: Duration,
    pub kube_context: Option<String>,
}

impl Config {
    /// Resolve the state directory, read its `config.toml`, and layer
    /// `args` on top.
    pub fn load(args: &DaemonArgs) -> Result<Self, LifecycleError> {
        let state_dir = match &args.state_dir {
            Some(dir) => dir.clone(),
            None => crate::env::state_dir()?,
        };
        let file = FileConfig::load(&state_dir.join("config.toml"))?;
        Ok(Self::resolve(state_dir, file, args))
    }

    pub fn resolve(state_dir: PathBuf, file: FileConfig, args: &DaemonArgs) -> Self {
        let resync_secs = args
            .resync
            .or(file.resync_secs)
            .unwrap_or(DEFAULT_RESYNC_SECS);
        let timeout_secs = args
            .kubectl_timeout
            .or(file.kubectl_timeout_secs)
            .unwrap_or(DEFAULT_KUBECTL_TIMEOUT_SECS);

        Self {
            records_dir: records_dir(&state_dir),
            lock_path: state_dir.join("daemon.pid"),
            log_path: state_dir.join("daemon.log"),
            state_dir,
            // A zero interval would make tokio panic
            resync: Duration::from_secs(resync_secs.max(1)),
            log_level: args
                .log_level
                .clone()
                .or(file.log_level)
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            kubectl: args
                .kubectl
                .clone()
                .or(file.kubectl)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_KUBECTL)),
            kubectl_timeout: Duration::from_secs(timeout_secs),
            kube_context: file.kube_context,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
