// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon startup: lock, logging, store wiring.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use fs2::FileExt;
use thiserror::Error;
use tokio::sync::mpsc;
use wsp_adapters::{
    Kubectl, KubectlBindingStore, KubectlNamespaceStore, KubectlServiceCatalog, TracedBindings,
    TracedCatalog, TracedNamespaces,
};
use wsp_engine::{Reconciler, ReconcilerDeps};
use wsp_storage::FileRecordStore;

use crate::config::Config;

/// Reconciler with the production stores (wrapped with tracing)
pub type DaemonReconciler = Reconciler<
    TracedNamespaces<KubectlNamespaceStore>,
    TracedBindings<KubectlBindingStore>,
    TracedCatalog<KubectlServiceCatalog>,
    FileRecordStore,
>;

/// Errors that can occur while starting the daemon
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("could not determine state directory (set WSP_STATE_DIR or HOME)")]
    NoStateDir,
    #[error("another wspd holds the lock: {0}")]
    LockFailed(std::io::Error),
    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid log filter: {0}")]
    LogFilter(String),
    #[error("record store error: {0}")]
    Store(#[from] wsp_storage::StoreError),
    #[error("watch error: {0}")]
    Watch(#[from] notify::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Take the single-instance lock and write our PID into it.
///
/// The lock is held for as long as the returned file is alive.
pub fn acquire_lock(config: &Config) -> Result<File, LifecycleError> {
    std::fs::create_dir_all(&config.state_dir)?;

    // Open without truncating so a running daemon's PID survives a failed attempt
    let mut lock_file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&config.lock_path)?;
    lock_file
        .try_lock_exclusive()
        .map_err(LifecycleError::LockFailed)?;

    lock_file.set_len(0)?;
    writeln!(lock_file, "{}", std::process::id())?;
    Ok(lock_file)
}

/// Log to `<state>/daemon.log` through a non-blocking writer.
///
/// `RUST_LOG` wins over the configured level. Keep the guard alive until
/// exit or buffered lines are lost.
pub fn setup_logging(
    config: &Config,
) -> Result<tracing_appender::non_blocking::WorkerGuard, LifecycleError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let dir = config.log_path.parent().ok_or(LifecycleError::NoStateDir)?;
    std::fs::create_dir_all(dir)?;
    let file_name = config
        .log_path
        .file_name()
        .ok_or(LifecycleError::NoStateDir)?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)
            .map_err(|e| LifecycleError::LogFilter(e.to_string()))?,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(guard)
}

/// Wire the kubectl-backed stores and the record directory into a reconciler.
pub fn build_reconciler(config: &Config) -> Result<DaemonReconciler, LifecycleError> {
    let kubectl = Kubectl::new(&config.kubectl)
        .with_context(config.kube_context.clone())
        .with_timeout(config.kubectl_timeout);
    let records = FileRecordStore::open(&config.records_dir)?;

    Ok(Reconciler::new(ReconcilerDeps {
        namespaces: TracedNamespaces::new(KubectlNamespaceStore::new(kubectl.clone())),
        bindings: TracedBindings::new(KubectlBindingStore::new(kubectl.clone())),
        catalog: TracedCatalog::new(KubectlServiceCatalog::new(kubectl)),
        records,
    }))
}

/// Watch the record directory, sending a wake-up for every change to a
/// record file. Wake-ups coalesce while the loop is busy.
pub fn watch_records(
    config: &Config,
    wake: mpsc::Sender<()>,
) -> Result<notify::RecommendedWatcher, LifecycleError> {
    use notify::{Event, RecursiveMode, Watcher};

    let mut watcher = notify::recommended_watcher(move |res: Result<Event, _>| {
        if let Ok(event) = res {
            let touches_record = event
                .paths
                .iter()
                .any(|p| p.extension().is_some_and(|ext| ext == "json"));
            if touches_record {
                let _ = wake.try_send(());
            }
        }
    })?;
    watcher.watch(&config.records_dir, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
