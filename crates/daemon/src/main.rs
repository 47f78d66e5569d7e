// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace Provisioner Daemon (wspd)
//!
//! Watches the record directory and drives every workspace request through
//! its provisioning phases.
//!
//! Architecture:
//! - Watcher: notify callback that wakes the delivery loop on record changes
//! - Signal task: turns SIGINT/SIGTERM into a shutdown trigger
//! - Delivery loop: main task, one reconcile pass at a time

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use clap::Parser;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;
use tracing::{error, info};

use wsp_daemon::lifecycle::{self, LifecycleError};
use wsp_daemon::{shutdown_channel, Config, DaemonArgs, Delivery};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = DaemonArgs::parse();
    let config = Config::load(&args)?;

    let log_guard = lifecycle::setup_logging(&config)?;

    let _lock = match lifecycle::acquire_lock(&config) {
        Ok(lock) => lock,
        Err(LifecycleError::LockFailed(_)) => {
            let pid = std::fs::read_to_string(&config.lock_path)
                .unwrap_or_default()
                .trim()
                .to_string();
            eprintln!("wspd is already running");
            if !pid.is_empty() {
                eprintln!("  pid: {pid}");
            }
            std::process::exit(1);
        }
        Err(e) => {
            error!("failed to start daemon: {}", e);
            drop(log_guard);
            return Err(e.into());
        }
    };

    let reconciler = lifecycle::build_reconciler(&config)?;

    // Capacity 1: wake-ups arriving while a scan is pending are redundant
    let (wake_tx, wake_rx) = mpsc::channel(1);
    let _watcher = lifecycle::watch_records(&config, wake_tx)?;

    let (trigger, shutdown) = shutdown_channel();
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    tokio::spawn(async move {
        tokio::select! {
            _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
            _ = sigint.recv() => info!("received SIGINT, shutting down"),
        }
        trigger.trigger();
    });

    info!(
        version = env!("CARGO_PKG_VERSION"),
        records = %config.records_dir.display(),
        resync_secs = config.resync.as_secs(),
        kubectl = %config.kubectl.display(),
        "daemon ready",
    );

    let mut delivery = Delivery::new(reconciler);
    match delivery.scan(false) {
        Ok(queued) => info!(queued, "initial scan"),
        Err(e) => error!(error = %e, "initial scan failed"),
    }
    delivery.run(wake_rx, config.resync, shutdown).await;

    info!("daemon stopped");
    drop(log_guard);
    Ok(())
}
