// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! wsp - workspace provisioner client

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod color;
mod commands;
mod env;
mod output;
mod table;

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use commands::request::{self, RequestCommand};
use output::OutputFormat;
use wsp_storage::FileRecordStore;

#[derive(Parser)]
#[command(
    name = "wsp",
    version,
    about = "Submit and inspect workspace provisioning requests",
    styles = color::styles()
)]
struct Cli {
    /// Output format
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t,
        global = true
    )]
    output: OutputFormat,

    /// State directory shared with wspd
    #[arg(long, value_name = "PATH", global = true)]
    state_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<RequestCommand>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", format_error(&e));
        std::process::exit(1);
    }
}

/// Format an anyhow error, deduplicating the chain.
///
/// If the top-level Display already contains the source error text, the
/// "Caused by" chain is skipped; otherwise the full chain is rendered.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();

    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));

    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        // No subcommand provided: print help and exit 0
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let state_dir = env::state_dir(cli.state_dir)?;
    let store = FileRecordStore::open(wsp_daemon::records_dir(&state_dir))?;

    let stdout = std::io::stdout();
    request::handle(command, &store, cli.output, &mut stdout.lock())
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
