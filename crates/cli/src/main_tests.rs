// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use super::{format_error, Cli, OutputFormat, RequestCommand};

#[test]
fn command_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn version_long() {
    let err = Cli::try_parse_from(["wsp", "--version"]).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::DisplayVersion);
}

#[test]
fn create_collects_repeated_services() {
    let cli = Cli::try_parse_from([
        "wsp", "create", "alice-dev", "--user", "alice", "--service", "db", "--service", "cache",
    ])
    .unwrap();

    match cli.command {
        Some(RequestCommand::Create {
            name,
            user,
            services,
        }) => {
            assert_eq!(name, "alice-dev");
            assert_eq!(user, "alice");
            assert_eq!(services, vec!["db", "cache"]);
        }
        _ => panic!("expected create"),
    }
}

#[test]
fn create_requires_user() {
    let err = Cli::try_parse_from(["wsp", "create", "alice-dev"])
        .err()
        .unwrap();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
}

#[test]
fn global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["wsp", "list", "-o", "json", "--state-dir", "/tmp/wsp"]).unwrap();
    assert_eq!(cli.output, OutputFormat::Json);
    assert_eq!(cli.state_dir.as_deref(), Some(std::path::Path::new("/tmp/wsp")));
    assert!(matches!(cli.command, Some(RequestCommand::List)));
}

#[test]
fn no_subcommand_parses() {
    let cli = Cli::try_parse_from(["wsp"]).unwrap();
    assert!(cli.command.is_none());
    assert_eq!(cli.output, OutputFormat::Text);
}

#[test]
fn format_error_skips_redundant_chain() {
    let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
    let err = anyhow::Error::new(io).context("write failed: disk full");
    assert_eq!(format_error(&err), "write failed: disk full");
}

#[test]
fn format_error_renders_new_causes() {
    let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
    let err = anyhow::Error::new(io).context("write failed");
    assert_eq!(
        format_error(&err),
        "write failed\n\nCaused by:\n    0: disk full"
    );
}
