//! CLI help and version specs

use crate::prelude::*;

#[test]
fn no_subcommand_prints_help() {
    cli()
        .passes()
        .stdout_has("Usage: wsp")
        .stdout_has("create")
        .stdout_has("delete");
}

#[test]
fn version_flag() {
    cli().args(&["--version"]).passes().stdout_has("wsp 0.1.0");
}

#[test]
fn create_help_documents_service_flag() {
    cli()
        .args(&["create", "--help"])
        .passes()
        .stdout_has("--user <USER>")
        .stdout_has("--service <SERVICE>");
}
