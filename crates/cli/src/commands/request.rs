// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `wsp create|list|show|delete` - workspace request management
//!
//! These commands only touch the record directory. Provisioning happens
//! when `wspd` picks the change up.

use std::io::Write;

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use wsp_core::{RequestId, RequestSpec, WorkspaceRequest};
use wsp_storage::{RecordStore, StoreError};

use crate::output::{write_json, OutputFormat};
use crate::table::RequestTable;

#[derive(Subcommand)]
pub enum RequestCommand {
    /// Submit a new workspace request
    Create {
        /// Request name (lowercase letters, digits, '-' and '.')
        name: String,
        /// User the workspace is provisioned for
        #[arg(long)]
        user: String,
        /// Service to provision from the catalog (repeatable)
        #[arg(long = "service", value_name = "SERVICE")]
        services: Vec<String>,
    },
    /// List all requests
    List,
    /// Show a request as JSON
    Show {
        /// Request name
        name: String,
    },
    /// Delete a request record (provisioned objects are left in place)
    Delete {
        /// Request name
        name: String,
    },
}

pub fn handle(
    command: RequestCommand,
    store: &impl RecordStore,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        RequestCommand::Create {
            name,
            user,
            services,
        } => create(store, name, user, services, format, out),
        RequestCommand::List => list(store, format, out),
        RequestCommand::Show { name } => show(store, &RequestId::new(name), out),
        RequestCommand::Delete { name } => delete(store, &RequestId::new(name), format, out),
    }
}

fn create(
    store: &impl RecordStore,
    name: String,
    user: String,
    services: Vec<String>,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let spec = RequestSpec {
        user_name: user,
        required_services: services,
    };
    spec.validate().context("invalid request")?;

    let record = match store.create(WorkspaceRequest::new(name, spec)) {
        Ok(record) => record,
        Err(StoreError::AlreadyExists(name)) => bail!("request already exists: {}", name),
        Err(e) => return Err(e.into()),
    };

    match format {
        OutputFormat::Text => {
            let services: Vec<String> = record.spec.services().into_iter().collect();
            writeln!(
                out,
                "Created request {} for user {} (services: {})",
                record.name(),
                record.spec.user(),
                if services.is_empty() {
                    "none".to_string()
                } else {
                    services.join(", ")
                }
            )?;
        }
        OutputFormat::Json => write_json(out, &record)?,
    }
    Ok(())
}

fn list(store: &impl RecordStore, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    let records = store.list()?;

    match format {
        OutputFormat::Text => {
            if records.is_empty() {
                writeln!(out, "No requests")?;
                return Ok(());
            }
            RequestTable::new(&records).render(out)?;
        }
        OutputFormat::Json => write_json(out, &records)?,
    }
    Ok(())
}

/// Always JSON: the record is the interface.
fn show(store: &impl RecordStore, name: &RequestId, out: &mut impl Write) -> Result<()> {
    match store.get(name)? {
        Some(record) => write_json(out, &record),
        None => bail!("request not found: {}", name),
    }
}

fn delete(
    store: &impl RecordStore,
    name: &RequestId,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    match store.delete(name) {
        Ok(()) => {}
        Err(StoreError::NotFound(_)) => bail!("request not found: {}", name),
        Err(e) => return Err(e.into()),
    }

    match format {
        OutputFormat::Text => writeln!(out, "Deleted request {}", name)?,
        OutputFormat::Json => write_json(out, &serde_json::json!({ "deleted": name }))?,
    }
    Ok(())
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
