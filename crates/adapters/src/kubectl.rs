// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Thin `kubectl` client shared by the cluster-backed stores

use crate::error::StoreError;
use crate::subprocess::{run_with_input, run_with_timeout, KUBECTL_TIMEOUT};
use serde_json::Value;
use std::path::PathBuf;
use std::process::Output;
use std::time::Duration;
use tokio::process::Command;

/// Invokes `kubectl` with JSON in and JSON out.
#[derive(Debug, Clone)]
pub struct Kubectl {
    binary: PathBuf,
    context: Option<String>,
    timeout: Duration,
}

impl Default for Kubectl {
    fn default() -> Self {
        Self::new("kubectl")
    }
}

impl Kubectl {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            context: None,
            timeout: KUBECTL_TIMEOUT,
        }
    }

    /// Use a named kubeconfig context instead of the current one.
    pub fn with_context(mut self, context: Option<String>) -> Self {
        self.context = context;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.kill_on_drop(true);
        if let Some(context) = &self.context {
            cmd.arg("--context").arg(context);
        }
        cmd
    }

    /// `kubectl create -f - -o json` with `manifest` on stdin.
    ///
    /// Returns the created object as the API server reports it.
    pub async fn create(&self, manifest: &Value) -> Result<Value, StoreError> {
        let object = describe(manifest);
        let input = serde_json::to_vec(manifest)
            .map_err(|e| StoreError::InvalidResponse(format!("unserializable manifest: {}", e)))?;

        let mut cmd = self.command();
        cmd.args(["create", "-f", "-", "-o", "json"]);
        let output = run_with_input(cmd, &input, self.timeout, "kubectl create")
            .await
            .map_err(StoreError::CommandFailed)?;

        if !output.status.success() {
            return Err(classify_failure(&stderr_of(&output), &object));
        }
        parse_json(&output.stdout)
    }

    /// `kubectl get <args> -o json`.
    ///
    /// Returns `Ok(None)` when the object does not exist.
    pub async fn get(&self, args: &[&str]) -> Result<Option<Value>, StoreError> {
        let object = args.join(" ");
        let mut cmd = self.command();
        cmd.arg("get").args(args).args(["-o", "json"]);
        let output = run_with_timeout(cmd, self.timeout, "kubectl get")
            .await
            .map_err(StoreError::CommandFailed)?;

        if !output.status.success() {
            return match classify_failure(&stderr_of(&output), &object) {
                StoreError::NotFound(_) => Ok(None),
                other => Err(other),
            };
        }
        parse_json(&output.stdout).map(Some)
    }
}

/// Map kubectl's stderr onto a [`StoreError`].
///
/// kubectl prints the API status reason (`AlreadyExists`, `NotFound`) in
/// its error line; older servers phrase a duplicate as prose instead.
/// Absence is only taken from the `(NotFound)` reason: client-side errors
/// also say "not found" (a missing kubeconfig, an unknown resource type)
/// and must not read as an empty result.
pub fn classify_failure(stderr: &str, object: &str) -> StoreError {
    let lower = stderr.to_ascii_lowercase();
    if stderr.contains("AlreadyExists") || lower.contains("already exists") {
        StoreError::AlreadyExists(object.to_string())
    } else if stderr.contains("(NotFound)") {
        StoreError::NotFound(object.to_string())
    } else {
        StoreError::CommandFailed(stderr.trim().to_string())
    }
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn parse_json(stdout: &[u8]) -> Result<Value, StoreError> {
    serde_json::from_slice(stdout)
        .map_err(|e| StoreError::InvalidResponse(format!("kubectl returned invalid JSON: {}", e)))
}

/// `kind/name` of a manifest, for error messages.
fn describe(manifest: &Value) -> String {
    let kind = manifest["kind"].as_str().unwrap_or("object");
    let name = manifest["metadata"]["name"].as_str().unwrap_or("<unnamed>");
    format!("{}/{}", kind.to_ascii_lowercase(), name)
}

/// `metadata.name` of an object returned by the API server.
pub(crate) fn object_name(object: &Value) -> Result<String, StoreError> {
    object["metadata"]["name"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| StoreError::InvalidResponse("object has no metadata.name".to_string()))
}

#[cfg(test)]
#[path = "kubectl_tests.rs"]
pub(crate) mod tests;
