//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for driving `wsp` and `wspd` against an isolated
//! state directory and a scripted `kubectl`.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};

// Spec polling timeouts
pub const SPEC_POLL_INTERVAL_MS: u64 = 10;
pub const SPEC_WAIT_MAX_MS: u64 = 2000;
/// The daemon shells out several times per request, so provisioning waits
/// get a longer budget.
pub const SPEC_PROVISION_MAX_MS: u64 = 10_000;

/// Returns the path to a binary, checking llvm-cov target directory first
/// and otherwise resolving it next to the test executable.
fn binary_path(name: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let llvm_cov_path = manifest_dir.join("target/llvm-cov-target/debug").join(name);
    if llvm_cov_path.exists() {
        return llvm_cov_path;
    }

    assert_cmd::cargo::cargo_bin(name)
}

pub fn wsp_binary() -> PathBuf {
    binary_path("wsp")
}

pub fn wspd_binary() -> PathBuf {
    binary_path("wspd")
}

/// Create a CLI builder for wsp commands
pub fn cli() -> CliBuilder {
    CliBuilder::new()
}

/// High-level CLI builder for fluent test assertions
pub struct CliBuilder {
    args: Vec<String>,
    envs: Vec<(String, String)>,
}

impl CliBuilder {
    fn new() -> Self {
        Self {
            args: Vec::new(),
            envs: vec![("NO_COLOR".into(), "1".into())],
        }
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set environment variable
    pub fn env(mut self, key: &str, value: impl AsRef<Path>) -> Self {
        self.envs.push((
            key.to_string(),
            value.as_ref().to_string_lossy().to_string(),
        ));
        self
    }

    /// Build the command without running it
    pub fn command(self) -> Command {
        let mut cmd = Command::new(wsp_binary());
        cmd.args(&self.args);

        // A developer's own state dir must never leak into a spec
        cmd.env_remove("WSP_STATE_DIR");
        cmd.env_remove("COLOR");

        for (key, value) in self.envs {
            cmd.env(key, value);
        }
        cmd
    }

    /// Run and expect success (exit code 0)
    pub fn passes(self) -> RunAssert {
        let output = self.command().output().expect("command should run");
        assert!(
            output.status.success(),
            "expected command to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    /// Run and expect failure (non-zero exit code)
    pub fn fails(self) -> RunAssert {
        let output = self.command().output().expect("command should run");
        assert!(
            !output.status.success(),
            "expected command to fail, but it passed\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }
}

/// Result of a CLI run for chaining assertions
pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout())
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}): {}", self.stdout()))
    }

    /// Assert stdout equals expected exactly (with diff on failure).
    /// **Prefer this for format specs** - catches format regressions.
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = self.stdout();
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    /// Assert stdout contains substring.
    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(expected),
            "stdout does not contain '{}'\nstdout: {}",
            expected,
            stdout
        );
        self
    }

    /// Assert stderr contains substring.
    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            stderr.contains(expected),
            "stderr does not contain '{}'\nstderr: {}",
            expected,
            stderr
        );
        self
    }
}

// =============================================================================
// Polling
// =============================================================================

/// Poll a condition until it returns true or timeout is reached.
pub fn wait_for<F>(timeout_ms: u64, mut condition: F) -> bool
where
    F: FnMut() -> bool,
{
    let start = std::time::Instant::now();
    let timeout = std::time::Duration::from_millis(timeout_ms);
    let poll_interval = std::time::Duration::from_millis(SPEC_POLL_INTERVAL_MS);

    while start.elapsed() < timeout {
        if condition() {
            return true;
        }
        std::thread::sleep(poll_interval);
    }
    false
}

// =============================================================================
// Cluster
// =============================================================================

/// Scripted `kubectl` standing in for a cluster that offers the `db` and
/// `cache` classes and reports every instance ready.
///
/// `create` echoes the manifest back, which is what the API server returns
/// for a successful create.
pub const READY_CLUSTER: &str = r#"#!/bin/sh
case "$1" in
  create)
    cat
    ;;
  get)
    case "$2" in
      clusterserviceclasses)
        printf '{"items":[{"metadata":{"name":"class-db"},"spec":{"externalName":"db"}},{"metadata":{"name":"class-cache"},"spec":{"externalName":"cache"}}]}'
        ;;
      serviceinstance)
        printf '{"metadata":{"name":"%s"},"status":{"conditions":[{"type":"Ready","status":"True"}]}}' "$3"
        ;;
      *)
        echo "Error from server (NotFound): $2 \"$3\" not found" >&2
        exit 1
        ;;
    esac
    ;;
esac
"#;

// =============================================================================
// Workspace
// =============================================================================

/// Isolated state directory plus a scripted kubectl, with helpers to run
/// `wsp` and `wspd` against them.
pub struct Workspace {
    state_dir: tempfile::TempDir,
    bin_dir: tempfile::TempDir,
    daemon: Option<Child>,
}

impl Workspace {
    pub fn empty() -> Self {
        let ws = Self {
            state_dir: tempfile::tempdir().unwrap(),
            bin_dir: tempfile::tempdir().unwrap(),
            daemon: None,
        };
        ws.cluster(READY_CLUSTER);
        ws
    }

    /// Replace the scripted kubectl.
    pub fn cluster(&self, script: &str) {
        let path = self.kubectl_path();
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    pub fn kubectl_path(&self) -> PathBuf {
        self.bin_dir.path().join("kubectl")
    }

    pub fn state_path(&self) -> &Path {
        self.state_dir.path()
    }

    pub fn records_path(&self) -> PathBuf {
        self.state_path().join("records")
    }

    /// Run wsp against this workspace's state directory
    pub fn wsp(&self) -> CliBuilder {
        cli().env("WSP_STATE_DIR", self.state_path())
    }

    /// `wspd` invocation for this workspace, not yet spawned.
    pub fn wspd_command(&self) -> Command {
        let mut cmd = Command::new(wspd_binary());
        cmd.arg("--state-dir")
            .arg(self.state_path())
            .arg("--kubectl")
            .arg(self.kubectl_path())
            .arg("--resync")
            .arg("1")
            .env_remove("RUST_LOG")
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        cmd
    }

    /// Start the daemon and wait for it to take the lock.
    pub fn start_daemon(&mut self) {
        let child = self
            .wspd_command()
            .stderr(Stdio::null())
            .spawn()
            .expect("wspd should start");
        self.daemon = Some(child);
        let pid_file = self.state_path().join("daemon.pid");
        let started = wait_for(SPEC_WAIT_MAX_MS, || {
            std::fs::read_to_string(&pid_file).is_ok_and(|s| !s.trim().is_empty())
        });
        assert!(started, "daemon never wrote its pid\n{}", self.daemon_log());
    }

    /// Send SIGTERM and wait for the daemon to exit.
    pub fn stop_daemon(&mut self) -> std::process::ExitStatus {
        let mut child = self.daemon.take().expect("daemon should be running");
        Command::new("kill")
            .args(["-TERM", &child.id().to_string()])
            .status()
            .unwrap();
        child.wait().unwrap()
    }

    /// Phase of a request as reported by `wsp show`.
    pub fn phase_of(&self, name: &str) -> String {
        let shown = self.wsp().args(&["show", name]).passes().json();
        shown["status"]["phase"].as_str().unwrap_or("").to_string()
    }

    /// Read the daemon log file contents (for debugging test failures)
    pub fn daemon_log(&self) -> String {
        std::fs::read_to_string(self.state_path().join("daemon.log"))
            .unwrap_or_else(|_| "(no daemon log)".to_string())
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if let Some(mut child) = self.daemon.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}
