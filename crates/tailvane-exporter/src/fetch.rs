//! Status fetching via the local VPN client binary.
//!
//! Each fetch is one independent `tailscale status -json` invocation with its
//! own deadline. No retries happen here; retry policy belongs to callers (the
//! watchdog counts failures, a scrape fails outright).

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use tailvane_core::error::{Result, TailvaneError};
use tailvane_core::status::{decode_status, StatusSnapshot};

/// Deadline for one status command invocation.
pub const STATUS_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of status snapshots.
///
/// The seam between the exporter and the VPN client: the scrape path, the
/// watchdog, and startup all fetch through it, and tests substitute stubs.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetch and decode one fresh snapshot.
    async fn fetch_status(&self) -> Result<StatusSnapshot>;
}

/// Fetches status by running the VPN client binary.
#[derive(Debug, Clone)]
pub struct StatusCommand {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl StatusCommand {
    /// The standard `tailscale status -json` invocation.
    pub fn new() -> Self {
        Self::with_program("tailscale", &["status", "-json"])
    }

    /// Run a different program (tests).
    pub fn with_program(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
            timeout: STATUS_TIMEOUT,
        }
    }

    /// Override the deadline (tests).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for StatusCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StatusSource for StatusCommand {
    async fn fetch_status(&self) -> Result<StatusSnapshot> {
        let run = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();
        let output = tokio::time::timeout(self.timeout, run)
            .await
            .map_err(|_| TailvaneError::FetchTimeout(self.timeout))?
            .map_err(|e| TailvaneError::CommandFailure {
                stderr: format!("spawn {}: {e}", self.program),
            })?;

        // Non-zero exit or any diagnostic output fails the fetch.
        if !output.status.success() || !output.stderr.is_empty() {
            let diag = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(TailvaneError::CommandFailure {
                stderr: if diag.is_empty() {
                    output.status.to_string()
                } else {
                    diag
                },
            });
        }

        decode_status(&output.stdout)
    }
}
