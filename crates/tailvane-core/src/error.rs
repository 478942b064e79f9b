//! Shared error type across tailvane crates.

use std::net::IpAddr;
use std::time::Duration;

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, TailvaneError>;

/// Unified error type used by core and exporter.
///
/// Fatality is contextual: during a scrape, the first four variants fail only
/// that scrape; in the watchdog they count toward the failure budget.
/// `IdentityDrift` and `FetchExhaustion` are produced only by the watchdog and
/// are always fatal to the process.
#[derive(Debug, Clone, Error)]
pub enum TailvaneError {
    /// The status command did not complete within its deadline.
    #[error("status command timed out after {0:?}")]
    FetchTimeout(Duration),
    /// The status command could not be run, exited non-zero, or wrote diagnostics.
    #[error("status command failed: {stderr}")]
    CommandFailure { stderr: String },
    /// The status document could not be decoded.
    #[error("status decode failed: {reason}; output: {snippet}")]
    DecodeFailure { reason: String, snippet: String },
    /// A node reported no tailnet addresses.
    #[error("node {node} reports no tailnet addresses")]
    MissingAddress { node: String },
    /// The host's self address no longer matches the bound address.
    #[error("self address changed: bound {bound}, observed {observed}")]
    IdentityDrift { bound: IpAddr, observed: IpAddr },
    /// The watchdog exhausted its consecutive-failure budget.
    #[error("status fetch failed {failures} consecutive times; last: {last_error}")]
    FetchExhaustion { failures: u32, last_error: String },
    /// Internal fault (exposition encoding, wiring).
    #[error("internal: {0}")]
    Internal(String),
}
