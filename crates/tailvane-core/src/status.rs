//! Status document model (JSON).
//!
//! Decoded from the VPN client's `status -json` output. Only the fields the
//! exporter consumes are modeled; everything else in the document is ignored.
//! A snapshot is never mutated after decode; every fetch produces a new one.

use std::collections::HashMap;
use std::net::IpAddr;

use serde::Deserialize;

use crate::error::{Result, TailvaneError};

/// Upper bound on the raw-output snippet carried by decode errors.
const SNIPPET_MAX_BYTES: usize = 256;

/// One full status snapshot: the self node plus all known peers.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusSnapshot {
    /// Client version string.
    #[serde(rename = "Version", default)]
    pub version: String,
    /// Backend state, e.g. "Running".
    #[serde(rename = "BackendState", default)]
    pub backend_state: String,
    /// The host's own node.
    #[serde(rename = "Self")]
    pub self_node: NodeStatus,
    /// Peers keyed by node key.
    #[serde(rename = "Peer", default)]
    pub peers: HashMap<String, PeerStatus>,
}

/// Per-node fields shared by self and peers.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeStatus {
    /// Stable node identifier.
    #[serde(rename = "ID", default)]
    pub id: String,
    /// Host name as registered on the tailnet.
    #[serde(rename = "HostName", default)]
    pub host_name: String,
    /// Fully qualified MagicDNS name.
    #[serde(rename = "DNSName", default)]
    pub dns_name: String,
    /// Tailnet addresses; the first entry is the primary address.
    #[serde(rename = "TailscaleIPs", default)]
    pub tailscale_ips: Vec<String>,
    /// Cumulative bytes received from this node.
    #[serde(rename = "RxBytes", default)]
    pub rx_bytes: u64,
    /// Cumulative bytes transmitted to this node.
    #[serde(rename = "TxBytes", default)]
    pub tx_bytes: u64,
}

/// A peer node: the shared fields plus the owning user.
#[derive(Debug, Clone, Deserialize)]
pub struct PeerStatus {
    #[serde(flatten)]
    pub node: NodeStatus,
    /// Identifier of the user the peer belongs to.
    #[serde(rename = "UserID", default)]
    pub user_id: i64,
}

impl NodeStatus {
    /// DNS name truncated at the first `.` (the whole name if it has none).
    pub fn given_name(&self) -> &str {
        self.dns_name
            .split_once('.')
            .map_or(self.dns_name.as_str(), |(head, _)| head)
    }

    /// First tailnet address, as reported.
    pub fn primary_address(&self) -> Result<&str> {
        self.tailscale_ips
            .first()
            .map(String::as_str)
            .ok_or_else(|| TailvaneError::MissingAddress {
                node: self.host_name.clone(),
            })
    }

    /// First tailnet address, parsed.
    pub fn primary_ip(&self) -> Result<IpAddr> {
        let raw = self.primary_address()?;
        raw.parse().map_err(|e| TailvaneError::DecodeFailure {
            reason: format!("bad tailnet address for {}: {e}", self.host_name),
            snippet: raw.to_string(),
        })
    }
}

/// Decode one raw status document.
pub fn decode_status(raw: &[u8]) -> Result<StatusSnapshot> {
    serde_json::from_slice(raw).map_err(|e| TailvaneError::DecodeFailure {
        reason: e.to_string(),
        snippet: snippet(raw),
    })
}

/// Bounded, lossy preview of raw output for error reporting.
fn snippet(raw: &[u8]) -> String {
    let end = raw.len().min(SNIPPET_MAX_BYTES);
    String::from_utf8_lossy(&raw[..end]).into_owned()
}
