//! Flattening a status snapshot into labeled per-peer samples.
//!
//! Every sample carries the same 8 labels in a fixed order: four derived once
//! from the self node, four from the peer. Missing source data (a node with
//! no addresses) fails the whole flattening rather than producing a partial
//! label set.

use crate::error::Result;
use crate::status::StatusSnapshot;

/// Label names, in emission order.
pub const PEER_LABEL_NAMES: [&str; 8] = [
    "id",
    "name",
    "given_name",
    "ip",
    "peer_name",
    "peer_given_name",
    "peer_ip",
    "peer_user_id",
];

/// Ordered label values for one sample; mirrors [`PEER_LABEL_NAMES`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSet {
    /// Self node identifier.
    pub id: String,
    /// Self host name.
    pub name: String,
    /// First segment of the self DNS name.
    pub given_name: String,
    /// Primary self address.
    pub ip: String,
    /// Peer host name.
    pub peer_name: String,
    /// First segment of the peer DNS name.
    pub peer_given_name: String,
    /// Primary peer address.
    pub peer_ip: String,
    /// Owning user of the peer, stringified.
    pub peer_user_id: String,
}

impl LabelSet {
    /// Values in [`PEER_LABEL_NAMES`] order.
    pub fn values(&self) -> [&str; 8] {
        [
            &self.id,
            &self.name,
            &self.given_name,
            &self.ip,
            &self.peer_name,
            &self.peer_given_name,
            &self.peer_ip,
            &self.peer_user_id,
        ]
    }
}

/// Byte counters for one peer plus its full label set.
#[derive(Debug, Clone)]
pub struct PeerSample {
    pub labels: LabelSet,
    pub rx_bytes: u64,
    pub tx_bytes: u64,
}

/// Flatten a snapshot into one sample per peer.
///
/// Iteration order over peers is unspecified; consumers must key on labels,
/// not on emission order.
pub fn peer_samples(status: &StatusSnapshot) -> Result<Vec<PeerSample>> {
    let this = &status.self_node;

    // Constant prefix, derived once and cloned into every sample.
    let id = this.id.clone();
    let name = this.host_name.clone();
    let given_name = this.given_name().to_string();
    let ip = this.primary_address()?.to_string();

    let mut samples = Vec::with_capacity(status.peers.len());
    for peer in status.peers.values() {
        samples.push(PeerSample {
            labels: LabelSet {
                id: id.clone(),
                name: name.clone(),
                given_name: given_name.clone(),
                ip: ip.clone(),
                peer_name: peer.node.host_name.clone(),
                peer_given_name: peer.node.given_name().to_string(),
                peer_ip: peer.node.primary_address()?.to_string(),
                peer_user_id: peer.user_id.to_string(),
            },
            rx_bytes: peer.node.rx_bytes,
            tx_bytes: peer.node.tx_bytes,
        });
    }
    Ok(samples)
}
