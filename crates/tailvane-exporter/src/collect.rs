//! Per-scrape metric collection.
//!
//! Every scrape performs its own fetch and renders into a fresh registry;
//! nothing is cached between scrapes and no counter state survives one. A
//! fetch or label-derivation error fails the scrape.

use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

use tailvane_core::error::{Result, TailvaneError};
use tailvane_core::labels::{peer_samples, PeerSample, PEER_LABEL_NAMES};

use crate::fetch::StatusSource;

/// Counter family: cumulative bytes received from each peer.
pub const PEER_RX_NAME: &str = "tailscale_peer_rx";
/// Counter family: cumulative bytes transmitted to each peer.
pub const PEER_TX_NAME: &str = "tailscale_peer_tx";

/// Run one full collection: fetch, flatten, render.
pub async fn scrape(source: &dyn StatusSource) -> Result<String> {
    let status = source.fetch_status().await?;
    let samples = peer_samples(&status)?;
    render(&samples)
}

/// Render samples into Prometheus text exposition format.
///
/// Counters carry the raw cumulative values reported by the source; no rate
/// computation or resetting happens here.
pub fn render(samples: &[PeerSample]) -> Result<String> {
    let registry = Registry::new();
    let rx = register_family(
        &registry,
        PEER_RX_NAME,
        "Cumulative bytes received from the peer.",
    )?;
    let tx = register_family(
        &registry,
        PEER_TX_NAME,
        "Cumulative bytes transmitted to the peer.",
    )?;

    for sample in samples {
        let values = sample.labels.values();
        rx.with_label_values(&values).inc_by(sample.rx_bytes);
        tx.with_label_values(&values).inc_by(sample.tx_bytes);
    }

    let mut buf = Vec::new();
    TextEncoder::new()
        .encode(&registry.gather(), &mut buf)
        .map_err(|e| TailvaneError::Internal(format!("metrics encode failed: {e}")))?;
    String::from_utf8(buf).map_err(|e| TailvaneError::Internal(format!("metrics not utf-8: {e}")))
}

fn register_family(registry: &Registry, name: &str, help: &str) -> Result<IntCounterVec> {
    let family = IntCounterVec::new(Opts::new(name, help), &PEER_LABEL_NAMES)
        .map_err(|e| TailvaneError::Internal(format!("bad metric family {name}: {e}")))?;
    registry
        .register(Box::new(family.clone()))
        .map_err(|e| TailvaneError::Internal(format!("register {name} failed: {e}")))?;
    Ok(family)
}
