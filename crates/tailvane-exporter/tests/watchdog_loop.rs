//! Watchdog driver tests with scripted fetch sequences.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use tailvane_core::error::{Result, TailvaneError};
use tailvane_core::status::{decode_status, StatusSnapshot};
use tailvane_core::watchdog::FAILURE_THRESHOLD;
use tailvane_exporter::fetch::StatusSource;
use tailvane_exporter::watchdog;

const TICK: Duration = Duration::from_millis(5);

fn snapshot_with_ip(ip: &str) -> StatusSnapshot {
    decode_status(format!(r#"{{"Self":{{"HostName":"h","TailscaleIPs":["{ip}"]}}}}"#).as_bytes())
        .unwrap()
}

fn fetch_err() -> TailvaneError {
    TailvaneError::CommandFailure {
        stderr: "backend stopped".into(),
    }
}

/// Replays a fixed sequence of fetch results, then errors.
struct ScriptedSource {
    responses: Mutex<VecDeque<Result<StatusSnapshot>>>,
}

impl ScriptedSource {
    fn new(responses: Vec<Result<StatusSnapshot>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
        })
    }
}

#[async_trait]
impl StatusSource for ScriptedSource {
    async fn fetch_status(&self) -> Result<StatusSnapshot> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(fetch_err()))
    }
}

#[tokio::test]
async fn drift_returns_identity_drift() {
    let source = ScriptedSource::new(vec![
        Ok(snapshot_with_ip("100.64.0.1")),
        Ok(snapshot_with_ip("100.64.0.9")),
    ]);
    let fatal = watchdog::run(source, "100.64.0.1".parse().unwrap(), TICK).await;
    match fatal {
        TailvaneError::IdentityDrift { bound, observed } => {
            assert_eq!(bound.to_string(), "100.64.0.1");
            assert_eq!(observed.to_string(), "100.64.0.9");
        }
        other => panic!("unexpected fatal: {other:?}"),
    }
}

#[tokio::test]
async fn exhaustion_after_consecutive_failures() {
    let source = ScriptedSource::new(vec![]);
    let fatal = watchdog::run(source, "100.64.0.1".parse().unwrap(), TICK).await;
    match fatal {
        TailvaneError::FetchExhaustion { failures, .. } => {
            assert_eq!(failures, FAILURE_THRESHOLD);
        }
        other => panic!("unexpected fatal: {other:?}"),
    }
}

#[tokio::test]
async fn recovery_before_threshold_keeps_running() {
    // 19 failures, one recovery, then a drift to force the loop to return.
    let mut responses: Vec<Result<StatusSnapshot>> = Vec::new();
    for _ in 0..(FAILURE_THRESHOLD - 1) {
        responses.push(Err(fetch_err()));
    }
    responses.push(Ok(snapshot_with_ip("100.64.0.1")));
    responses.push(Ok(snapshot_with_ip("100.64.0.9")));

    let source = ScriptedSource::new(responses);
    let fatal = watchdog::run(source, "100.64.0.1".parse().unwrap(), TICK).await;
    assert!(matches!(fatal, TailvaneError::IdentityDrift { .. }));
}

#[tokio::test]
async fn stable_address_never_terminates() {
    let responses = vec![Ok(snapshot_with_ip("100.64.0.1")); 64];
    let source = ScriptedSource::new(responses);
    let run = watchdog::run(source, "100.64.0.1".parse().unwrap(), TICK);
    // The loop has no fatal to return; it must still be ticking when we stop waiting.
    let waited = tokio::time::timeout(Duration::from_millis(100), run).await;
    assert!(waited.is_err());
}

#[tokio::test]
async fn unparsable_self_address_counts_as_failure() {
    let source = ScriptedSource::new(vec![
        Ok(snapshot_with_ip("not-an-address")),
        Ok(snapshot_with_ip("100.64.0.9")),
    ]);
    // First tick degrades (bad address), second drifts fatally.
    let fatal = watchdog::run(source, "100.64.0.1".parse().unwrap(), TICK).await;
    assert!(matches!(fatal, TailvaneError::IdentityDrift { .. }));
}
