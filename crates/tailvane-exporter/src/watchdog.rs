//! Watchdog driver: periodic identity checks against the bound address.

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use tailvane_core::error::TailvaneError;
use tailvane_core::watchdog::{AddressWatchdog, Verdict};

use crate::fetch::StatusSource;

/// Interval between identity checks.
pub const WATCH_INTERVAL: Duration = Duration::from_secs(20);

/// Tick until the watchdog turns fatal, then return the fatal error.
///
/// Never exits the process itself; the caller decides what to do with the
/// returned error. Each tick performs its own bounded fetch, so a hung fetch
/// blocks only this loop and only up to the fetch deadline.
pub async fn run(
    source: Arc<dyn StatusSource>,
    bound: IpAddr,
    interval: Duration,
) -> TailvaneError {
    let mut watchdog = AddressWatchdog::new(bound);
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // `interval` fires immediately on the first tick; consume it so checks
    // start one full interval after boot.
    ticker.tick().await;

    loop {
        ticker.tick().await;
        let observed = source
            .fetch_status()
            .await
            .and_then(|status| status.self_node.primary_ip());
        if let Verdict::Fatal(err) = watchdog.observe(observed) {
            return err;
        }
    }
}
