//! tailvane exporter library.
//!
//! Wires the status fetcher, per-scrape collector, HTTP endpoints, and the
//! watchdog driver into the exporter process. Consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod collect;
pub mod fetch;
pub mod ops;
pub mod router;
pub mod watchdog;
