//! tailvane core: status document model, label derivation, and the
//! address-stability watchdog.
//!
//! This crate holds the runtime-free half of the exporter: decoding the VPN
//! client's status document, flattening it into labeled per-peer samples, and
//! the watchdog state machine that decides when the process can no longer
//! serve under its advertised address. It carries no process, HTTP, or async
//! dependencies so the exporter and tests can drive it directly.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `TailvaneError`/`Result` so the
//! exporter process does not crash on malformed status output.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod labels;
pub mod status;
pub mod watchdog;

/// Shared result type.
pub use error::{Result, TailvaneError};
