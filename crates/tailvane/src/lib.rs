//! Top-level facade crate for tailvane.
//!
//! Re-exports the core types and the exporter library so users can depend on a single crate.

pub mod core {
    pub use tailvane_core::*;
}

pub mod exporter {
    pub use tailvane_exporter::*;
}
