//! Shared application state for the exporter's HTTP handlers.
//!
//! Handlers share only the status source; every scrape fetches for itself, so
//! there is no snapshot cache or per-scrape state to hold here.

use std::sync::Arc;

use crate::fetch::StatusSource;

/// Cloneable handle handed to every handler.
#[derive(Clone)]
pub struct AppState {
    source: Arc<dyn StatusSource>,
}

impl AppState {
    pub fn new(source: Arc<dyn StatusSource>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &dyn StatusSource {
        self.source.as_ref()
    }
}
