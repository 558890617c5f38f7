//! Server application state

use std::sync::Arc;

use gaf_core::ArtifactStore;

/// Application state shared across handlers
///
/// Holds the process-wide artifact registry; handlers refresh through it
/// before reading.
#[derive(Clone)]
pub struct AppState {
    store: Arc<ArtifactStore>,
}

impl AppState {
    pub fn new(store: Arc<ArtifactStore>) -> Self {
        Self { store }
    }

    /// Get a reference to the artifact registry
    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }
}
