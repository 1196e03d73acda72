//! Application state for the web layer.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::catalog::{CsvFileDataset, FileCatalogStore};
use crate::domain::Coordinate;
use crate::recommend::RecommendationEngine;
use crate::session::Session;

/// The engine as deployed: JSON files on disk, CSV dataset on disk.
pub type Engine = RecommendationEngine<FileCatalogStore, CsvFileDataset>;

/// Thread-safe session table, keyed by a caller-chosen session id.
#[derive(Clone, Default)]
pub struct Sessions {
    inner: Arc<RwLock<HashMap<String, Session>>>,
}

impl Sessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a session, if it exists.
    pub async fn get(&self, id: &str) -> Option<Session> {
        let guard = self.inner.read().await;
        guard.get(id).cloned()
    }

    /// Store a location, creating the session if needed.
    pub async fn share_location(&self, id: &str, location: Coordinate) {
        let mut guard = self.inner.write().await;
        guard.entry(id.to_string()).or_default().share_location(location);
    }

    /// End a session. Returns whether it existed.
    pub async fn remove(&self, id: &str) -> bool {
        let mut guard = self.inner.write().await;
        guard.remove(id).is_some()
    }

    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.len()
    }

    pub async fn is_empty(&self) -> bool {
        let guard = self.inner.read().await;
        guard.is_empty()
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Recommendation engine (synchronous; call from a blocking task)
    pub engine: Arc<Engine>,

    /// Per-user sessions
    pub sessions: Sessions,
}

impl AppState {
    /// Create a new app state.
    pub fn new(engine: Engine) -> Self {
        Self {
            engine: Arc::new(engine),
            sessions: Sessions::new(),
        }
    }
}
