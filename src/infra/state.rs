//! Shared application state and its lifecycle.
//!
//! The entity store is the single shared mutable resource. It lives behind
//! one `RwLock`: mutations take the write guard for their full
//! read-check-write span, readers take the read guard and return clones.
//! State is constructed explicitly at startup and passed by cloning the
//! handle; there are no global singletons.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::errors::AppResult;
use crate::store::{EntityStore, StoreSnapshot};

use super::persistence::SnapshotStore;

/// Shared handle to the entity store
pub type SharedStore = Arc<RwLock<EntityStore>>;

/// Application state handed to services by clone
#[derive(Clone, Debug)]
pub struct AppState {
    store: SharedStore,
}

impl AppState {
    /// Create state over an empty store
    pub fn new() -> Self {
        Self::from_store(EntityStore::new())
    }

    /// Create state over an existing store
    pub fn from_store(store: EntityStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Create state from a persisted snapshot, rebuilding all indexes
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        Self::from_store(EntityStore::from_snapshot(snapshot))
    }

    /// Build state from the persistence collaborator; starts empty when
    /// nothing has been persisted yet.
    pub async fn bootstrap(persistence: &dyn SnapshotStore) -> AppResult<Self> {
        let state = match persistence.load().await? {
            Some(snapshot) => Self::from_snapshot(snapshot),
            None => Self::new(),
        };
        tracing::info!("application state bootstrapped");
        Ok(state)
    }

    /// Hand the current snapshot to the persistence collaborator
    pub async fn persist(&self, persistence: &dyn SnapshotStore) -> AppResult<()> {
        let snapshot = self.snapshot().await;
        persistence.save(&snapshot).await
    }

    /// Consistent full-state copy
    pub async fn snapshot(&self) -> StoreSnapshot {
        self.store.read().await.snapshot()
    }

    /// Shared store handle
    pub fn store(&self) -> &SharedStore {
        &self.store
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
