//! Persistence collaborator contract.
//!
//! The core makes no durability guarantee itself; an external collaborator
//! loads a full snapshot at startup and saves one on demand. No storage
//! format is assumed here.

use async_trait::async_trait;

use crate::errors::AppResult;
use crate::store::StoreSnapshot;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Contract the external persistence collaborator must fulfill.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Load the persisted snapshot, if any exists yet
    async fn load(&self) -> AppResult<Option<StoreSnapshot>>;

    /// Persist the given snapshot
    async fn save(&self, snapshot: &StoreSnapshot) -> AppResult<()>;
}
