//! Infrastructure layer - shared state and external collaborator contracts.
//!
//! This module owns the explicit store lifecycle (construct on startup,
//! snapshot on demand) and the contract the out-of-scope persistence
//! collaborator must fulfill.

pub mod persistence;
pub mod state;

pub use persistence::SnapshotStore;
pub use state::{AppState, SharedStore};

// Export mock for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use persistence::MockSnapshotStore;
