//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate the domain entities and the shared store to fulfill
//! the three portals' use cases. They depend on abstractions (traits) for
//! dependency inversion; every mutation validates its input first and runs
//! under the store's write guard.

mod admin_service;
pub mod container;
mod rewards_service;
mod teaching_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use admin_service::{AdminManager, AdminService};
pub use rewards_service::{RewardsManager, RewardsService};
pub use teaching_service::{TeachingManager, TeachingService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
