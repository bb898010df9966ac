//! Service Container - Centralized service access.
//!
//! Provides one place to construct and hand out the application services,
//! all sharing the same store and acting caller.

use std::sync::Arc;

use crate::domain::Actor;
use crate::infra::AppState;

use super::{
    AdminManager, AdminService, RewardsManager, RewardsService, TeachingManager, TeachingService,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get admin service (rosters, payments, shop)
    fn admin(&self) -> Arc<dyn AdminService>;

    /// Get teaching service (groups, lessons, attendance, points, marks)
    fn teaching(&self) -> Arc<dyn TeachingService>;

    /// Get rewards service (points ledger, spending)
    fn rewards(&self) -> Arc<dyn RewardsService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    admin_service: Arc<dyn AdminService>,
    teaching_service: Arc<dyn TeachingService>,
    rewards_service: Arc<dyn RewardsService>,
}

impl Services {
    /// Create a new service container from already-built services
    pub fn new(
        admin_service: Arc<dyn AdminService>,
        teaching_service: Arc<dyn TeachingService>,
        rewards_service: Arc<dyn RewardsService>,
    ) -> Self {
        Self {
            admin_service,
            teaching_service,
            rewards_service,
        }
    }

    /// Create a service container over shared state for the given caller
    pub fn from_state(state: AppState, actor: Actor) -> Self {
        Self {
            admin_service: Arc::new(AdminManager::new(state.clone(), actor.clone())),
            teaching_service: Arc::new(TeachingManager::new(state.clone(), actor.clone())),
            rewards_service: Arc::new(RewardsManager::new(state, actor)),
        }
    }
}

impl ServiceContainer for Services {
    fn admin(&self) -> Arc<dyn AdminService> {
        self.admin_service.clone()
    }

    fn teaching(&self) -> Arc<dyn TeachingService> {
        self.teaching_service.clone()
    }

    fn rewards(&self) -> Arc<dyn RewardsService> {
        self.rewards_service.clone()
    }
}
