//! Rewards service - the student portal's view of the points ledger.
//!
//! Balances are always derived from the ledger; earning and spending append
//! entries, never rewrite them. Spending checks the balance and appends
//! under one write-lock acquisition, so concurrent spends cannot interleave
//! between the read and the write.

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::config::MIN_SPEND_AMOUNT;
use crate::domain::{Actor, CreatePointEntry, PointEntry, PointHistoryEntry};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::AppState;
use crate::metrics;

/// Rewards service trait for dependency injection.
#[async_trait]
pub trait RewardsService: Send + Sync {
    /// Current balance: signed sum of the student's ledger entries
    async fn total_points(&self, student_id: Uuid) -> AppResult<i64>;

    /// Append a positive ledger entry
    async fn earn_points(&self, student_id: Uuid, points: i64, reason: &str)
        -> AppResult<PointEntry>;

    /// Spend points on an item. Fails with `InsufficientPoints` (and no
    /// mutation) when the balance does not cover the amount.
    async fn spend_points(&self, student_id: Uuid, amount: i64, item: &str)
        -> AppResult<PointEntry>;

    /// The student's ledger projected as earned/spent history, newest first
    async fn history(&self, student_id: Uuid) -> AppResult<Vec<PointHistoryEntry>>;
}

/// Concrete implementation of RewardsService over the shared store.
pub struct RewardsManager {
    state: AppState,
    actor: Actor,
}

impl RewardsManager {
    /// Create a new rewards service acting on behalf of the given caller
    pub fn new(state: AppState, actor: Actor) -> Self {
        Self { state, actor }
    }
}

#[async_trait]
impl RewardsService for RewardsManager {
    async fn total_points(&self, student_id: Uuid) -> AppResult<i64> {
        let store = self.state.store().read().await;
        Ok(metrics::total_points(&store, student_id))
    }

    async fn earn_points(
        &self,
        student_id: Uuid,
        points: i64,
        reason: &str,
    ) -> AppResult<PointEntry> {
        if points <= 0 {
            return Err(AppError::validation("Earned points must be positive"));
        }
        if reason.is_empty() {
            return Err(AppError::validation("Reason is required"));
        }

        let mut store = self.state.store().write().await;
        let student = store.student(student_id).ok_or_not_found()?;
        let entry = store.append_points(PointEntry::new(CreatePointEntry {
            student_id,
            group_id: student.group_id,
            points,
            reason: reason.to_string(),
            date: Utc::now().date_naive(),
        }));
        tracing::info!(student_id = %student_id, points, actor = %self.actor.id, "points earned");
        Ok(entry)
    }

    async fn spend_points(
        &self,
        student_id: Uuid,
        amount: i64,
        item: &str,
    ) -> AppResult<PointEntry> {
        if amount < MIN_SPEND_AMOUNT {
            return Err(AppError::validation("Spend amount must be positive"));
        }
        if item.is_empty() {
            return Err(AppError::validation("Item is required"));
        }

        // balance check and append happen under the same write guard
        let mut store = self.state.store().write().await;
        let student = store.student(student_id).ok_or_not_found()?;
        let available = metrics::total_points(&store, student_id);
        if amount > available {
            return Err(AppError::InsufficientPoints {
                requested: amount,
                available,
            });
        }

        let entry = store.append_points(PointEntry::new(CreatePointEntry {
            student_id,
            group_id: student.group_id,
            points: -amount,
            reason: format!("Bought {}", item),
            date: Utc::now().date_naive(),
        }));
        tracing::info!(student_id = %student_id, amount, actor = %self.actor.id, "points spent");
        Ok(entry)
    }

    async fn history(&self, student_id: Uuid) -> AppResult<Vec<PointHistoryEntry>> {
        let store = self.state.store().read().await;
        // ledger is append-ordered; the portal shows newest first
        Ok(store
            .points_for_student(student_id)
            .iter()
            .rev()
            .map(PointHistoryEntry::from)
            .collect())
    }
}
