//! Points ledger entries and the derived per-student history view.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// One append-only ledger entry; spend entries carry negative points.
///
/// The ledger is never rewritten: a student's balance is always the sum of
/// their entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointEntry {
    pub id: Uuid,
    pub student_id: Uuid,
    /// Group context of the award; spend entries may have none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<Uuid>,
    pub points: i64,
    pub reason: String,
    pub date: NaiveDate,
}

impl PointEntry {
    pub fn new(data: CreatePointEntry) -> Self {
        Self {
            id: Uuid::new_v4(),
            student_id: data.student_id,
            group_id: data.group_id,
            points: data.points,
            reason: data.reason,
            date: data.date,
        }
    }
}

/// Ledger entry creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePointEntry {
    pub student_id: Uuid,
    #[serde(default)]
    pub group_id: Option<Uuid>,
    pub points: i64,
    #[validate(length(min = 1, message = "Reason is required"))]
    pub reason: String,
    pub date: NaiveDate,
}

/// Direction of a history entry, derived from the sign of the delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointHistoryKind {
    Earned,
    Spent,
}

/// Per-student ledger projection consumed by the student portal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointHistoryEntry {
    pub id: Uuid,
    pub kind: PointHistoryKind,
    pub message: String,
    pub points_change: i64,
    pub date: NaiveDate,
}

impl From<&PointEntry> for PointHistoryEntry {
    fn from(entry: &PointEntry) -> Self {
        let kind = if entry.points < 0 {
            PointHistoryKind::Spent
        } else {
            PointHistoryKind::Earned
        };
        Self {
            id: entry.id,
            kind,
            message: entry.reason.clone(),
            points_change: entry.points,
            date: entry.date,
        }
    }
}
