//! Append-only activity logs.
//!
//! Two audit trails mirror the two portals: the admin log (rosters,
//! payments, shop) and the teaching log (groups, lessons, points). Both are
//! newest-first; messages embed entity names as point-in-time snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of admin-facing domain event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Registration,
    Payment,
    Product,
    Teacher,
}

/// Admin audit trail entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: Uuid,
    pub kind: ActivityKind,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl Activity {
    pub fn new(kind: ActivityKind, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Kind of teaching-facing domain event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeacherActivityKind {
    Lesson,
    Homework,
    Attendance,
    Group,
    Point,
}

/// Teaching audit trail entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherActivity {
    pub id: Uuid,
    pub kind: TeacherActivityKind,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl TeacherActivity {
    pub fn new(kind: TeacherActivityKind, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}
