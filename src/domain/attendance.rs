//! Attendance record domain entity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

/// One student's attendance for one lesson.
///
/// At most one record exists per `(lesson_id, student_id)`; re-recording
/// replaces the stored status and date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub lesson_id: Uuid,
    pub group_id: Uuid,
    pub student_id: Uuid,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

impl AttendanceRecord {
    pub fn new(
        lesson_id: Uuid,
        group_id: Uuid,
        student_id: Uuid,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            lesson_id,
            group_id,
            student_id,
            date,
            status,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self.status, AttendanceStatus::Present)
    }
}
