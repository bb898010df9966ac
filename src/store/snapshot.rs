//! Full-state snapshot exchanged with the persistence collaborator.

use serde::{Deserialize, Serialize};

use crate::domain::{
    Activity, AttendanceRecord, Group, Lesson, Payment, PointEntry, Product, Student, StudentMark,
    Teacher, TeacherActivity,
};

/// Serializable copy of the whole entity store.
///
/// Listing order is unspecified except for the activity logs (newest first)
/// and the points ledger (append order). The store rebuilds its secondary
/// indexes when loading, so a snapshot carries entities only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub teachers: Vec<Teacher>,
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
    #[serde(default)]
    pub attendance_records: Vec<AttendanceRecord>,
    #[serde(default)]
    pub points: Vec<PointEntry>,
    #[serde(default)]
    pub marks: Vec<StudentMark>,
    #[serde(default)]
    pub payments: Vec<Payment>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub teacher_activities: Vec<TeacherActivity>,
}

impl StoreSnapshot {
    /// True when the snapshot carries no entities at all
    pub fn is_empty(&self) -> bool {
        self.teachers.is_empty()
            && self.students.is_empty()
            && self.groups.is_empty()
            && self.lessons.is_empty()
            && self.attendance_records.is_empty()
            && self.points.is_empty()
            && self.marks.is_empty()
            && self.payments.is_empty()
            && self.products.is_empty()
            && self.activities.is_empty()
            && self.teacher_activities.is_empty()
    }
}
