//! Derived metrics engine.
//!
//! Pure, side-effect-free aggregations over the current store state. All
//! functions take either an entity slice or a `&EntityStore` and never
//! mutate anything; percentage and average displays round half-up.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{AttendanceRecord, Group, Payment, StudentMark};
use crate::store::EntityStore;

/// Round half toward positive infinity: 2.5 -> 3, -2.5 -> -2.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Share of present records as a whole percentage; 0 for an empty set.
pub fn attendance_rate(records: &[AttendanceRecord]) -> u8 {
    if records.is_empty() {
        return 0;
    }
    let present = records.iter().filter(|r| r.is_present()).count();
    round_half_up(100.0 * present as f64 / records.len() as f64) as u8
}

/// Attendance rate across all of a group's records
pub fn group_attendance_rate(store: &EntityStore, group_id: Uuid) -> u8 {
    attendance_rate(&store.attendance_for_group(group_id))
}

/// Attendance rate of one student within a group
pub fn student_attendance_rate(store: &EntityStore, group_id: Uuid, student_id: Uuid) -> u8 {
    attendance_rate(&store.attendance_for_student(group_id, student_id))
}

/// Current point balance: the signed sum of the student's ledger entries.
/// May be negative; no floor is applied at this layer.
pub fn total_points(store: &EntityStore, student_id: Uuid) -> i64 {
    store
        .points_for_student(student_id)
        .iter()
        .map(|entry| entry.points)
        .sum()
}

/// Mean points per ledger entry (not per distinct student) within a group,
/// rounded half-up; 0 when the group has no entries.
pub fn average_points(store: &EntityStore, group_id: Uuid) -> i64 {
    let entries = store.points_for_group(group_id);
    if entries.is_empty() {
        return 0;
    }
    let sum: i64 = entries.iter().map(|entry| entry.points).sum();
    round_half_up(sum as f64 / entries.len() as f64)
}

/// Mean mark rounded half-up; 0 for an empty set
pub fn average_mark(marks: &[StudentMark]) -> u8 {
    if marks.is_empty() {
        return 0;
    }
    let sum: u32 = marks.iter().map(|m| u32::from(m.mark)).sum();
    round_half_up(f64::from(sum) / marks.len() as f64) as u8
}

/// Sum of completed payment amounts
pub fn total_revenue(payments: &[Payment]) -> Decimal {
    payments
        .iter()
        .filter(|p| p.is_completed())
        .map(|p| p.amount)
        .sum()
}

/// Number of students in the group
pub fn occupancy(group: &Group) -> usize {
    group.student_ids.len()
}
