//! Authoritative in-memory entity store.
//!
//! Holds one keyed collection per entity type plus the two activity logs and
//! the points ledger. All invariant-bearing mutations live here so no caller
//! can break referential consistency:
//!
//! - group membership is updated two-sidedly (`Student::group_id` and
//!   `Group::student_ids` never drift);
//! - deleting a group cascades to its lessons and their attendance records,
//!   driven by secondary indexes rather than full scans;
//! - attendance is upserted on the `(lesson_id, student_id)` key;
//! - the points ledger is append-only.
//!
//! The store itself is a plain owned struct; sharing and write serialization
//! happen one level up in [`crate::infra::AppState`]. Read accessors return
//! clones, so no caller ever observes a partial write.

mod snapshot;

pub use snapshot::StoreSnapshot;

use std::collections::{HashMap, HashSet, VecDeque};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{
    Activity, AttendanceRecord, AttendanceStatus, Group, Lesson, Payment, PointEntry, Product,
    Student, StudentMark, Teacher, TeacherActivity, UpdateGroup, UpdateLesson, UpdateMark,
    UpdatePayment, UpdateProduct, UpdateStudent, UpdateTeacher,
};
use crate::errors::{AppError, AppResult};

/// In-memory entity collections with their secondary indexes
#[derive(Debug, Default)]
pub struct EntityStore {
    teachers: HashMap<Uuid, Teacher>,
    students: HashMap<Uuid, Student>,
    groups: HashMap<Uuid, Group>,
    lessons: HashMap<Uuid, Lesson>,
    attendance: HashMap<Uuid, AttendanceRecord>,
    points: Vec<PointEntry>,
    marks: HashMap<Uuid, StudentMark>,
    payments: HashMap<Uuid, Payment>,
    products: HashMap<Uuid, Product>,
    activities: VecDeque<Activity>,
    teacher_activities: VecDeque<TeacherActivity>,

    // Secondary indexes for the cascade paths (O(1) amortized lookups)
    lessons_by_group: HashMap<Uuid, Vec<Uuid>>,
    attendance_by_lesson: HashMap<Uuid, Vec<Uuid>>,
    attendance_key: HashMap<(Uuid, Uuid), Uuid>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Teachers
    // =========================================================================

    pub fn insert_teacher(&mut self, teacher: Teacher) -> Teacher {
        self.teachers.insert(teacher.id, teacher.clone());
        teacher
    }

    pub fn update_teacher(&mut self, id: Uuid, update: UpdateTeacher) -> AppResult<Teacher> {
        let teacher = self.teachers.get_mut(&id).ok_or(AppError::NotFound)?;
        teacher.apply(update);
        Ok(teacher.clone())
    }

    pub fn remove_teacher(&mut self, id: Uuid) -> Option<Teacher> {
        self.teachers.remove(&id)
    }

    pub fn teacher(&self, id: Uuid) -> Option<Teacher> {
        self.teachers.get(&id).cloned()
    }

    pub fn teachers(&self) -> Vec<Teacher> {
        self.teachers.values().cloned().collect()
    }

    // =========================================================================
    // Students & group membership
    // =========================================================================

    /// Insert a student; an initial group reference also registers the
    /// student in that group's member list (invariant A).
    pub fn insert_student(&mut self, student: Student) -> AppResult<Student> {
        if let Some(group_id) = student.group_id {
            let group = self.groups.get_mut(&group_id).ok_or(AppError::NotFound)?;
            group.student_ids.push(student.id);
        }
        self.students.insert(student.id, student.clone());
        Ok(student)
    }

    pub fn update_student(&mut self, id: Uuid, update: UpdateStudent) -> AppResult<Student> {
        let student = self.students.get_mut(&id).ok_or(AppError::NotFound)?;
        student.apply(update);
        Ok(student.clone())
    }

    /// Remove a student, dropping them from their group's member list.
    /// Historical payments, points, marks and attendance stay untouched.
    pub fn remove_student(&mut self, id: Uuid) -> Option<Student> {
        self.unlink_student(id);
        self.students.remove(&id)
    }

    /// Move a student into a group (or out of any group), updating both
    /// sides of the membership in one step.
    pub fn set_student_group(
        &mut self,
        student_id: Uuid,
        group_id: Option<Uuid>,
    ) -> AppResult<Student> {
        if !self.students.contains_key(&student_id) {
            return Err(AppError::NotFound);
        }
        if let Some(gid) = group_id {
            if !self.groups.contains_key(&gid) {
                return Err(AppError::NotFound);
            }
        }

        self.unlink_student(student_id);
        if let Some(gid) = group_id {
            if let Some(group) = self.groups.get_mut(&gid) {
                group.student_ids.push(student_id);
            }
            if let Some(student) = self.students.get_mut(&student_id) {
                student.group_id = Some(gid);
            }
        }
        self.students
            .get(&student_id)
            .cloned()
            .ok_or(AppError::NotFound)
    }

    pub fn student(&self, id: Uuid) -> Option<Student> {
        self.students.get(&id).cloned()
    }

    pub fn students(&self) -> Vec<Student> {
        self.students.values().cloned().collect()
    }

    /// Drop a student from their current group's member list and clear the
    /// back reference.
    fn unlink_student(&mut self, student_id: Uuid) {
        let old_group = self.students.get(&student_id).and_then(|s| s.group_id);
        if let Some(gid) = old_group {
            if let Some(group) = self.groups.get_mut(&gid) {
                group.student_ids.retain(|id| *id != student_id);
            }
        }
        if let Some(student) = self.students.get_mut(&student_id) {
            student.group_id = None;
        }
    }

    // =========================================================================
    // Groups
    // =========================================================================

    /// Insert a group. Initial members must be unique, existing students;
    /// they are moved out of any previous group.
    pub fn insert_group(&mut self, group: Group) -> AppResult<Group> {
        let mut seen = HashSet::with_capacity(group.student_ids.len());
        for id in &group.student_ids {
            if !seen.insert(*id) {
                return Err(AppError::validation("Duplicate student id in member list"));
            }
            if !self.students.contains_key(id) {
                return Err(AppError::NotFound);
            }
        }

        let group_id = group.id;
        let members = group.student_ids.clone();
        self.groups.insert(group_id, group);
        for student_id in members {
            self.unlink_from_previous_group(student_id, group_id);
            if let Some(student) = self.students.get_mut(&student_id) {
                student.group_id = Some(group_id);
            }
        }
        self.groups.get(&group_id).cloned().ok_or(AppError::NotFound)
    }

    pub fn update_group(&mut self, id: Uuid, update: UpdateGroup) -> AppResult<Group> {
        let group = self.groups.get_mut(&id).ok_or(AppError::NotFound)?;
        group.apply(update);
        Ok(group.clone())
    }

    /// Remove a group, cascading to its lessons and their attendance
    /// records, and clearing every member's back reference.
    pub fn remove_group(&mut self, id: Uuid) -> Option<Group> {
        let group = self.groups.remove(&id)?;
        if let Some(lesson_ids) = self.lessons_by_group.remove(&id) {
            for lesson_id in lesson_ids {
                self.lessons.remove(&lesson_id);
                self.drop_attendance_for_lesson(lesson_id);
            }
        }
        for student_id in &group.student_ids {
            if let Some(student) = self.students.get_mut(student_id) {
                student.group_id = None;
            }
        }
        Some(group)
    }

    /// Replace a group's member list wholesale, two-sidedly: removed members
    /// lose their back reference, added members are moved out of any
    /// previous group. Rejects duplicates and unknown students before any
    /// change is applied.
    pub fn assign_students(&mut self, group_id: Uuid, student_ids: Vec<Uuid>) -> AppResult<Group> {
        if !self.groups.contains_key(&group_id) {
            return Err(AppError::NotFound);
        }
        let mut seen = HashSet::with_capacity(student_ids.len());
        for id in &student_ids {
            if !seen.insert(*id) {
                return Err(AppError::validation("Duplicate student id in assignment"));
            }
            if !self.students.contains_key(id) {
                return Err(AppError::NotFound);
            }
        }

        let current: Vec<Uuid> = self
            .groups
            .get(&group_id)
            .map(|g| g.student_ids.clone())
            .unwrap_or_default();
        for id in current {
            if !seen.contains(&id) {
                self.unlink_student(id);
            }
        }
        for id in &student_ids {
            self.unlink_from_previous_group(*id, group_id);
            if let Some(student) = self.students.get_mut(id) {
                student.group_id = Some(group_id);
            }
        }

        let group = self.groups.get_mut(&group_id).ok_or(AppError::NotFound)?;
        group.student_ids = student_ids;
        Ok(group.clone())
    }

    pub fn group(&self, id: Uuid) -> Option<Group> {
        self.groups.get(&id).cloned()
    }

    pub fn groups(&self) -> Vec<Group> {
        self.groups.values().cloned().collect()
    }

    /// Like `unlink_student`, but leaves the target group's own member list
    /// alone (the caller manages it wholesale).
    fn unlink_from_previous_group(&mut self, student_id: Uuid, target_group: Uuid) {
        let old_group = self.students.get(&student_id).and_then(|s| s.group_id);
        if let Some(gid) = old_group {
            if gid != target_group {
                if let Some(group) = self.groups.get_mut(&gid) {
                    group.student_ids.retain(|id| *id != student_id);
                }
            }
        }
    }

    // =========================================================================
    // Lessons
    // =========================================================================

    pub fn insert_lesson(&mut self, lesson: Lesson) -> Lesson {
        self.lessons_by_group
            .entry(lesson.group_id)
            .or_default()
            .push(lesson.id);
        self.lessons.insert(lesson.id, lesson.clone());
        lesson
    }

    pub fn update_lesson(&mut self, id: Uuid, update: UpdateLesson) -> AppResult<Lesson> {
        let lesson = self.lessons.get_mut(&id).ok_or(AppError::NotFound)?;
        lesson.apply(update);
        Ok(lesson.clone())
    }

    /// Remove a lesson, cascading to its attendance records.
    pub fn remove_lesson(&mut self, id: Uuid) -> Option<Lesson> {
        let lesson = self.lessons.remove(&id)?;
        if let Some(ids) = self.lessons_by_group.get_mut(&lesson.group_id) {
            ids.retain(|lesson_id| *lesson_id != id);
        }
        self.drop_attendance_for_lesson(id);
        Some(lesson)
    }

    pub fn lesson(&self, id: Uuid) -> Option<Lesson> {
        self.lessons.get(&id).cloned()
    }

    pub fn lessons(&self) -> Vec<Lesson> {
        self.lessons.values().cloned().collect()
    }

    pub fn lessons_for_group(&self, group_id: Uuid) -> Vec<Lesson> {
        self.lessons_by_group
            .get(&group_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.lessons.get(id).cloned())
            .collect()
    }

    fn drop_attendance_for_lesson(&mut self, lesson_id: Uuid) {
        if let Some(record_ids) = self.attendance_by_lesson.remove(&lesson_id) {
            for record_id in record_ids {
                if let Some(record) = self.attendance.remove(&record_id) {
                    self.attendance_key
                        .remove(&(record.lesson_id, record.student_id));
                }
            }
        }
    }

    // =========================================================================
    // Attendance
    // =========================================================================

    /// Record attendance with upsert semantics: an existing record for the
    /// `(lesson_id, student_id)` key gets its status and date replaced,
    /// otherwise a new record is inserted.
    pub fn upsert_attendance(
        &mut self,
        lesson_id: Uuid,
        group_id: Uuid,
        student_id: Uuid,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> AttendanceRecord {
        if let Some(existing_id) = self.attendance_key.get(&(lesson_id, student_id)).copied() {
            if let Some(record) = self.attendance.get_mut(&existing_id) {
                record.status = status;
                record.date = date;
                record.group_id = group_id;
                return record.clone();
            }
        }

        let record = AttendanceRecord::new(lesson_id, group_id, student_id, date, status);
        self.attendance_key
            .insert((lesson_id, student_id), record.id);
        self.attendance_by_lesson
            .entry(lesson_id)
            .or_default()
            .push(record.id);
        self.attendance.insert(record.id, record.clone());
        record
    }

    pub fn attendance_for_lesson(&self, lesson_id: Uuid) -> Vec<AttendanceRecord> {
        self.attendance_by_lesson
            .get(&lesson_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.attendance.get(id).cloned())
            .collect()
    }

    pub fn attendance_for_group(&self, group_id: Uuid) -> Vec<AttendanceRecord> {
        self.attendance
            .values()
            .filter(|r| r.group_id == group_id)
            .cloned()
            .collect()
    }

    pub fn attendance_for_student(&self, group_id: Uuid, student_id: Uuid) -> Vec<AttendanceRecord> {
        self.attendance
            .values()
            .filter(|r| r.group_id == group_id && r.student_id == student_id)
            .cloned()
            .collect()
    }

    pub fn attendance_records(&self) -> Vec<AttendanceRecord> {
        self.attendance.values().cloned().collect()
    }

    // =========================================================================
    // Points ledger
    // =========================================================================

    /// Append a ledger entry; prior entries are never mutated.
    pub fn append_points(&mut self, entry: PointEntry) -> PointEntry {
        self.points.push(entry.clone());
        entry
    }

    pub fn points_for_student(&self, student_id: Uuid) -> Vec<PointEntry> {
        self.points
            .iter()
            .filter(|p| p.student_id == student_id)
            .cloned()
            .collect()
    }

    pub fn points_for_group(&self, group_id: Uuid) -> Vec<PointEntry> {
        self.points
            .iter()
            .filter(|p| p.group_id == Some(group_id))
            .cloned()
            .collect()
    }

    pub fn points(&self) -> Vec<PointEntry> {
        self.points.clone()
    }

    // =========================================================================
    // Marks
    // =========================================================================

    pub fn insert_mark(&mut self, mark: StudentMark) -> StudentMark {
        self.marks.insert(mark.id, mark.clone());
        mark
    }

    pub fn update_mark(&mut self, id: Uuid, update: UpdateMark) -> AppResult<StudentMark> {
        let mark = self.marks.get_mut(&id).ok_or(AppError::NotFound)?;
        mark.apply(update);
        Ok(mark.clone())
    }

    pub fn marks_for_student(&self, student_id: Uuid) -> Vec<StudentMark> {
        self.marks
            .values()
            .filter(|m| m.student_id == student_id)
            .cloned()
            .collect()
    }

    pub fn marks(&self) -> Vec<StudentMark> {
        self.marks.values().cloned().collect()
    }

    // =========================================================================
    // Payments
    // =========================================================================

    pub fn insert_payment(&mut self, payment: Payment) -> Payment {
        self.payments.insert(payment.id, payment.clone());
        payment
    }

    pub fn update_payment(&mut self, id: Uuid, update: UpdatePayment) -> AppResult<Payment> {
        let payment = self.payments.get_mut(&id).ok_or(AppError::NotFound)?;
        payment.apply(update);
        Ok(payment.clone())
    }

    pub fn payments(&self) -> Vec<Payment> {
        self.payments.values().cloned().collect()
    }

    // =========================================================================
    // Products
    // =========================================================================

    pub fn insert_product(&mut self, product: Product) -> Product {
        self.products.insert(product.id, product.clone());
        product
    }

    pub fn update_product(&mut self, id: Uuid, update: UpdateProduct) -> AppResult<Product> {
        let product = self.products.get_mut(&id).ok_or(AppError::NotFound)?;
        product.apply(update);
        Ok(product.clone())
    }

    pub fn remove_product(&mut self, id: Uuid) -> Option<Product> {
        self.products.remove(&id)
    }

    pub fn product(&self, id: Uuid) -> Option<Product> {
        self.products.get(&id).cloned()
    }

    pub fn products(&self) -> Vec<Product> {
        self.products.values().cloned().collect()
    }

    // =========================================================================
    // Activity logs (newest-first)
    // =========================================================================

    pub fn log_activity(&mut self, activity: Activity) {
        self.activities.push_front(activity);
    }

    pub fn log_teacher_activity(&mut self, activity: TeacherActivity) {
        self.teacher_activities.push_front(activity);
    }

    /// Admin audit trail, newest first
    pub fn activities(&self) -> Vec<Activity> {
        self.activities.iter().cloned().collect()
    }

    /// Teaching audit trail, newest first
    pub fn teacher_activities(&self) -> Vec<TeacherActivity> {
        self.teacher_activities.iter().cloned().collect()
    }

    // =========================================================================
    // Snapshot exchange
    // =========================================================================

    /// Full-state snapshot for the persistence collaborator
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            teachers: self.teachers.values().cloned().collect(),
            students: self.students.values().cloned().collect(),
            groups: self.groups.values().cloned().collect(),
            lessons: self.lessons.values().cloned().collect(),
            attendance_records: self.attendance.values().cloned().collect(),
            points: self.points.clone(),
            marks: self.marks.values().cloned().collect(),
            payments: self.payments.values().cloned().collect(),
            products: self.products.values().cloned().collect(),
            activities: self.activities.iter().cloned().collect(),
            teacher_activities: self.teacher_activities.iter().cloned().collect(),
        }
    }

    /// Rebuild a store (including all secondary indexes) from a snapshot
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        let mut store = Self::new();
        for teacher in snapshot.teachers {
            store.teachers.insert(teacher.id, teacher);
        }
        for student in snapshot.students {
            store.students.insert(student.id, student);
        }
        for group in snapshot.groups {
            store.groups.insert(group.id, group);
        }
        for lesson in snapshot.lessons {
            store
                .lessons_by_group
                .entry(lesson.group_id)
                .or_default()
                .push(lesson.id);
            store.lessons.insert(lesson.id, lesson);
        }
        for record in snapshot.attendance_records {
            store
                .attendance_key
                .insert((record.lesson_id, record.student_id), record.id);
            store
                .attendance_by_lesson
                .entry(record.lesson_id)
                .or_default()
                .push(record.id);
            store.attendance.insert(record.id, record);
        }
        store.points = snapshot.points;
        for mark in snapshot.marks {
            store.marks.insert(mark.id, mark);
        }
        for payment in snapshot.payments {
            store.payments.insert(payment.id, payment);
        }
        for product in snapshot.products {
            store.products.insert(product.id, product);
        }
        store.activities = snapshot.activities.into();
        store.teacher_activities = snapshot.teacher_activities.into();
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CreateGroup, CreateLesson, CreateStudent};
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn sample_student(name: &str) -> Student {
        Student::new(CreateStudent {
            name: name.to_string(),
            email: format!("{}@educrm.test", name.to_lowercase()),
            phone: "+1234567890".to_string(),
            course: "Math".to_string(),
            fee: dec!(450),
            join_date: date("2024-01-10"),
            status: Default::default(),
            payment_status: Default::default(),
            group_id: None,
        })
    }

    fn sample_group(name: &str) -> Group {
        Group::new(CreateGroup {
            name: name.to_string(),
            subject: "Math".to_string(),
            lesson_time: "09:00 - 10:30".to_string(),
            lesson_days: vec![],
            student_ids: vec![],
        })
    }

    #[test]
    fn test_membership_stays_bidirectional() {
        let mut store = EntityStore::new();
        let student = store.insert_student(sample_student("Alice")).unwrap();
        let group_a = store.insert_group(sample_group("Math A")).unwrap();
        let group_b = store.insert_group(sample_group("Math B")).unwrap();

        store.set_student_group(student.id, Some(group_a.id)).unwrap();
        assert_eq!(store.group(group_a.id).unwrap().student_ids, vec![student.id]);

        // moving to another group clears the old side
        store.set_student_group(student.id, Some(group_b.id)).unwrap();
        assert!(store.group(group_a.id).unwrap().student_ids.is_empty());
        assert_eq!(store.student(student.id).unwrap().group_id, Some(group_b.id));
    }

    #[test]
    fn test_group_cascade_clears_indexes() {
        let mut store = EntityStore::new();
        let student = store.insert_student(sample_student("Bob")).unwrap();
        let group = store.insert_group(sample_group("Science")).unwrap();
        let lesson = store.insert_lesson(Lesson::new(CreateLesson {
            group_id: group.id,
            topic: "Newton's Laws".to_string(),
            date: date("2024-01-16"),
            homework: String::new(),
        }));
        store.upsert_attendance(
            lesson.id,
            group.id,
            student.id,
            date("2024-01-16"),
            AttendanceStatus::Present,
        );

        store.remove_group(group.id);

        assert!(store.lesson(lesson.id).is_none());
        assert!(store.attendance_records().is_empty());
        assert!(store.attendance_key.is_empty());
        assert!(store.attendance_by_lesson.is_empty());
        assert!(store.lessons_by_group.is_empty());
    }

    #[test]
    fn test_upsert_attendance_reuses_record() {
        let mut store = EntityStore::new();
        let lesson_id = Uuid::new_v4();
        let group_id = Uuid::new_v4();
        let student_id = Uuid::new_v4();

        let first = store.upsert_attendance(
            lesson_id,
            group_id,
            student_id,
            date("2024-01-15"),
            AttendanceStatus::Present,
        );
        let second = store.upsert_attendance(
            lesson_id,
            group_id,
            student_id,
            date("2024-01-15"),
            AttendanceStatus::Late,
        );

        assert_eq!(first.id, second.id);
        assert_eq!(store.attendance_records().len(), 1);
        assert_eq!(second.status, AttendanceStatus::Late);
    }
}
