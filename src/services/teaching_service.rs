//! Teaching service - groups, lessons, attendance, points and marks.
//!
//! Covers the teacher portal's use cases and the derived metrics consumed
//! by its dashboards. Group deletion cascades to lessons and attendance;
//! attendance is recorded with upsert semantics.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{
    Actor, AttendanceRecord, AttendanceStatus, CreateGroup, CreateLesson, CreateMark,
    CreatePointEntry, Group, Lesson, PointEntry, StudentMark, TeacherActivity,
    TeacherActivityKind, UpdateGroup, UpdateLesson, UpdateMark,
};
use crate::errors::{AppResult, OptionExt};
use crate::infra::AppState;
use crate::metrics;

/// Teaching service trait for dependency injection.
#[async_trait]
pub trait TeachingService: Send + Sync {
    // Group CRUD
    async fn create_group(&self, data: CreateGroup) -> AppResult<Group>;
    async fn update_group(&self, id: Uuid, data: UpdateGroup) -> AppResult<Group>;
    async fn delete_group(&self, id: Uuid) -> AppResult<()>;
    async fn get_group(&self, id: Uuid) -> AppResult<Group>;
    async fn list_groups(&self) -> AppResult<Vec<Group>>;

    /// Replace a group's member list wholesale; membership is updated on
    /// both sides in one step.
    async fn assign_students_to_group(
        &self,
        group_id: Uuid,
        student_ids: Vec<Uuid>,
    ) -> AppResult<Group>;

    // Lesson CRUD
    async fn create_lesson(&self, data: CreateLesson) -> AppResult<Lesson>;
    async fn update_lesson(&self, id: Uuid, data: UpdateLesson) -> AppResult<Lesson>;
    async fn delete_lesson(&self, id: Uuid) -> AppResult<()>;
    async fn lessons_for_group(&self, group_id: Uuid) -> AppResult<Vec<Lesson>>;

    // Attendance
    async fn record_attendance(
        &self,
        lesson_id: Uuid,
        group_id: Uuid,
        student_id: Uuid,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> AppResult<AttendanceRecord>;
    async fn attendance_for_lesson(&self, lesson_id: Uuid) -> AppResult<Vec<AttendanceRecord>>;

    // Points
    async fn add_points(&self, data: CreatePointEntry) -> AppResult<PointEntry>;
    async fn points_for_student(&self, student_id: Uuid) -> AppResult<Vec<PointEntry>>;

    // Marks
    async fn add_mark(&self, data: CreateMark) -> AppResult<StudentMark>;
    async fn update_mark(&self, id: Uuid, data: UpdateMark) -> AppResult<StudentMark>;
    async fn marks_for_student(&self, student_id: Uuid) -> AppResult<Vec<StudentMark>>;

    // Derived metrics
    async fn group_attendance_rate(&self, group_id: Uuid) -> AppResult<u8>;
    async fn student_attendance_rate(&self, group_id: Uuid, student_id: Uuid) -> AppResult<u8>;
    async fn group_average_points(&self, group_id: Uuid) -> AppResult<i64>;

    /// Teaching audit trail, newest first
    async fn recent_activity(&self) -> AppResult<Vec<TeacherActivity>>;
}

/// Concrete implementation of TeachingService over the shared store.
pub struct TeachingManager {
    state: AppState,
    actor: Actor,
}

impl TeachingManager {
    /// Create a new teaching service acting on behalf of the given caller
    pub fn new(state: AppState, actor: Actor) -> Self {
        Self { state, actor }
    }
}

#[async_trait]
impl TeachingService for TeachingManager {
    async fn create_group(&self, data: CreateGroup) -> AppResult<Group> {
        data.validate()?;
        let mut store = self.state.store().write().await;
        let group = store.insert_group(Group::new(data))?;
        store.log_teacher_activity(TeacherActivity::new(
            TeacherActivityKind::Group,
            format!("New group \"{}\" created", group.name),
        ));
        tracing::info!(group_id = %group.id, actor = %self.actor.id, "group created");
        Ok(group)
    }

    async fn update_group(&self, id: Uuid, data: UpdateGroup) -> AppResult<Group> {
        data.validate()?;
        let mut store = self.state.store().write().await;
        let group = store.update_group(id, data)?;
        tracing::debug!(group_id = %id, "group updated");
        Ok(group)
    }

    async fn delete_group(&self, id: Uuid) -> AppResult<()> {
        let mut store = self.state.store().write().await;
        if let Some(group) = store.remove_group(id) {
            store.log_teacher_activity(TeacherActivity::new(
                TeacherActivityKind::Group,
                format!("Group \"{}\" deleted", group.name),
            ));
            tracing::info!(group_id = %id, actor = %self.actor.id, "group deleted");
        }
        Ok(())
    }

    async fn get_group(&self, id: Uuid) -> AppResult<Group> {
        self.state.store().read().await.group(id).ok_or_not_found()
    }

    async fn list_groups(&self) -> AppResult<Vec<Group>> {
        Ok(self.state.store().read().await.groups())
    }

    async fn assign_students_to_group(
        &self,
        group_id: Uuid,
        student_ids: Vec<Uuid>,
    ) -> AppResult<Group> {
        let mut store = self.state.store().write().await;
        let group = store.assign_students(group_id, student_ids)?;
        tracing::info!(group_id = %group_id, members = group.student_ids.len(), "group members assigned");
        Ok(group)
    }

    async fn create_lesson(&self, data: CreateLesson) -> AppResult<Lesson> {
        data.validate()?;
        let mut store = self.state.store().write().await;
        // group name snapshot for the log; unknown groups are tolerated
        let group_name = store
            .group(data.group_id)
            .map(|g| g.name)
            .unwrap_or_else(|| "Unknown".to_string());
        let lesson = store.insert_lesson(Lesson::new(data));
        store.log_teacher_activity(TeacherActivity::new(
            TeacherActivityKind::Lesson,
            format!("New lesson \"{}\" added to group {}", lesson.topic, group_name),
        ));
        tracing::info!(lesson_id = %lesson.id, actor = %self.actor.id, "lesson created");
        Ok(lesson)
    }

    async fn update_lesson(&self, id: Uuid, data: UpdateLesson) -> AppResult<Lesson> {
        data.validate()?;
        let mut store = self.state.store().write().await;
        store.update_lesson(id, data)
    }

    async fn delete_lesson(&self, id: Uuid) -> AppResult<()> {
        let mut store = self.state.store().write().await;
        if let Some(lesson) = store.remove_lesson(id) {
            store.log_teacher_activity(TeacherActivity::new(
                TeacherActivityKind::Lesson,
                format!("Lesson \"{}\" deleted", lesson.topic),
            ));
            tracing::info!(lesson_id = %id, actor = %self.actor.id, "lesson deleted");
        }
        Ok(())
    }

    async fn lessons_for_group(&self, group_id: Uuid) -> AppResult<Vec<Lesson>> {
        Ok(self.state.store().read().await.lessons_for_group(group_id))
    }

    async fn record_attendance(
        &self,
        lesson_id: Uuid,
        group_id: Uuid,
        student_id: Uuid,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> AppResult<AttendanceRecord> {
        let mut store = self.state.store().write().await;
        let record = store.upsert_attendance(lesson_id, group_id, student_id, date, status);
        tracing::debug!(lesson_id = %lesson_id, student_id = %student_id, ?status, "attendance recorded");
        Ok(record)
    }

    async fn attendance_for_lesson(&self, lesson_id: Uuid) -> AppResult<Vec<AttendanceRecord>> {
        Ok(self
            .state
            .store()
            .read()
            .await
            .attendance_for_lesson(lesson_id))
    }

    async fn add_points(&self, data: CreatePointEntry) -> AppResult<PointEntry> {
        data.validate()?;
        let mut store = self.state.store().write().await;
        let entry = store.append_points(PointEntry::new(data));
        store.log_teacher_activity(TeacherActivity::new(
            TeacherActivityKind::Point,
            format!("Assigned {} points for \"{}\"", entry.points, entry.reason),
        ));
        tracing::info!(student_id = %entry.student_id, points = entry.points, actor = %self.actor.id, "points assigned");
        Ok(entry)
    }

    async fn points_for_student(&self, student_id: Uuid) -> AppResult<Vec<PointEntry>> {
        Ok(self
            .state
            .store()
            .read()
            .await
            .points_for_student(student_id))
    }

    async fn add_mark(&self, data: CreateMark) -> AppResult<StudentMark> {
        data.validate()?;
        let mut store = self.state.store().write().await;
        let mark = store.insert_mark(StudentMark::new(data));
        tracing::debug!(student_id = %mark.student_id, mark = mark.mark, "mark added");
        Ok(mark)
    }

    async fn update_mark(&self, id: Uuid, data: UpdateMark) -> AppResult<StudentMark> {
        data.validate()?;
        let mut store = self.state.store().write().await;
        store.update_mark(id, data)
    }

    async fn marks_for_student(&self, student_id: Uuid) -> AppResult<Vec<StudentMark>> {
        Ok(self
            .state
            .store()
            .read()
            .await
            .marks_for_student(student_id))
    }

    async fn group_attendance_rate(&self, group_id: Uuid) -> AppResult<u8> {
        let store = self.state.store().read().await;
        Ok(metrics::group_attendance_rate(&store, group_id))
    }

    async fn student_attendance_rate(&self, group_id: Uuid, student_id: Uuid) -> AppResult<u8> {
        let store = self.state.store().read().await;
        Ok(metrics::student_attendance_rate(&store, group_id, student_id))
    }

    async fn group_average_points(&self, group_id: Uuid) -> AppResult<i64> {
        let store = self.state.store().read().await;
        Ok(metrics::average_points(&store, group_id))
    }

    async fn recent_activity(&self) -> AppResult<Vec<TeacherActivity>> {
        Ok(self.state.store().read().await.teacher_activities())
    }
}
