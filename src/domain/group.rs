//! Group domain entity and related types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Weekday a group meets on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LessonDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// Study group domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub subject: String,
    /// Display schedule, e.g. "09:00 - 10:30"
    pub lesson_time: String,
    pub lesson_days: Vec<LessonDay>,
    /// Ordered member list; unique, and always consistent with each member's
    /// `Student::group_id`
    pub student_ids: Vec<Uuid>,
    pub active: bool,
}

impl Group {
    /// Build a new group from validated creation data; starts active
    pub fn new(data: CreateGroup) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: data.name,
            subject: data.subject,
            lesson_time: data.lesson_time,
            lesson_days: data.lesson_days,
            student_ids: data.student_ids,
            active: true,
        }
    }

    /// Merge partial update fields; membership changes are excluded and go
    /// through the assignment operation instead
    pub fn apply(&mut self, update: UpdateGroup) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(subject) = update.subject {
            self.subject = subject;
        }
        if let Some(lesson_time) = update.lesson_time {
            self.lesson_time = lesson_time;
        }
        if let Some(lesson_days) = update.lesson_days {
            self.lesson_days = lesson_days;
        }
        if let Some(active) = update.active {
            self.active = active;
        }
    }
}

/// Group creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGroup {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,
    pub lesson_time: String,
    #[serde(default)]
    pub lesson_days: Vec<LessonDay>,
    /// Initial members; must be unique existing students
    #[serde(default)]
    pub student_ids: Vec<Uuid>,
}

/// Group update data transfer object
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateGroup {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Subject cannot be empty"))]
    pub subject: Option<String>,
    pub lesson_time: Option<String>,
    pub lesson_days: Option<Vec<LessonDay>>,
    pub active: Option<bool>,
}
