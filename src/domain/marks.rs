//! Student mark domain entity and related types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A mark (1-10) a teacher gives a student for a lesson
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentMark {
    pub id: Uuid,
    pub student_id: Uuid,
    pub group_id: Uuid,
    pub lesson_id: Uuid,
    pub mark: u8,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl StudentMark {
    pub fn new(data: CreateMark) -> Self {
        Self {
            id: Uuid::new_v4(),
            student_id: data.student_id,
            group_id: data.group_id,
            lesson_id: data.lesson_id,
            mark: data.mark,
            date: data.date,
            comment: data.comment,
        }
    }

    pub fn apply(&mut self, update: UpdateMark) {
        if let Some(mark) = update.mark {
            self.mark = mark;
        }
        if let Some(comment) = update.comment {
            self.comment = Some(comment);
        }
    }
}

/// Mark creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMark {
    pub student_id: Uuid,
    pub group_id: Uuid,
    pub lesson_id: Uuid,
    #[validate(range(min = 1, max = 10, message = "Mark must be between 1 and 10"))]
    pub mark: u8,
    pub date: NaiveDate,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Mark update data transfer object
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMark {
    #[validate(range(min = 1, max = 10, message = "Mark must be between 1 and 10"))]
    pub mark: Option<u8>,
    pub comment: Option<String>,
}
