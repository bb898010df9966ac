//! Lesson domain entity and related types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Lesson domain entity; owned by a group and cascade-deleted with it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    pub id: Uuid,
    pub group_id: Uuid,
    pub topic: String,
    pub date: NaiveDate,
    pub homework: String,
}

impl Lesson {
    pub fn new(data: CreateLesson) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id: data.group_id,
            topic: data.topic,
            date: data.date,
            homework: data.homework,
        }
    }

    pub fn apply(&mut self, update: UpdateLesson) {
        if let Some(topic) = update.topic {
            self.topic = topic;
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(homework) = update.homework {
            self.homework = homework;
        }
    }
}

/// Lesson creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLesson {
    pub group_id: Uuid,
    #[validate(length(min = 1, message = "Topic is required"))]
    pub topic: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub homework: String,
}

/// Lesson update data transfer object
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateLesson {
    #[validate(length(min = 1, message = "Topic cannot be empty"))]
    pub topic: Option<String>,
    pub date: Option<NaiveDate>,
    pub homework: Option<String>,
}
