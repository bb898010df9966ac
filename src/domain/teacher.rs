//! Teacher domain entity and related types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::validate::{validate_non_negative_amount, validate_phone};

/// Employment / enrollment status shared by teachers and students
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    #[default]
    Active,
    Inactive,
}

impl AccountStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, AccountStatus::Active)
    }
}

/// Teacher domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub salary: Decimal,
    /// Denormalized display counter, maintained through admin edits only
    pub student_count: u32,
    pub join_date: NaiveDate,
    pub status: AccountStatus,
}

impl Teacher {
    /// Build a new teacher from validated creation data
    pub fn new(data: CreateTeacher) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: data.name,
            email: data.email,
            phone: data.phone,
            subject: data.subject,
            salary: data.salary,
            student_count: data.student_count,
            join_date: data.join_date,
            status: data.status,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Merge partial update fields into the entity
    pub fn apply(&mut self, update: UpdateTeacher) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(subject) = update.subject {
            self.subject = subject;
        }
        if let Some(salary) = update.salary {
            self.salary = salary;
        }
        if let Some(student_count) = update.student_count {
            self.student_count = student_count;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
    }
}

/// Teacher creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTeacher {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(custom(function = "validate_phone", message = "Invalid phone number"))]
    pub phone: String,
    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,
    #[validate(custom(
        function = "validate_non_negative_amount",
        message = "Salary cannot be negative"
    ))]
    pub salary: Decimal,
    #[serde(default)]
    pub student_count: u32,
    pub join_date: NaiveDate,
    #[serde(default)]
    pub status: AccountStatus,
}

/// Teacher update data transfer object
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTeacher {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(custom(function = "validate_phone", message = "Invalid phone number"))]
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "Subject cannot be empty"))]
    pub subject: Option<String>,
    #[validate(custom(
        function = "validate_non_negative_amount",
        message = "Salary cannot be negative"
    ))]
    pub salary: Option<Decimal>,
    pub student_count: Option<u32>,
    pub status: Option<AccountStatus>,
}
