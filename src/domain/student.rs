//! Student domain entity and related types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::teacher::AccountStatus;
use super::validate::{validate_non_negative_amount, validate_phone};

/// Monthly fee standing of a student
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeStatus {
    Paid,
    #[default]
    Pending,
    Overdue,
}

/// Student domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub course: String,
    pub fee: Decimal,
    pub join_date: NaiveDate,
    pub status: AccountStatus,
    pub payment_status: FeeStatus,
    /// Weak reference to the student's group; kept consistent with
    /// `Group::student_ids` by the store's membership operations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<Uuid>,
}

impl Student {
    /// Build a new student from validated creation data
    pub fn new(data: CreateStudent) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: data.name,
            email: data.email,
            phone: data.phone,
            course: data.course,
            fee: data.fee,
            join_date: data.join_date,
            status: data.status,
            payment_status: data.payment_status,
            group_id: data.group_id,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Merge partial update fields into the entity.
    ///
    /// Group membership is excluded on purpose; it changes only through the
    /// transactional membership operations.
    pub fn apply(&mut self, update: UpdateStudent) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(course) = update.course {
            self.course = course;
        }
        if let Some(fee) = update.fee {
            self.fee = fee;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(payment_status) = update.payment_status {
            self.payment_status = payment_status;
        }
    }
}

/// Student creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStudent {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(custom(function = "validate_phone", message = "Invalid phone number"))]
    pub phone: String,
    #[validate(length(min = 1, message = "Course is required"))]
    pub course: String,
    #[validate(custom(
        function = "validate_non_negative_amount",
        message = "Fee cannot be negative"
    ))]
    pub fee: Decimal,
    pub join_date: NaiveDate,
    #[serde(default)]
    pub status: AccountStatus,
    #[serde(default)]
    pub payment_status: FeeStatus,
    /// Optional initial group; the group's member list is updated alongside
    #[serde(default)]
    pub group_id: Option<Uuid>,
}

/// Student update data transfer object
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateStudent {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(custom(function = "validate_phone", message = "Invalid phone number"))]
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "Course cannot be empty"))]
    pub course: Option<String>,
    #[validate(custom(
        function = "validate_non_negative_amount",
        message = "Fee cannot be negative"
    ))]
    pub fee: Option<Decimal>,
    pub status: Option<AccountStatus>,
    pub payment_status: Option<FeeStatus>,
}
