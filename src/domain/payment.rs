//! Payment domain entity and related types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::validate::validate_positive_amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Completed,
    Pending,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Bank,
}

/// Payment domain entity.
///
/// `student_name` is a point-in-time snapshot taken when the payment is
/// recorded; it is never re-synced if the student is renamed later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub student_name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub status: PaymentStatus,
    pub method: PaymentMethod,
}

impl Payment {
    /// Build a new payment; the student name snapshot is resolved by the
    /// caller from the current roster
    pub fn new(data: CreatePayment, student_name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            student_id: data.student_id,
            student_name,
            amount: data.amount,
            date: data.date,
            status: data.status,
            method: data.method,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.status, PaymentStatus::Completed)
    }

    pub fn apply(&mut self, update: UpdatePayment) {
        if let Some(amount) = update.amount {
            self.amount = amount;
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(method) = update.method {
            self.method = method;
        }
    }
}

/// Payment creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePayment {
    pub student_id: Uuid,
    #[validate(custom(
        function = "validate_positive_amount",
        message = "Amount must be positive"
    ))]
    pub amount: Decimal,
    pub date: NaiveDate,
    pub status: PaymentStatus,
    pub method: PaymentMethod,
}

/// Payment update data transfer object
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePayment {
    #[validate(custom(
        function = "validate_positive_amount",
        message = "Amount must be positive"
    ))]
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub status: Option<PaymentStatus>,
    pub method: Option<PaymentMethod>,
}
