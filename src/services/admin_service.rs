//! Admin service - rosters, payments and the shop.
//!
//! Covers the admin portal's use cases: teacher and student CRUD, payment
//! recording, product management, and the admin audit trail. Every notable
//! mutation appends an activity entry (newest first).

use async_trait::async_trait;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{
    Activity, ActivityKind, Actor, CreatePayment, CreateProduct, CreateStudent, CreateTeacher,
    Payment, Product, Student, Teacher, UpdatePayment, UpdateProduct, UpdateStudent, UpdateTeacher,
};
use crate::errors::{AppResult, OptionExt};
use crate::infra::AppState;

/// Admin service trait for dependency injection.
///
/// Deletes are idempotent: removing an id that is already gone is a no-op,
/// never an error. Updates on a missing id fail with `NotFound`.
#[async_trait]
pub trait AdminService: Send + Sync {
    // Teacher CRUD
    async fn create_teacher(&self, data: CreateTeacher) -> AppResult<Teacher>;
    async fn update_teacher(&self, id: Uuid, data: UpdateTeacher) -> AppResult<Teacher>;
    async fn delete_teacher(&self, id: Uuid) -> AppResult<()>;
    async fn get_teacher(&self, id: Uuid) -> AppResult<Teacher>;
    async fn list_teachers(&self) -> AppResult<Vec<Teacher>>;

    // Student CRUD
    async fn create_student(&self, data: CreateStudent) -> AppResult<Student>;
    async fn update_student(&self, id: Uuid, data: UpdateStudent) -> AppResult<Student>;
    async fn delete_student(&self, id: Uuid) -> AppResult<()>;
    async fn get_student(&self, id: Uuid) -> AppResult<Student>;
    async fn list_students(&self) -> AppResult<Vec<Student>>;

    /// Move a student into a group, or out of any group with `None`.
    /// Both sides of the membership are updated in one step.
    async fn set_student_group(
        &self,
        student_id: Uuid,
        group_id: Option<Uuid>,
    ) -> AppResult<Student>;

    // Payments
    async fn add_payment(&self, data: CreatePayment) -> AppResult<Payment>;
    async fn update_payment(&self, id: Uuid, data: UpdatePayment) -> AppResult<Payment>;
    async fn list_payments(&self) -> AppResult<Vec<Payment>>;

    // Products
    async fn add_product(&self, data: CreateProduct) -> AppResult<Product>;
    async fn update_product(&self, id: Uuid, data: UpdateProduct) -> AppResult<Product>;
    async fn delete_product(&self, id: Uuid) -> AppResult<()>;
    async fn list_products(&self) -> AppResult<Vec<Product>>;

    /// Admin audit trail, newest first
    async fn recent_activity(&self) -> AppResult<Vec<Activity>>;
}

/// Concrete implementation of AdminService over the shared store.
pub struct AdminManager {
    state: AppState,
    actor: Actor,
}

impl AdminManager {
    /// Create a new admin service acting on behalf of the given caller
    pub fn new(state: AppState, actor: Actor) -> Self {
        Self { state, actor }
    }
}

#[async_trait]
impl AdminService for AdminManager {
    async fn create_teacher(&self, data: CreateTeacher) -> AppResult<Teacher> {
        data.validate()?;
        let mut store = self.state.store().write().await;
        let teacher = store.insert_teacher(Teacher::new(data));
        store.log_activity(Activity::new(
            ActivityKind::Teacher,
            format!("New teacher {} added", teacher.name),
        ));
        tracing::info!(teacher_id = %teacher.id, actor = %self.actor.id, "teacher created");
        Ok(teacher)
    }

    async fn update_teacher(&self, id: Uuid, data: UpdateTeacher) -> AppResult<Teacher> {
        data.validate()?;
        let mut store = self.state.store().write().await;
        let teacher = store.update_teacher(id, data)?;
        tracing::debug!(teacher_id = %id, "teacher updated");
        Ok(teacher)
    }

    async fn delete_teacher(&self, id: Uuid) -> AppResult<()> {
        let mut store = self.state.store().write().await;
        if let Some(teacher) = store.remove_teacher(id) {
            store.log_activity(Activity::new(
                ActivityKind::Teacher,
                format!("Teacher {} removed", teacher.name),
            ));
            tracing::info!(teacher_id = %id, actor = %self.actor.id, "teacher removed");
        }
        Ok(())
    }

    async fn get_teacher(&self, id: Uuid) -> AppResult<Teacher> {
        self.state.store().read().await.teacher(id).ok_or_not_found()
    }

    async fn list_teachers(&self) -> AppResult<Vec<Teacher>> {
        Ok(self.state.store().read().await.teachers())
    }

    async fn create_student(&self, data: CreateStudent) -> AppResult<Student> {
        data.validate()?;
        let mut store = self.state.store().write().await;
        let student = store.insert_student(Student::new(data))?;
        store.log_activity(Activity::new(
            ActivityKind::Registration,
            format!("{} registered for {}", student.name, student.course),
        ));
        tracing::info!(student_id = %student.id, actor = %self.actor.id, "student registered");
        Ok(student)
    }

    async fn update_student(&self, id: Uuid, data: UpdateStudent) -> AppResult<Student> {
        data.validate()?;
        let mut store = self.state.store().write().await;
        let student = store.update_student(id, data)?;
        tracing::debug!(student_id = %id, "student updated");
        Ok(student)
    }

    async fn delete_student(&self, id: Uuid) -> AppResult<()> {
        let mut store = self.state.store().write().await;
        if let Some(student) = store.remove_student(id) {
            store.log_activity(Activity::new(
                ActivityKind::Registration,
                format!("Student {} removed", student.name),
            ));
            tracing::info!(student_id = %id, actor = %self.actor.id, "student removed");
        }
        Ok(())
    }

    async fn get_student(&self, id: Uuid) -> AppResult<Student> {
        self.state.store().read().await.student(id).ok_or_not_found()
    }

    async fn list_students(&self) -> AppResult<Vec<Student>> {
        Ok(self.state.store().read().await.students())
    }

    async fn set_student_group(
        &self,
        student_id: Uuid,
        group_id: Option<Uuid>,
    ) -> AppResult<Student> {
        let mut store = self.state.store().write().await;
        let student = store.set_student_group(student_id, group_id)?;
        tracing::debug!(student_id = %student_id, ?group_id, "student group changed");
        Ok(student)
    }

    async fn add_payment(&self, data: CreatePayment) -> AppResult<Payment> {
        data.validate()?;
        let mut store = self.state.store().write().await;
        // denormalized snapshot of the current name; not re-synced later
        let student = store.student(data.student_id).ok_or_not_found()?;
        let payment = store.insert_payment(Payment::new(data, student.name));
        store.log_activity(Activity::new(
            ActivityKind::Payment,
            format!("Payment received from {}", payment.student_name),
        ));
        tracing::info!(payment_id = %payment.id, actor = %self.actor.id, "payment recorded");
        Ok(payment)
    }

    async fn update_payment(&self, id: Uuid, data: UpdatePayment) -> AppResult<Payment> {
        data.validate()?;
        let mut store = self.state.store().write().await;
        store.update_payment(id, data)
    }

    async fn list_payments(&self) -> AppResult<Vec<Payment>> {
        Ok(self.state.store().read().await.payments())
    }

    async fn add_product(&self, data: CreateProduct) -> AppResult<Product> {
        data.validate()?;
        let mut store = self.state.store().write().await;
        let product = store.insert_product(Product::new(data));
        store.log_activity(Activity::new(
            ActivityKind::Product,
            format!("{} added to shop", product.name),
        ));
        tracing::info!(product_id = %product.id, actor = %self.actor.id, "product added");
        Ok(product)
    }

    async fn update_product(&self, id: Uuid, data: UpdateProduct) -> AppResult<Product> {
        data.validate()?;
        let mut store = self.state.store().write().await;
        store.update_product(id, data)
    }

    async fn delete_product(&self, id: Uuid) -> AppResult<()> {
        let mut store = self.state.store().write().await;
        if let Some(product) = store.remove_product(id) {
            store.log_activity(Activity::new(
                ActivityKind::Product,
                format!("{} removed from shop", product.name),
            ));
            tracing::info!(product_id = %id, actor = %self.actor.id, "product removed");
        }
        Ok(())
    }

    async fn list_products(&self) -> AppResult<Vec<Product>> {
        Ok(self.state.store().read().await.products())
    }

    async fn recent_activity(&self) -> AppResult<Vec<Activity>> {
        Ok(self.state.store().read().await.activities())
    }
}
