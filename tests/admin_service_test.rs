//! Admin service integration tests.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use uuid::Uuid;

use educrm_core::domain::{
    Actor, CreatePayment, CreateProduct, CreateStudent, CreateTeacher, PaymentMethod,
    PaymentStatus, UpdateStudent, UpdateTeacher, UserRole,
};
use educrm_core::errors::AppError;
use educrm_core::infra::AppState;
use educrm_core::metrics;
use educrm_core::services::{AdminManager, AdminService};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn test_actor() -> Actor {
    Actor::new(Uuid::new_v4(), "Admin User", UserRole::Admin)
}

fn admin() -> AdminManager {
    AdminManager::new(AppState::new(), test_actor())
}

fn create_teacher_data(name: &str) -> CreateTeacher {
    CreateTeacher {
        name: name.to_string(),
        email: "john@educrm.com".to_string(),
        phone: "+1234567890".to_string(),
        subject: "Mathematics".to_string(),
        salary: dec!(2500),
        student_count: 0,
        join_date: date("2024-01-15"),
        status: Default::default(),
    }
}

fn create_student_data(name: &str) -> CreateStudent {
    CreateStudent {
        name: name.to_string(),
        email: "alice@educrm.com".to_string(),
        phone: "+1234567891".to_string(),
        course: "Mathematics".to_string(),
        fee: dec!(500),
        join_date: date("2024-01-10"),
        status: Default::default(),
        payment_status: Default::default(),
        group_id: None,
    }
}

#[tokio::test]
async fn test_create_and_get_teacher() {
    let service = admin();

    let teacher = service
        .create_teacher(create_teacher_data("John Smith"))
        .await
        .unwrap();
    let fetched = service.get_teacher(teacher.id).await.unwrap();

    assert_eq!(fetched.name, "John Smith");
    assert_eq!(fetched.salary, dec!(2500));
    assert!(fetched.is_active());
}

#[tokio::test]
async fn test_update_teacher_not_found() {
    let service = admin();

    let result = service
        .update_teacher(
            Uuid::new_v4(),
            UpdateTeacher {
                name: Some("Ghost".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn test_delete_teacher_is_idempotent() {
    let service = admin();
    let teacher = service
        .create_teacher(create_teacher_data("John Smith"))
        .await
        .unwrap();

    service.delete_teacher(teacher.id).await.unwrap();
    // second delete of the same id is a silent no-op
    service.delete_teacher(teacher.id).await.unwrap();

    assert!(matches!(
        service.get_teacher(teacher.id).await.unwrap_err(),
        AppError::NotFound
    ));
    // only one removal entry was logged
    let removals = service
        .recent_activity()
        .await
        .unwrap()
        .into_iter()
        .filter(|a| a.message.contains("removed"))
        .count();
    assert_eq!(removals, 1);
}

#[tokio::test]
async fn test_create_teacher_rejects_bad_input() {
    let service = admin();

    let mut bad_email = create_teacher_data("John Smith");
    bad_email.email = "not-an-email".to_string();
    assert!(matches!(
        service.create_teacher(bad_email).await.unwrap_err(),
        AppError::Validation(_)
    ));

    let mut negative_salary = create_teacher_data("John Smith");
    negative_salary.salary = dec!(-100);
    assert!(matches!(
        service.create_teacher(negative_salary).await.unwrap_err(),
        AppError::Validation(_)
    ));

    // nothing was created
    assert!(service.list_teachers().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_activity_log_is_newest_first() {
    let service = admin();

    service
        .create_student(create_student_data("Alice Johnson"))
        .await
        .unwrap();
    service
        .create_student(create_student_data("Bob Smith"))
        .await
        .unwrap();

    let activities = service.recent_activity().await.unwrap();
    assert_eq!(activities.len(), 2);
    assert!(activities[0].message.starts_with("Bob Smith"));
    assert!(activities[1].message.starts_with("Alice Johnson"));
}

#[tokio::test]
async fn test_payment_keeps_student_name_snapshot() {
    let service = admin();
    let student = service
        .create_student(create_student_data("Alice Johnson"))
        .await
        .unwrap();

    let payment = service
        .add_payment(CreatePayment {
            student_id: student.id,
            amount: dec!(500),
            date: date("2024-07-01"),
            status: PaymentStatus::Completed,
            method: PaymentMethod::Card,
        })
        .await
        .unwrap();
    assert_eq!(payment.student_name, "Alice Johnson");

    // renaming the student later does not touch the snapshot
    service
        .update_student(
            student.id,
            UpdateStudent {
                name: Some("Alice Brown".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let payments = service.list_payments().await.unwrap();
    assert_eq!(payments[0].student_name, "Alice Johnson");
}

#[tokio::test]
async fn test_payment_for_unknown_student_fails() {
    let service = admin();

    let result = service
        .add_payment(CreatePayment {
            student_id: Uuid::new_v4(),
            amount: dec!(500),
            date: date("2024-07-01"),
            status: PaymentStatus::Completed,
            method: PaymentMethod::Card,
        })
        .await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
    assert!(service.list_payments().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_total_revenue_counts_completed_only() {
    let service = admin();
    let student = service
        .create_student(create_student_data("Alice Johnson"))
        .await
        .unwrap();

    for (amount, status) in [
        (dec!(500), PaymentStatus::Completed),
        (dec!(450), PaymentStatus::Completed),
        (dec!(300), PaymentStatus::Pending),
    ] {
        service
            .add_payment(CreatePayment {
                student_id: student.id,
                amount,
                date: date("2024-07-01"),
                status,
                method: PaymentMethod::Bank,
            })
            .await
            .unwrap();
    }

    let payments = service.list_payments().await.unwrap();
    assert_eq!(metrics::total_revenue(&payments), dec!(950));
}

#[tokio::test]
async fn test_product_crud_and_validation() {
    let service = admin();

    let result = service
        .add_product(CreateProduct {
            name: "Premium Notebook".to_string(),
            description: String::new(),
            price: dec!(-5),
            category: "Stationery".to_string(),
            stock: 50,
            image_url: None,
        })
        .await;
    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));

    let product = service
        .add_product(CreateProduct {
            name: "Premium Notebook".to_string(),
            description: "High-quality notebook for students".to_string(),
            price: dec!(25),
            category: "Stationery".to_string(),
            stock: 50,
            image_url: None,
        })
        .await
        .unwrap();

    service.delete_product(product.id).await.unwrap();
    service.delete_product(product.id).await.unwrap();
    assert!(service.list_products().await.unwrap().is_empty());

    let activities = service.recent_activity().await.unwrap();
    assert!(activities[0].message.contains("removed from shop"));
}
