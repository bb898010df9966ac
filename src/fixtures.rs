//! Seeded demo dataset.
//!
//! A small, internally consistent school: four teachers, three students in
//! two groups, a handful of lessons with attendance, some points, payments
//! and shop products. Used by the runnable demo and by tests that want a
//! populated store.

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use crate::domain::{
    AccountStatus, Activity, ActivityKind, AttendanceStatus, CreateGroup, CreateLesson,
    CreatePayment, CreatePointEntry, CreateProduct, CreateStudent, CreateTeacher, FeeStatus,
    Group, Lesson, LessonDay, Payment, PaymentMethod, PaymentStatus, PointEntry, Product,
    Student, Teacher, TeacherActivity, TeacherActivityKind,
};
use crate::store::EntityStore;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date")
}

fn teacher(name: &str, subject: &str, salary: rust_decimal::Decimal, students: u32) -> Teacher {
    Teacher::new(CreateTeacher {
        name: name.to_string(),
        email: format!(
            "{}@educrm.com",
            name.split_whitespace().next().unwrap_or(name).to_lowercase()
        ),
        phone: "+1234567890".to_string(),
        subject: subject.to_string(),
        salary,
        student_count: students,
        join_date: date(2024, 1, 15),
        status: AccountStatus::Active,
    })
}

fn student(name: &str, course: &str, fee: rust_decimal::Decimal) -> Student {
    Student::new(CreateStudent {
        name: name.to_string(),
        email: format!(
            "{}@educrm.com",
            name.split_whitespace().next().unwrap_or(name).to_lowercase()
        ),
        phone: "+1234567891".to_string(),
        course: course.to_string(),
        fee,
        join_date: date(2024, 1, 10),
        status: AccountStatus::Active,
        payment_status: FeeStatus::Paid,
        group_id: None,
    })
}

/// Build a populated store the demo and tests can start from
pub fn demo_store() -> EntityStore {
    let mut store = EntityStore::new();

    store.insert_teacher(teacher("John Smith", "Mathematics", dec!(2500), 12));
    store.insert_teacher(teacher("Sarah Johnson", "English", dec!(3000), 15));
    store.insert_teacher(teacher("Mike Wilson", "Science", dec!(1800), 8));
    store.insert_teacher(teacher("Lisa Brown", "History", dec!(2200), 10));

    let alice = store
        .insert_student(student("Alice Johnson", "Mathematics", dec!(500)))
        .expect("fixture student inserts cleanly");
    let bob = store
        .insert_student(student("Bob Smith", "English", dec!(450)))
        .expect("fixture student inserts cleanly");
    let charlie = store
        .insert_student(student("Charlie Davis", "Science", dec!(450)))
        .expect("fixture student inserts cleanly");

    let math_a = store
        .insert_group(Group::new(CreateGroup {
            name: "Math A".to_string(),
            subject: "Mathematics".to_string(),
            lesson_time: "09:00 - 10:30".to_string(),
            lesson_days: vec![LessonDay::Monday, LessonDay::Wednesday],
            student_ids: vec![alice.id, bob.id, charlie.id],
        }))
        .expect("fixture group inserts cleanly");
    let science_a = store
        .insert_group(Group::new(CreateGroup {
            name: "Science A".to_string(),
            subject: "Science".to_string(),
            lesson_time: "11:00 - 12:30".to_string(),
            lesson_days: vec![LessonDay::Tuesday, LessonDay::Thursday],
            student_ids: vec![],
        }))
        .expect("fixture group inserts cleanly");

    let algebra = store.insert_lesson(Lesson::new(CreateLesson {
        group_id: math_a.id,
        topic: "Introduction to Algebra".to_string(),
        date: date(2024, 1, 15),
        homework: "Complete exercises 1-10 in Chapter 2".to_string(),
    }));
    store.insert_lesson(Lesson::new(CreateLesson {
        group_id: math_a.id,
        topic: "Linear Equations".to_string(),
        date: date(2024, 1, 17),
        homework: "Solve problems 1-15 in workbook".to_string(),
    }));
    let newton = store.insert_lesson(Lesson::new(CreateLesson {
        group_id: science_a.id,
        topic: "Newton's Laws of Motion".to_string(),
        date: date(2024, 1, 16),
        homework: "Read Chapter 3 and answer questions".to_string(),
    }));

    store.upsert_attendance(
        algebra.id,
        math_a.id,
        alice.id,
        date(2024, 1, 15),
        AttendanceStatus::Present,
    );
    store.upsert_attendance(
        algebra.id,
        math_a.id,
        bob.id,
        date(2024, 1, 15),
        AttendanceStatus::Present,
    );
    store.upsert_attendance(
        algebra.id,
        math_a.id,
        charlie.id,
        date(2024, 1, 15),
        AttendanceStatus::Absent,
    );
    store.upsert_attendance(
        newton.id,
        science_a.id,
        alice.id,
        date(2024, 1, 16),
        AttendanceStatus::Present,
    );
    store.upsert_attendance(
        newton.id,
        science_a.id,
        bob.id,
        date(2024, 1, 16),
        AttendanceStatus::Late,
    );

    store.append_points(PointEntry::new(CreatePointEntry {
        student_id: alice.id,
        group_id: Some(math_a.id),
        points: 10,
        reason: "Participated actively in class".to_string(),
        date: date(2024, 7, 20),
    }));
    store.append_points(PointEntry::new(CreatePointEntry {
        student_id: bob.id,
        group_id: Some(math_a.id),
        points: 5,
        reason: "Completed extra homework".to_string(),
        date: date(2024, 7, 22),
    }));

    store.insert_payment(Payment::new(
        CreatePayment {
            student_id: alice.id,
            amount: dec!(500),
            date: date(2024, 7, 1),
            status: PaymentStatus::Completed,
            method: PaymentMethod::Card,
        },
        alice.name.clone(),
    ));
    store.insert_payment(Payment::new(
        CreatePayment {
            student_id: bob.id,
            amount: dec!(450),
            date: date(2024, 7, 15),
            status: PaymentStatus::Pending,
            method: PaymentMethod::Cash,
        },
        bob.name.clone(),
    ));

    store.insert_product(Product::new(CreateProduct {
        name: "Premium Notebook".to_string(),
        description: "High-quality notebook for students".to_string(),
        price: dec!(25),
        category: "Stationery".to_string(),
        stock: 50,
        image_url: Some("/notebook.png".to_string()),
    }));
    store.insert_product(Product::new(CreateProduct {
        name: "Scientific Calculator".to_string(),
        description: "Advanced calculator for math classes".to_string(),
        price: dec!(85),
        category: "Electronics".to_string(),
        stock: 20,
        image_url: Some("/scientific-calculator.webp".to_string()),
    }));

    // logged oldest first so the logs read newest first
    store.log_activity(Activity::new(
        ActivityKind::Product,
        "Premium notebook added to shop",
    ));
    store.log_activity(Activity::new(
        ActivityKind::Payment,
        "Monthly fee payment from Bob Smith",
    ));
    store.log_activity(Activity::new(
        ActivityKind::Registration,
        "Alice Johnson registered for Math class",
    ));
    store.log_teacher_activity(TeacherActivity::new(
        TeacherActivityKind::Attendance,
        "Attendance taken Math A - 2/3 students present",
    ));
    store.log_teacher_activity(TeacherActivity::new(
        TeacherActivityKind::Lesson,
        "Introduction to Algebra - Math A group lesson completed",
    ));

    store
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_store_is_consistent() {
        let store = demo_store();
        // every group member points back at its group
        for group in store.groups() {
            for student_id in &group.student_ids {
                let student = store.student(*student_id).expect("member exists");
                assert_eq!(student.group_id, Some(group.id));
            }
        }
        assert_eq!(store.teachers().len(), 4);
        assert_eq!(store.lessons().len(), 3);
        assert_eq!(store.attendance_records().len(), 5);
    }
}
