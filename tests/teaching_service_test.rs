//! Teaching service integration tests: groups, lessons, attendance cascade
//! and upsert behavior, points and marks.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use uuid::Uuid;

use educrm_core::domain::{
    Actor, AttendanceStatus, CreateGroup, CreateLesson, CreateMark, CreatePointEntry,
    CreateStudent, Group, LessonDay, UpdateGroup, UserRole,
};
use educrm_core::errors::AppError;
use educrm_core::infra::AppState;
use educrm_core::metrics;
use educrm_core::services::{AdminManager, AdminService, TeachingManager, TeachingService};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

/// Admin and teaching services over one shared store
fn services() -> (AdminManager, TeachingManager) {
    let state = AppState::new();
    let actor = Actor::new(Uuid::new_v4(), "John Teacher", UserRole::Teacher);
    (
        AdminManager::new(state.clone(), actor.clone()),
        TeachingManager::new(state, actor),
    )
}

fn create_student_data(name: &str) -> CreateStudent {
    CreateStudent {
        name: name.to_string(),
        email: "student@educrm.com".to_string(),
        phone: "+1234567891".to_string(),
        course: "Mathematics".to_string(),
        fee: dec!(450),
        join_date: date("2024-01-10"),
        status: Default::default(),
        payment_status: Default::default(),
        group_id: None,
    }
}

fn create_group_data(name: &str) -> CreateGroup {
    CreateGroup {
        name: name.to_string(),
        subject: "Mathematics".to_string(),
        lesson_time: "09:00 - 10:30".to_string(),
        lesson_days: vec![LessonDay::Monday, LessonDay::Wednesday],
        student_ids: vec![],
    }
}

fn create_lesson_data(group: &Group, topic: &str, date_str: &str) -> CreateLesson {
    CreateLesson {
        group_id: group.id,
        topic: topic.to_string(),
        date: date(date_str),
        homework: String::new(),
    }
}

#[tokio::test]
async fn test_group_occupancy_scenario() {
    let (admin, teaching) = services();

    let group = teaching
        .create_group(create_group_data("Math A"))
        .await
        .unwrap();
    assert_eq!(metrics::occupancy(&group), 0);

    let s1 = admin
        .create_student(create_student_data("Alice Johnson"))
        .await
        .unwrap();
    let s2 = admin
        .create_student(create_student_data("Bob Smith"))
        .await
        .unwrap();

    let group = teaching
        .assign_students_to_group(group.id, vec![s1.id, s2.id])
        .await
        .unwrap();
    assert_eq!(metrics::occupancy(&group), 2);

    // both sides of the membership agree
    assert_eq!(admin.get_student(s1.id).await.unwrap().group_id, Some(group.id));
    assert_eq!(admin.get_student(s2.id).await.unwrap().group_id, Some(group.id));
}

#[tokio::test]
async fn test_assignment_moves_membership_both_sides() {
    let (admin, teaching) = services();
    let group_a = teaching
        .create_group(create_group_data("Math A"))
        .await
        .unwrap();
    let group_b = teaching
        .create_group(create_group_data("Math B"))
        .await
        .unwrap();
    let student = admin
        .create_student(create_student_data("Alice Johnson"))
        .await
        .unwrap();

    teaching
        .assign_students_to_group(group_a.id, vec![student.id])
        .await
        .unwrap();
    teaching
        .assign_students_to_group(group_b.id, vec![student.id])
        .await
        .unwrap();

    assert!(teaching
        .get_group(group_a.id)
        .await
        .unwrap()
        .student_ids
        .is_empty());
    assert_eq!(
        teaching.get_group(group_b.id).await.unwrap().student_ids,
        vec![student.id]
    );
    assert_eq!(
        admin.get_student(student.id).await.unwrap().group_id,
        Some(group_b.id)
    );

    // wholesale removal clears the back reference too
    teaching
        .assign_students_to_group(group_b.id, vec![])
        .await
        .unwrap();
    assert_eq!(admin.get_student(student.id).await.unwrap().group_id, None);
}

#[tokio::test]
async fn test_assignment_rejects_bad_member_lists() {
    let (admin, teaching) = services();
    let group = teaching
        .create_group(create_group_data("Math A"))
        .await
        .unwrap();
    let student = admin
        .create_student(create_student_data("Alice Johnson"))
        .await
        .unwrap();

    let duplicate = teaching
        .assign_students_to_group(group.id, vec![student.id, student.id])
        .await;
    assert!(matches!(duplicate.unwrap_err(), AppError::Validation(_)));

    let unknown = teaching
        .assign_students_to_group(group.id, vec![Uuid::new_v4()])
        .await;
    assert!(matches!(unknown.unwrap_err(), AppError::NotFound));

    // failed assignments leave the group untouched
    assert!(teaching
        .get_group(group.id)
        .await
        .unwrap()
        .student_ids
        .is_empty());
}

#[tokio::test]
async fn test_delete_group_cascades() {
    let (admin, teaching) = services();
    let group = teaching
        .create_group(create_group_data("Math A"))
        .await
        .unwrap();
    let student = admin
        .create_student(create_student_data("Alice Johnson"))
        .await
        .unwrap();
    teaching
        .assign_students_to_group(group.id, vec![student.id])
        .await
        .unwrap();

    let lesson = teaching
        .create_lesson(create_lesson_data(&group, "Introduction to Algebra", "2024-01-15"))
        .await
        .unwrap();
    teaching
        .create_lesson(create_lesson_data(&group, "Linear Equations", "2024-01-17"))
        .await
        .unwrap();
    teaching
        .record_attendance(
            lesson.id,
            group.id,
            student.id,
            date("2024-01-15"),
            AttendanceStatus::Present,
        )
        .await
        .unwrap();

    teaching.delete_group(group.id).await.unwrap();

    assert!(matches!(
        teaching.get_group(group.id).await.unwrap_err(),
        AppError::NotFound
    ));
    assert!(teaching.lessons_for_group(group.id).await.unwrap().is_empty());
    assert!(teaching
        .attendance_for_lesson(lesson.id)
        .await
        .unwrap()
        .is_empty());
    // the member is no longer referenced by the deleted group
    assert_eq!(admin.get_student(student.id).await.unwrap().group_id, None);

    // deleting again is a silent no-op
    teaching.delete_group(group.id).await.unwrap();
}

#[tokio::test]
async fn test_update_group_not_found() {
    let (_admin, teaching) = services();
    let result = teaching
        .update_group(
            Uuid::new_v4(),
            UpdateGroup {
                name: Some("Ghost".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn test_record_attendance_upserts() {
    let (admin, teaching) = services();
    let group = teaching
        .create_group(create_group_data("Math A"))
        .await
        .unwrap();
    let student = admin
        .create_student(create_student_data("Alice Johnson"))
        .await
        .unwrap();
    let lesson = teaching
        .create_lesson(create_lesson_data(&group, "Introduction to Algebra", "2024-01-15"))
        .await
        .unwrap();

    teaching
        .record_attendance(
            lesson.id,
            group.id,
            student.id,
            date("2024-01-15"),
            AttendanceStatus::Present,
        )
        .await
        .unwrap();
    teaching
        .record_attendance(
            lesson.id,
            group.id,
            student.id,
            date("2024-01-15"),
            AttendanceStatus::Late,
        )
        .await
        .unwrap();

    let records = teaching.attendance_for_lesson(lesson.id).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, AttendanceStatus::Late);
}

#[tokio::test]
async fn test_delete_lesson_cascades_attendance() {
    let (admin, teaching) = services();
    let group = teaching
        .create_group(create_group_data("Math A"))
        .await
        .unwrap();
    let student = admin
        .create_student(create_student_data("Alice Johnson"))
        .await
        .unwrap();
    let lesson = teaching
        .create_lesson(create_lesson_data(&group, "Introduction to Algebra", "2024-01-15"))
        .await
        .unwrap();
    teaching
        .record_attendance(
            lesson.id,
            group.id,
            student.id,
            date("2024-01-15"),
            AttendanceStatus::Present,
        )
        .await
        .unwrap();

    teaching.delete_lesson(lesson.id).await.unwrap();

    assert!(teaching
        .attendance_for_lesson(lesson.id)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(teaching.group_attendance_rate(group.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_attendance_rates() {
    let (admin, teaching) = services();
    let group = teaching
        .create_group(create_group_data("Math A"))
        .await
        .unwrap();
    let lesson = teaching
        .create_lesson(create_lesson_data(&group, "Introduction to Algebra", "2024-01-15"))
        .await
        .unwrap();

    let mut ids = Vec::new();
    for name in ["Alice Johnson", "Bob Smith", "Charlie Davis"] {
        ids.push(
            admin
                .create_student(create_student_data(name))
                .await
                .unwrap()
                .id,
        );
    }
    for (id, status) in ids.iter().zip([
        AttendanceStatus::Present,
        AttendanceStatus::Present,
        AttendanceStatus::Absent,
    ]) {
        teaching
            .record_attendance(lesson.id, group.id, *id, date("2024-01-15"), status)
            .await
            .unwrap();
    }

    // 2 of 3 present: 66.67 rounds half-up to 67
    assert_eq!(teaching.group_attendance_rate(group.id).await.unwrap(), 67);
    assert_eq!(
        teaching
            .student_attendance_rate(group.id, ids[2])
            .await
            .unwrap(),
        0
    );
    // empty record set never divides by zero
    assert_eq!(
        teaching
            .group_attendance_rate(Uuid::new_v4())
            .await
            .unwrap(),
        0
    );
}

#[tokio::test]
async fn test_points_assignment_logs_activity() {
    let (admin, teaching) = services();
    let group = teaching
        .create_group(create_group_data("Math A"))
        .await
        .unwrap();
    let student = admin
        .create_student(create_student_data("Alice Johnson"))
        .await
        .unwrap();

    teaching
        .add_points(CreatePointEntry {
            student_id: student.id,
            group_id: Some(group.id),
            points: 10,
            reason: "Participated actively in class".to_string(),
            date: date("2024-07-20"),
        })
        .await
        .unwrap();

    let entries = teaching.points_for_student(student.id).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].points, 10);
    assert_eq!(teaching.group_average_points(group.id).await.unwrap(), 10);

    let activities = teaching.recent_activity().await.unwrap();
    assert!(activities[0]
        .message
        .contains("Assigned 10 points for \"Participated actively in class\""));
}

#[tokio::test]
async fn test_marks_validation_and_average() {
    let (admin, teaching) = services();
    let group = teaching
        .create_group(create_group_data("Math A"))
        .await
        .unwrap();
    let student = admin
        .create_student(create_student_data("Alice Johnson"))
        .await
        .unwrap();
    let lesson = teaching
        .create_lesson(create_lesson_data(&group, "Introduction to Algebra", "2024-01-15"))
        .await
        .unwrap();

    let out_of_range = teaching
        .add_mark(CreateMark {
            student_id: student.id,
            group_id: group.id,
            lesson_id: lesson.id,
            mark: 11,
            date: date("2024-01-15"),
            comment: None,
        })
        .await;
    assert!(matches!(out_of_range.unwrap_err(), AppError::Validation(_)));

    for mark in [7, 8] {
        teaching
            .add_mark(CreateMark {
                student_id: student.id,
                group_id: group.id,
                lesson_id: lesson.id,
                mark,
                date: date("2024-01-15"),
                comment: Some("Good work".to_string()),
            })
            .await
            .unwrap();
    }

    let marks = teaching.marks_for_student(student.id).await.unwrap();
    assert_eq!(marks.len(), 2);
    // (7 + 8) / 2 = 7.5 rounds half-up to 8
    assert_eq!(metrics::average_mark(&marks), 8);
}
