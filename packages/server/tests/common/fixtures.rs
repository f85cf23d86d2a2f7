//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods directly. Identifiers are
//! randomized so tests sharing one database never collide.

use anyhow::Result;
use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use api_core::domains::activities::models::{Activity, CriteriaCategory};
use api_core::domains::classes::models::Class;
use api_core::domains::semesters::models::Semester;
use api_core::domains::students::actions::create_student;
use api_core::domains::students::models::Student;

pub async fn create_test_class(pool: &PgPool) -> Result<Class> {
    let class = Class::insert(
        &format!("SE-{}", short_tag()),
        "Information Technology",
        pool,
    )
    .await?;
    Ok(class)
}

/// Create a student (account plus profile) in a test class.
pub async fn create_test_student(pool: &PgPool, class_id: Uuid) -> Result<Student> {
    let tag = short_tag();
    let student = create_student(
        &format!("SV{}", tag),
        "Test Student",
        &format!("student-{}@example.edu", tag),
        "password123",
        None,
        None,
        class_id,
        pool,
    )
    .await?;
    Ok(student)
}

/// Create a semester; not marked current.
pub async fn create_test_semester(pool: &PgPool, academic_year: &str) -> Result<Semester> {
    let semester = Semester::insert(
        &format!("Semester {}", short_tag()),
        academic_year,
        Utc::now(),
        Utc::now() + Duration::days(120),
        pool,
    )
    .await?;
    Ok(semester)
}

pub async fn create_test_activity(
    pool: &PgPool,
    semester_id: Uuid,
    point_value: i32,
) -> Result<Activity> {
    let activity = Activity::insert(
        &format!("Activity {}", short_tag()),
        Some("Test activity"),
        Utc::now(),
        None,
        Some("Campus"),
        point_value,
        CriteriaCategory::Extracurricular,
        semester_id,
        pool,
    )
    .await?;
    Ok(activity)
}

fn short_tag() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}
