//! Student lifecycle actions - account and profile are created and removed
//! together.

use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::common::ApiError;
use crate::domains::auth::models::{Account, Role};
use crate::domains::auth::password::hash_password;
use crate::domains::students::models::Student;

/// Create a student: one account plus one profile, in a single transaction.
///
/// Fails with `Conflict` when the email or student code is already taken.
#[allow(clippy::too_many_arguments)]
pub async fn create_student(
    student_code: &str,
    full_name: &str,
    email: &str,
    password: &str,
    date_of_birth: Option<NaiveDate>,
    gender: Option<&str>,
    class_id: Uuid,
    pool: &PgPool,
) -> Result<Student, ApiError> {
    if Account::find_by_email(email, pool).await?.is_some() {
        return Err(ApiError::Conflict("Email already exists".to_string()));
    }
    if Student::find_by_code(student_code, pool).await?.is_some() {
        return Err(ApiError::Conflict("Student ID already exists".to_string()));
    }

    let mut tx = pool.begin().await?;

    let account = Account::insert(email, &hash_password(password), Role::Student, &mut *tx)
        .await
        .map_err(|e| ApiError::from_write(e, "Email already exists", "Account"))?;

    let student = sqlx::query_as::<_, Student>(
        "INSERT INTO students (id, student_code, full_name, date_of_birth, gender, class_id, account_id)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(student_code)
    .bind(full_name)
    .bind(date_of_birth)
    .bind(gender)
    .bind(class_id)
    .bind(account.id)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| ApiError::from_write(e, "Student ID already exists", "Class"))?;

    tx.commit().await?;

    info!(student_id = %student.id, code = %student.student_code, "Student created");
    Ok(student)
}

/// Delete a student and its account in one transaction
pub async fn delete_student(id: Uuid, pool: &PgPool) -> Result<(), ApiError> {
    let student = Student::find_by_id(id, pool)
        .await?
        .ok_or(ApiError::NotFound("Student"))?;

    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM students WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM accounts WHERE id = $1")
        .bind(student.account_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!(student_id = %id, "Student deleted");
    Ok(())
}
