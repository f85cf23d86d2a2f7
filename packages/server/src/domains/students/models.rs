use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

/// Student profile - SQL persistence layer
///
/// Credentials live in the linked account; participations reference the
/// student directly.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: Uuid,
    pub student_code: String,
    pub full_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub class_id: Uuid,
    pub account_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Student row joined with account, class and latest score record
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentOverview {
    pub id: Uuid,
    pub student_code: String,
    pub full_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub class_id: Uuid,
    pub class_name: String,
    pub email: String,
    pub latest_total: Option<i32>,
    pub latest_classification: Option<String>,
}

impl Student {
    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM students WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_code(code: &str, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM students WHERE student_code = $1")
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_account(
        account_id: Uuid,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM students WHERE account_id = $1")
            .bind(account_id)
            .fetch_optional(pool)
            .await
    }

    /// List all students with account email, class name and their most
    /// recent score record (by academic year).
    pub async fn list(pool: &PgPool) -> Result<Vec<StudentOverview>, sqlx::Error> {
        sqlx::query_as::<_, StudentOverview>(
            "SELECT s.id, s.student_code, s.full_name, s.date_of_birth, s.gender,
                    s.class_id, c.name AS class_name, a.email,
                    latest.total AS latest_total,
                    latest.classification::text AS latest_classification
             FROM students s
             JOIN classes c ON c.id = s.class_id
             JOIN accounts a ON a.id = s.account_id
             LEFT JOIN LATERAL (
                 SELECT r.total, r.classification
                 FROM score_records r
                 JOIN semesters sem ON sem.id = r.semester_id
                 WHERE r.student_id = s.id
                 ORDER BY sem.academic_year DESC
                 LIMIT 1
             ) latest ON true
             ORDER BY s.student_code",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn list_by_class(
        class_id: Uuid,
        pool: &PgPool,
    ) -> Result<Vec<StudentOverview>, sqlx::Error> {
        sqlx::query_as::<_, StudentOverview>(
            "SELECT s.id, s.student_code, s.full_name, s.date_of_birth, s.gender,
                    s.class_id, c.name AS class_name, a.email,
                    NULL::int AS latest_total,
                    NULL::text AS latest_classification
             FROM students s
             JOIN classes c ON c.id = s.class_id
             JOIN accounts a ON a.id = s.account_id
             WHERE s.class_id = $1
             ORDER BY s.student_code",
        )
        .bind(class_id)
        .fetch_all(pool)
        .await
    }

    pub async fn update(
        id: Uuid,
        student_code: &str,
        full_name: &str,
        date_of_birth: Option<NaiveDate>,
        gender: Option<&str>,
        class_id: Uuid,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "UPDATE students
             SET student_code = $2, full_name = $3, date_of_birth = $4,
                 gender = $5, class_id = $6
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(student_code)
        .bind(full_name)
        .bind(date_of_birth)
        .bind(gender)
        .bind(class_id)
        .fetch_optional(pool)
        .await
    }
}
