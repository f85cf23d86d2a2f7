use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Criteria category an activity's points count toward
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "criteria_category", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CriteriaCategory {
    Academic,
    Discipline,
    Extracurricular,
    Skill,
}

impl CriteriaCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            CriteriaCategory::Academic => "ACADEMIC",
            CriteriaCategory::Discipline => "DISCIPLINE",
            CriteriaCategory::Extracurricular => "EXTRACURRICULAR",
            CriteriaCategory::Skill => "SKILL",
        }
    }
}

/// Activity - SQL persistence layer
///
/// Point value is a positive integer; the DB CHECK constraint backs the
/// request-level validation.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub point_value: i32,
    pub category: CriteriaCategory,
    pub semester_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Activity joined with its semester, for listings
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityWithSemester {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub activity: Activity,
    pub semester_name: String,
    pub academic_year: String,
}

impl Activity {
    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM activities WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<ActivityWithSemester>, sqlx::Error> {
        sqlx::query_as::<_, ActivityWithSemester>(
            "SELECT a.*, s.name AS semester_name, s.academic_year
             FROM activities a
             JOIN semesters s ON s.id = a.semester_id
             ORDER BY a.starts_at DESC",
        )
        .fetch_all(pool)
        .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert(
        name: &str,
        description: Option<&str>,
        starts_at: DateTime<Utc>,
        ends_at: Option<DateTime<Utc>>,
        location: Option<&str>,
        point_value: i32,
        category: CriteriaCategory,
        semester_id: Uuid,
        pool: &PgPool,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO activities
                (id, name, description, starts_at, ends_at, location, point_value, category, semester_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(description)
        .bind(starts_at)
        .bind(ends_at)
        .bind(location)
        .bind(point_value)
        .bind(category)
        .bind(semester_id)
        .fetch_one(pool)
        .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        id: Uuid,
        name: &str,
        description: Option<&str>,
        starts_at: DateTime<Utc>,
        ends_at: Option<DateTime<Utc>>,
        location: Option<&str>,
        point_value: i32,
        category: CriteriaCategory,
        semester_id: Uuid,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "UPDATE activities
             SET name = $2, description = $3, starts_at = $4, ends_at = $5,
                 location = $6, point_value = $7, category = $8, semester_id = $9
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(starts_at)
        .bind(ends_at)
        .bind(location)
        .bind(point_value)
        .bind(category)
        .bind(semester_id)
        .fetch_optional(pool)
        .await
    }

    /// Delete an activity; blocked by the participations FK, so records
    /// never orphan.
    pub async fn delete(id: Uuid, pool: &PgPool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM activities WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
