use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

/// Student class (cohort) - SQL persistence layer
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: Uuid,
    pub name: String,
    pub faculty: String,
    pub created_at: DateTime<Utc>,
}

/// Class with its student count, for listings
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSummary {
    pub id: Uuid,
    pub name: String,
    pub faculty: String,
    pub student_count: i64,
}

impl Class {
    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM classes WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<ClassSummary>, sqlx::Error> {
        sqlx::query_as::<_, ClassSummary>(
            "SELECT c.id, c.name, c.faculty, COUNT(s.id) AS student_count
             FROM classes c
             LEFT JOIN students s ON s.class_id = c.id
             GROUP BY c.id
             ORDER BY c.name",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn insert(name: &str, faculty: &str, pool: &PgPool) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO classes (id, name, faculty) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(faculty)
        .fetch_one(pool)
        .await
    }

    /// Delete a class; returns false if no row matched
    pub async fn delete(id: Uuid, pool: &PgPool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM classes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
