use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

/// Semester - SQL persistence layer
///
/// At most one semester carries `is_current = true`; the flag is only
/// flipped through [`super::actions::set_current`].
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Semester {
    pub id: Uuid,
    pub name: String,
    pub academic_year: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub is_current: bool,
}

impl Semester {
    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM semesters WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_current(pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM semesters WHERE is_current")
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM semesters ORDER BY academic_year DESC, starts_at DESC",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn insert(
        name: &str,
        academic_year: &str,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        pool: &PgPool,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO semesters (id, name, academic_year, starts_at, ends_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(academic_year)
        .bind(starts_at)
        .bind(ends_at)
        .fetch_one(pool)
        .await
    }
}
