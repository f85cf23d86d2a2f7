use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domains::scores::engine::Classification;

/// Materialized per-(student, semester) score.
///
/// Written only by [`super::aggregator::recompute`]; everything here is
/// derived from the approved participation set and can be rebuilt at any
/// time.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub id: Uuid,
    pub student_id: Uuid,
    pub semester_id: Uuid,
    pub total: i32,
    pub classification: Classification,
    pub breakdown: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

impl ScoreRecord {
    pub async fn find_by_pair(
        student_id: Uuid,
        semester_id: Uuid,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM score_records WHERE student_id = $1 AND semester_id = $2",
        )
        .bind(student_id)
        .bind(semester_id)
        .fetch_optional(pool)
        .await
    }

    /// Replace the record for the pair wholesale.
    ///
    /// The unique (student_id, semester_id) key backs the upsert, so two
    /// writers can never produce two rows for one pair. `updated_at` only
    /// moves when the derived values actually change, which keeps repeated
    /// recomputes truly idempotent (identical row out).
    pub async fn upsert(
        student_id: Uuid,
        semester_id: Uuid,
        total: i32,
        classification: Classification,
        breakdown: &serde_json::Value,
        pool: &PgPool,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO score_records (id, student_id, semester_id, total, classification, breakdown)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (student_id, semester_id) DO UPDATE
             SET total = EXCLUDED.total,
                 classification = EXCLUDED.classification,
                 breakdown = EXCLUDED.breakdown,
                 updated_at = CASE
                     WHEN score_records.total = EXCLUDED.total
                      AND score_records.classification = EXCLUDED.classification
                      AND score_records.breakdown = EXCLUDED.breakdown
                     THEN score_records.updated_at
                     ELSE now()
                 END
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(student_id)
        .bind(semester_id)
        .bind(total)
        .bind(classification)
        .bind(breakdown)
        .fetch_one(pool)
        .await
    }
}
