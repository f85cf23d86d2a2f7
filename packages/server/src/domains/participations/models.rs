use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domains::activities::models::CriteriaCategory;

/// Lifecycle of a registration: PENDING is the initial state, APPROVED and
/// REJECTED are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "participation_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ParticipationStatus {
    /// Whether a review may move a record from `self` to `target`.
    ///
    /// Only PENDING records can be decided, and a decision must be terminal;
    /// re-approving or un-approving is not a legal move.
    pub fn can_transition_to(self, target: ParticipationStatus) -> bool {
        self == ParticipationStatus::Pending
            && matches!(
                target,
                ParticipationStatus::Approved | ParticipationStatus::Rejected
            )
    }
}

/// Participation - one (student, activity) registration with a status
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Participation {
    pub id: Uuid,
    pub student_id: Uuid,
    pub activity_id: Uuid,
    pub status: ParticipationStatus,
    pub proof: Option<String>,
    pub registered_at: DateTime<Utc>,
}

/// Participation joined with its activity, for listings and scoring context
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipationDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub participation: Participation,
    pub activity_name: String,
    pub point_value: i32,
    pub category: CriteriaCategory,
    pub semester_id: Uuid,
}

/// Participation joined with student and activity, for the admin review list
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipationReviewRow {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub participation: Participation,
    pub student_code: String,
    pub student_name: String,
    pub class_name: String,
    pub activity_name: String,
    pub point_value: i32,
}

impl Participation {
    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM participations WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a PENDING record if the (student, activity) pair is new.
    ///
    /// Returns `None` when the pair already exists - the unique constraint
    /// is the authority, so a concurrent duplicate cannot slip through.
    pub async fn insert_pending(
        student_id: Uuid,
        activity_id: Uuid,
        proof: Option<&str>,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO participations (id, student_id, activity_id, status, proof)
             VALUES ($1, $2, $3, 'PENDING', $4)
             ON CONFLICT (student_id, activity_id) DO NOTHING
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(student_id)
        .bind(activity_id)
        .bind(proof)
        .fetch_optional(pool)
        .await
    }

    /// Decide a PENDING record.
    ///
    /// The `status = 'PENDING'` guard makes the transition atomic: a record
    /// that was already decided is left untouched and `None` comes back.
    pub async fn decide_if_pending(
        id: Uuid,
        target: ParticipationStatus,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "UPDATE participations SET status = $2
             WHERE id = $1 AND status = 'PENDING'
             RETURNING *",
        )
        .bind(id)
        .bind(target)
        .fetch_optional(pool)
        .await
    }

    pub async fn list_by_student(
        student_id: Uuid,
        pool: &PgPool,
    ) -> Result<Vec<ParticipationDetail>, sqlx::Error> {
        sqlx::query_as::<_, ParticipationDetail>(
            "SELECT p.*, a.name AS activity_name, a.point_value, a.category, a.semester_id
             FROM participations p
             JOIN activities a ON a.id = p.activity_id
             WHERE p.student_id = $1
             ORDER BY p.registered_at DESC",
        )
        .bind(student_id)
        .fetch_all(pool)
        .await
    }

    /// Admin review list, optionally filtered by status
    pub async fn list_all(
        status: Option<ParticipationStatus>,
        pool: &PgPool,
    ) -> Result<Vec<ParticipationReviewRow>, sqlx::Error> {
        sqlx::query_as::<_, ParticipationReviewRow>(
            "SELECT p.*, s.student_code, s.full_name AS student_name,
                    c.name AS class_name, a.name AS activity_name, a.point_value
             FROM participations p
             JOIN students s ON s.id = p.student_id
             JOIN classes c ON c.id = s.class_id
             JOIN activities a ON a.id = p.activity_id
             WHERE $1::participation_status IS NULL OR p.status = $1
             ORDER BY p.registered_at DESC",
        )
        .bind(status)
        .fetch_all(pool)
        .await
    }

    pub async fn exists_for_activity(
        activity_id: Uuid,
        pool: &PgPool,
    ) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM participations WHERE activity_id = $1)",
        )
        .bind(activity_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_can_be_decided() {
        assert!(ParticipationStatus::Pending.can_transition_to(ParticipationStatus::Approved));
        assert!(ParticipationStatus::Pending.can_transition_to(ParticipationStatus::Rejected));
    }

    #[test]
    fn decided_records_are_terminal() {
        for decided in [ParticipationStatus::Approved, ParticipationStatus::Rejected] {
            assert!(!decided.can_transition_to(ParticipationStatus::Approved));
            assert!(!decided.can_transition_to(ParticipationStatus::Rejected));
            assert!(!decided.can_transition_to(ParticipationStatus::Pending));
        }
    }

    #[test]
    fn pending_is_not_a_decision() {
        assert!(!ParticipationStatus::Pending.can_transition_to(ParticipationStatus::Pending));
    }
}
