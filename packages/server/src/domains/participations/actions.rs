//! Participation lifecycle: registration and the review transition that
//! feeds the score aggregator.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::common::ApiError;
use crate::domains::activities::models::Activity;
use crate::domains::participations::models::{Participation, ParticipationStatus};
use crate::domains::scores::aggregator::{self, ScoreLocks};
use crate::domains::students::models::Student;

/// Register a student for an activity.
///
/// The activity must exist and the (student, activity) pair must be new;
/// the duplicate check rides on the unique constraint, so a racing second
/// registration still comes back as `Conflict`.
pub async fn register(
    student_id: Uuid,
    activity_id: Uuid,
    proof: Option<&str>,
    pool: &PgPool,
) -> Result<Participation, ApiError> {
    if Activity::find_by_id(activity_id, pool).await?.is_none() {
        return Err(ApiError::NotFound("Activity"));
    }
    if Student::find_by_id(student_id, pool).await?.is_none() {
        return Err(ApiError::NotFound("Student"));
    }

    // The activity can vanish between the check above and the insert; the FK
    // violation then maps back to NotFound rather than a bare database error.
    let participation = Participation::insert_pending(student_id, activity_id, proof, pool)
        .await
        .map_err(|e| ApiError::from_write(e, "Already registered for this activity", "Activity"))?
        .ok_or_else(|| {
            ApiError::Conflict("Already registered for this activity".to_string())
        })?;

    info!(
        participation_id = %participation.id,
        %student_id, %activity_id,
        "Participation registered"
    );
    Ok(participation)
}

/// Decide a pending participation.
///
/// Only PENDING -> APPROVED and PENDING -> REJECTED are legal; a record
/// that was already decided fails with `InvalidState`. On approval the
/// student's semester score is recomputed synchronously before this
/// returns, so the caller never observes an approved participation whose
/// score record is stale.
pub async fn review(
    id: Uuid,
    target: ParticipationStatus,
    locks: &ScoreLocks,
    pool: &PgPool,
) -> Result<Participation, ApiError> {
    if !ParticipationStatus::Pending.can_transition_to(target) {
        return Err(ApiError::Validation(
            "Status must be APPROVED or REJECTED".to_string(),
        ));
    }

    let Some(participation) = Participation::decide_if_pending(id, target, pool).await? else {
        // Distinguish a missing record from one that was already decided.
        return match Participation::find_by_id(id, pool).await? {
            None => Err(ApiError::NotFound("Participation")),
            Some(existing) => Err(ApiError::InvalidState(format!(
                "Participation is already {:?}",
                existing.status
            ))),
        };
    };

    info!(
        participation_id = %participation.id,
        status = ?participation.status,
        "Participation decided"
    );

    if participation.status == ParticipationStatus::Approved {
        let activity = Activity::find_by_id(participation.activity_id, pool)
            .await?
            .ok_or_else(|| {
                // FK makes this unreachable; a hit means the store lost
                // integrity and the approval must fail loudly.
                tracing::error!(
                    participation_id = %participation.id,
                    activity_id = %participation.activity_id,
                    "Approved participation references missing activity"
                );
                ApiError::Internal(anyhow::anyhow!(
                    "participation references missing activity"
                ))
            })?;

        aggregator::recompute(participation.student_id, activity.semester_id, locks, pool)
            .await?;
    }

    Ok(participation)
}
