//! Score aggregator: recomputes a student's semester score from the
//! approved participation set and replaces the stored record wholesale.

use std::collections::HashMap;
use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::common::ApiError;
use crate::domains::scores::engine::{summarize, ApprovedPoints};
use crate::domains::scores::models::ScoreRecord;

/// Per-(student, semester) serialization for recomputes.
///
/// Two concurrent approvals for the same pair must not interleave their
/// read-then-write, or the later writer could persist a stale total. Each
/// key gets its own async mutex; different pairs run in parallel. Entries
/// are evicted once uncontended, so the registry stays proportional to the
/// pairs currently being recomputed, not to every pair ever touched.
#[derive(Default)]
pub struct ScoreLocks {
    inner: Mutex<HashMap<(Uuid, Uuid), Arc<Mutex<()>>>>,
}

impl ScoreLocks {
    pub fn new() -> Self {
        Self::default()
    }

    async fn for_pair(&self, student_id: Uuid, semester_id: Uuid) -> Arc<Mutex<()>> {
        let mut map = self.inner.lock().await;
        map.entry((student_id, semester_id))
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Remove the pair's entry when no other task holds or awaits it.
    ///
    /// Holding the registry lock here means `for_pair` cannot hand out a new
    /// clone mid-check, so the count of two (the map's entry plus the
    /// caller's) is authoritative.
    async fn release(&self, student_id: Uuid, semester_id: Uuid, lock: &Arc<Mutex<()>>) {
        let mut map = self.inner.lock().await;
        if Arc::strong_count(lock) == 2 {
            map.remove(&(student_id, semester_id));
        }
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }
}

/// Recompute and persist the score record for (student, semester).
///
/// Full re-read then single upsert while holding the pair's lock; there is
/// no partial-failure path - if the write fails the previous record stays
/// valid. Safe to call at any time to rebuild the derived view.
pub async fn recompute(
    student_id: Uuid,
    semester_id: Uuid,
    locks: &ScoreLocks,
    pool: &PgPool,
) -> Result<ScoreRecord, ApiError> {
    let lock = locks.for_pair(student_id, semester_id).await;
    let result = {
        let _guard = lock.lock().await;
        recompute_locked(student_id, semester_id, pool).await
    };
    locks.release(student_id, semester_id, &lock).await;
    result
}

async fn recompute_locked(
    student_id: Uuid,
    semester_id: Uuid,
    pool: &PgPool,
) -> Result<ScoreRecord, ApiError> {
    // The join only yields rows whose activity exists; a dangling
    // activity_id is impossible while the FK holds, and would surface as an
    // error here rather than being skipped.
    let approved: Vec<ApprovedPoints> = sqlx::query_as(
        "SELECT a.point_value, a.category
         FROM participations p
         JOIN activities a ON a.id = p.activity_id
         WHERE p.student_id = $1
           AND a.semester_id = $2
           AND p.status = 'APPROVED'",
    )
    .bind(student_id)
    .bind(semester_id)
    .fetch_all(pool)
    .await?;

    let summary = summarize(&approved);
    debug!(
        %student_id, %semester_id,
        approved = approved.len(),
        total = summary.total,
        "Score summarized"
    );

    let breakdown = serde_json::to_value(&summary.breakdown)
        .map_err(|e| ApiError::Internal(e.into()))?;

    let record = ScoreRecord::upsert(
        student_id,
        semester_id,
        summary.total,
        summary.classification,
        &breakdown,
        pool,
    )
    .await?;

    info!(
        %student_id, %semester_id,
        total = record.total,
        classification = record.classification.as_str(),
        "Score record refreshed"
    );

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn uncontended_pair_is_evicted() {
        let locks = ScoreLocks::new();
        let student_id = Uuid::new_v4();
        let semester_id = Uuid::new_v4();

        let lock = locks.for_pair(student_id, semester_id).await;
        {
            let _guard = lock.lock().await;
            assert_eq!(locks.len().await, 1);
        }
        locks.release(student_id, semester_id, &lock).await;
        assert_eq!(locks.len().await, 0);
    }

    #[tokio::test]
    async fn contended_pair_survives_until_last_holder() {
        let locks = ScoreLocks::new();
        let student_id = Uuid::new_v4();
        let semester_id = Uuid::new_v4();

        let first = locks.for_pair(student_id, semester_id).await;
        let second = locks.for_pair(student_id, semester_id).await;

        // Another clone is still out, so the entry stays
        locks.release(student_id, semester_id, &first).await;
        assert_eq!(locks.len().await, 1);

        drop(first);
        locks.release(student_id, semester_id, &second).await;
        assert_eq!(locks.len().await, 0);
    }

    #[tokio::test]
    async fn distinct_pairs_get_distinct_locks() {
        let locks = ScoreLocks::new();
        let student_id = Uuid::new_v4();
        let sem_a = Uuid::new_v4();
        let sem_b = Uuid::new_v4();

        let lock_a = locks.for_pair(student_id, sem_a).await;
        let lock_b = locks.for_pair(student_id, sem_b).await;
        assert!(!Arc::ptr_eq(&lock_a, &lock_b));

        // Holding one pair's guard does not block the other
        let _guard_a = lock_a.lock().await;
        let _guard_b = lock_b.lock().await;
        assert_eq!(locks.len().await, 2);
    }
}
