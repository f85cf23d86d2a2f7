use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::common::ApiError;

/// Mark one semester as current.
///
/// Clear-all-then-set-one inside a single transaction, so a reader never
/// observes zero or two current semesters.
pub async fn set_current(id: Uuid, pool: &PgPool) -> Result<(), ApiError> {
    let mut tx = pool.begin().await?;

    sqlx::query("UPDATE semesters SET is_current = false WHERE is_current")
        .execute(&mut *tx)
        .await?;

    let updated = sqlx::query("UPDATE semesters SET is_current = true WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if updated.rows_affected() == 0 {
        // Rolls back the clear as well, leaving the previous flag intact.
        tx.rollback().await?;
        return Err(ApiError::NotFound("Semester"));
    }

    tx.commit().await?;

    info!(semester_id = %id, "Current semester updated");
    Ok(())
}
