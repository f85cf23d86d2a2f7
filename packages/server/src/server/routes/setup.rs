//! One-shot bootstrap endpoint: seeds a current semester, a class and an
//! admin login so a fresh deployment is usable. Safe to call repeatedly.

use axum::extract::Extension;
use axum::Json;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use tracing::info;

use crate::common::ApiError;
use crate::domains::auth::models::{Account, Role};
use crate::domains::auth::password::hash_password;
use crate::domains::classes::models::Class;
use crate::domains::semesters::{actions as semester_actions, models::Semester};
use crate::server::app::AppState;

const ADMIN_EMAIL: &str = "admin@example.edu";
const ADMIN_PASSWORD: &str = "admin123";

fn bootstrap_semester_dates() -> Result<(DateTime<Utc>, DateTime<Utc>), ApiError> {
    let starts_at = Utc
        .with_ymd_and_hms(2024, 9, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("invalid bootstrap start date")))?;
    let ends_at = Utc
        .with_ymd_and_hms(2025, 1, 15, 0, 0, 0)
        .single()
        .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("invalid bootstrap end date")))?;
    Ok((starts_at, ends_at))
}

/// GET /api/setup
pub async fn setup_database(
    Extension(state): Extension<AppState>,
) -> Result<Json<Value>, ApiError> {
    let pool = &state.db_pool;

    // Semester
    let semester = match Semester::find_current(pool).await? {
        Some(existing) => existing,
        None => {
            let (starts_at, ends_at) = bootstrap_semester_dates()?;
            let created =
                Semester::insert("Semester 1", "2024-2025", starts_at, ends_at, pool).await?;
            semester_actions::set_current(created.id, pool).await?;
            created
        }
    };

    // Class
    let classes = Class::list(pool).await?;
    let class_id = match classes.first() {
        Some(existing) => existing.id,
        None => {
            Class::insert("SE-K60", "Information Technology", pool)
                .await?
                .id
        }
    };

    // Admin account
    if Account::find_by_email(ADMIN_EMAIL, pool).await?.is_none() {
        let mut tx = pool.begin().await?;
        Account::insert(ADMIN_EMAIL, &hash_password(ADMIN_PASSWORD), Role::Admin, &mut *tx)
            .await?;
        tx.commit().await?;
        info!(email = ADMIN_EMAIL, "Bootstrap admin account created");
    }

    Ok(Json(json!({
        "message": "Setup complete",
        "semesterId": semester.id,
        "classId": class_id,
        "adminEmail": ADMIN_EMAIL,
    })))
}
