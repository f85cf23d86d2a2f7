use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::ApiError;
use crate::domains::semesters::{actions, models::Semester};
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;

/// GET /api/semesters - newest academic year first
pub async fn list(Extension(state): Extension<AppState>) -> Result<Json<Vec<Semester>>, ApiError> {
    Ok(Json(Semester::list(&state.db_pool).await?))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSemesterRequest {
    pub name: String,
    pub academic_year: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

/// POST /api/semesters
pub async fn create(
    user: AuthUser,
    Extension(state): Extension<AppState>,
    Json(payload): Json<CreateSemesterRequest>,
) -> Result<(StatusCode, Json<Semester>), ApiError> {
    user.require_admin()?;
    let semester = Semester::insert(
        &payload.name,
        &payload.academic_year,
        payload.starts_at,
        payload.ends_at,
        &state.db_pool,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(semester)))
}

/// PUT /api/semesters/:id/current - atomic clear-all-then-set-one
pub async fn set_current(
    user: AuthUser,
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    user.require_admin()?;
    actions::set_current(id, &state.db_pool).await?;
    Ok(Json(json!({ "message": "Current semester updated" })))
}
