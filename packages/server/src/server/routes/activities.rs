use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::ApiError;
use crate::domains::activities::models::{Activity, ActivityWithSemester, CriteriaCategory};
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;

/// GET /api/activities - newest first, with semester info
pub async fn list(
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<ActivityWithSemester>>, ApiError> {
    Ok(Json(Activity::list(&state.db_pool).await?))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRequest {
    pub name: String,
    pub description: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub point_value: i32,
    pub category: CriteriaCategory,
    pub semester_id: Uuid,
}

impl ActivityRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if self.point_value <= 0 {
            return Err(ApiError::Validation(
                "Point value must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }
}

/// POST /api/activities
pub async fn create(
    user: AuthUser,
    Extension(state): Extension<AppState>,
    Json(payload): Json<ActivityRequest>,
) -> Result<(StatusCode, Json<Activity>), ApiError> {
    user.require_admin()?;
    payload.validate()?;
    let activity = Activity::insert(
        &payload.name,
        payload.description.as_deref(),
        payload.starts_at,
        payload.ends_at,
        payload.location.as_deref(),
        payload.point_value,
        payload.category,
        payload.semester_id,
        &state.db_pool,
    )
    .await
    .map_err(|e| ApiError::from_write(e, "Duplicate activity", "Semester"))?;
    Ok((StatusCode::CREATED, Json(activity)))
}

/// PUT /api/activities/:id
pub async fn update(
    user: AuthUser,
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ActivityRequest>,
) -> Result<Json<Activity>, ApiError> {
    user.require_admin()?;
    payload.validate()?;
    let activity = Activity::update(
        id,
        &payload.name,
        payload.description.as_deref(),
        payload.starts_at,
        payload.ends_at,
        payload.location.as_deref(),
        payload.point_value,
        payload.category,
        payload.semester_id,
        &state.db_pool,
    )
    .await
    .map_err(|e| ApiError::from_write(e, "Duplicate activity", "Semester"))?
    .ok_or(ApiError::NotFound("Activity"))?;
    Ok(Json(activity))
}

/// DELETE /api/activities/:id - refused while participations reference it
pub async fn remove(
    user: AuthUser,
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    user.require_admin()?;
    let deleted = Activity::delete(id, &state.db_pool)
        .await
        .map_err(|e| ApiError::from_delete(e, "Activity has registered participations"))?;
    if !deleted {
        return Err(ApiError::NotFound("Activity"));
    }
    Ok(Json(json!({ "message": "Activity deleted successfully" })))
}
