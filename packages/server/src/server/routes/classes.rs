use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::ApiError;
use crate::domains::classes::models::{Class, ClassSummary};
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;

/// GET /api/classes - classes with their student counts
pub async fn list(
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<ClassSummary>>, ApiError> {
    Ok(Json(Class::list(&state.db_pool).await?))
}

#[derive(Deserialize)]
pub struct CreateClassRequest {
    pub name: String,
    pub faculty: String,
}

/// POST /api/classes
pub async fn create(
    user: AuthUser,
    Extension(state): Extension<AppState>,
    Json(payload): Json<CreateClassRequest>,
) -> Result<(StatusCode, Json<Class>), ApiError> {
    user.require_admin()?;
    let class = Class::insert(&payload.name, &payload.faculty, &state.db_pool).await?;
    Ok((StatusCode::CREATED, Json(class)))
}

/// DELETE /api/classes/:id
pub async fn remove(
    user: AuthUser,
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    user.require_admin()?;
    let deleted = Class::delete(id, &state.db_pool)
        .await
        .map_err(|e| ApiError::from_delete(e, "Class still has students"))?;
    if !deleted {
        return Err(ApiError::NotFound("Class"));
    }
    Ok(Json(json!({ "message": "Class deleted successfully" })))
}
