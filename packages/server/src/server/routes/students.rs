use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::ApiError;
use crate::domains::students::actions;
use crate::domains::students::models::{Student, StudentOverview};
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;

/// GET /api/students - students with account, class and latest score
pub async fn list(
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<StudentOverview>>, ApiError> {
    Ok(Json(Student::list(&state.db_pool).await?))
}

/// GET /api/students/class/:class_id
pub async fn list_by_class(
    Extension(state): Extension<AppState>,
    Path(class_id): Path<Uuid>,
) -> Result<Json<Vec<StudentOverview>>, ApiError> {
    Ok(Json(Student::list_by_class(class_id, &state.db_pool).await?))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    pub student_code: String,
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub class_id: Uuid,
}

/// POST /api/students - account + profile in one transaction
pub async fn create(
    user: AuthUser,
    Extension(state): Extension<AppState>,
    Json(payload): Json<CreateStudentRequest>,
) -> Result<(StatusCode, Json<Student>), ApiError> {
    user.require_admin()?;
    let student = actions::create_student(
        &payload.student_code,
        &payload.full_name,
        &payload.email,
        &payload.password,
        payload.date_of_birth,
        payload.gender.as_deref(),
        payload.class_id,
        &state.db_pool,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(student)))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentRequest {
    pub student_code: String,
    pub full_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub class_id: Uuid,
}

/// PUT /api/students/:id
pub async fn update(
    user: AuthUser,
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStudentRequest>,
) -> Result<Json<Student>, ApiError> {
    user.require_admin()?;
    let student = Student::update(
        id,
        &payload.student_code,
        &payload.full_name,
        payload.date_of_birth,
        payload.gender.as_deref(),
        payload.class_id,
        &state.db_pool,
    )
    .await
    .map_err(|e| ApiError::from_write(e, "Student ID already exists", "Class"))?
    .ok_or(ApiError::NotFound("Student"))?;
    Ok(Json(student))
}

/// DELETE /api/students/:id - removes the account as well
pub async fn remove(
    user: AuthUser,
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    user.require_admin()?;
    actions::delete_student(id, &state.db_pool).await?;
    Ok(Json(json!({ "message": "Student deleted successfully" })))
}
