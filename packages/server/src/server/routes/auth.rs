use axum::{extract::Extension, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::ApiError;
use crate::domains::auth::models::{Account, Role};
use crate::domains::auth::password::{hash_password, verify_password};
use crate::domains::students::models::Student;
use crate::server::app::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: UserInfo,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub profile: Option<Student>,
}

/// POST /api/auth/login - credential check + signed token
pub async fn login(
    Extension(state): Extension<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let account = Account::find_by_email(&payload.email, &state.db_pool)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    if !verify_password(&payload.password, &account.password_digest) {
        return Err(ApiError::Unauthorized);
    }

    let token = state.jwt_service.create_token(account.id, account.role)?;

    // Students carry their profile in the login payload
    let profile = Student::find_by_account(account.id, &state.db_pool).await?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        user: UserInfo {
            id: account.id,
            email: account.email,
            role: account.role,
            profile,
        },
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub full_name: Option<String>,
    pub student_code: Option<String>,
    pub class_id: Option<Uuid>,
}

/// POST /api/auth/register - account bootstrap (tests / initial setup;
/// admins normally create students through /api/students)
pub async fn register(
    Extension(state): Extension<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    if Account::find_by_email(&payload.email, &state.db_pool)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict("Email already exists".to_string()));
    }

    match payload.role {
        Role::Student => {
            let (Some(student_code), Some(class_id)) = (payload.student_code, payload.class_id)
            else {
                return Err(ApiError::Validation(
                    "Student requires studentCode and classId".to_string(),
                ));
            };
            crate::domains::students::actions::create_student(
                &student_code,
                payload.full_name.as_deref().unwrap_or(""),
                &payload.email,
                &payload.password,
                None,
                None,
                class_id,
                &state.db_pool,
            )
            .await?;
        }
        Role::Admin => {
            let mut tx = state.db_pool.begin().await?;
            Account::insert(
                &payload.email,
                &hash_password(&payload.password),
                Role::Admin,
                &mut *tx,
            )
            .await
            .map_err(|e| ApiError::from_write(e, "Email already exists", "account"))?;
            tx.commit().await?;
        }
    }

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User created successfully" })),
    ))
}
