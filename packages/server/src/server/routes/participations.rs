use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::common::ApiError;
use crate::domains::participations::actions;
use crate::domains::participations::models::{
    Participation, ParticipationDetail, ParticipationReviewRow, ParticipationStatus,
};
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub student_id: Uuid,
    pub activity_id: Uuid,
    pub proof: Option<String>,
}

/// POST /api/participations - register a student for an activity
pub async fn register(
    Extension(state): Extension<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Participation>), ApiError> {
    let participation = actions::register(
        payload.student_id,
        payload.activity_id,
        payload.proof.as_deref(),
        &state.db_pool,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(participation)))
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub status: Option<ParticipationStatus>,
}

/// GET /api/participations - admin review list, optional ?status= filter
pub async fn list(
    user: AuthUser,
    Extension(state): Extension<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ParticipationReviewRow>>, ApiError> {
    user.require_admin()?;
    Ok(Json(
        Participation::list_all(query.status, &state.db_pool).await?,
    ))
}

/// GET /api/participations/student/:student_id
pub async fn list_by_student(
    Extension(state): Extension<AppState>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<Vec<ParticipationDetail>>, ApiError> {
    Ok(Json(
        Participation::list_by_student(student_id, &state.db_pool).await?,
    ))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: ParticipationStatus,
}

/// PUT /api/participations/:id/status - approve or reject
///
/// Approval triggers the score recompute before the response goes out.
pub async fn update_status(
    user: AuthUser,
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<Participation>, ApiError> {
    user.require_admin()?;
    let participation = actions::review(
        id,
        payload.status,
        &state.score_locks,
        &state.db_pool,
    )
    .await?;
    Ok(Json(participation))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_uses_camel_case_wire_shape() {
        let request: RegisterRequest = serde_json::from_value(serde_json::json!({
            "studentId": "3d7f5d6f-24f7-4e8e-8b4b-3e7e44b4a7b2",
            "activityId": "0c22f1f1-9184-4fd4-9b21-28c68a6a89dc",
            "proof": "https://example.edu/photo.jpg"
        }))
        .unwrap();
        assert_eq!(request.proof.as_deref(), Some("https://example.edu/photo.jpg"));
    }

    #[test]
    fn status_request_accepts_decisions_only() {
        let approved: UpdateStatusRequest =
            serde_json::from_value(serde_json::json!({ "status": "APPROVED" })).unwrap();
        assert_eq!(approved.status, ParticipationStatus::Approved);

        let rejected: UpdateStatusRequest =
            serde_json::from_value(serde_json::json!({ "status": "REJECTED" })).unwrap();
        assert_eq!(rejected.status, ParticipationStatus::Rejected);

        assert!(
            serde_json::from_value::<UpdateStatusRequest>(serde_json::json!({
                "status": "DONE"
            }))
            .is_err()
        );
    }
}
