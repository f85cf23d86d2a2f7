use axum::extract::{Extension, Query};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::ApiError;
use crate::domains::scores::aggregator;
use crate::domains::scores::models::ScoreRecord;
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreQuery {
    pub student_id: Uuid,
    pub semester_id: Uuid,
}

/// Score payload; students without a record yet get the zero default
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    pub total: i32,
    pub classification: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<serde_json::Value>,
}

impl ScoreResponse {
    fn not_yet_scored() -> Self {
        Self {
            total: 0,
            classification: "N/A".to_string(),
            breakdown: None,
        }
    }
}

impl From<ScoreRecord> for ScoreResponse {
    fn from(record: ScoreRecord) -> Self {
        Self {
            total: record.total,
            classification: record.classification.as_str().to_string(),
            breakdown: Some(record.breakdown),
        }
    }
}

/// GET /api/scores?studentId=&semesterId=
pub async fn get_student_score(
    Extension(state): Extension<AppState>,
    Query(query): Query<ScoreQuery>,
) -> Result<Json<ScoreResponse>, ApiError> {
    let record =
        ScoreRecord::find_by_pair(query.student_id, query.semester_id, &state.db_pool).await?;
    Ok(Json(
        record.map_or_else(ScoreResponse::not_yet_scored, ScoreResponse::from),
    ))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    pub student_id: Uuid,
    pub semester_id: Uuid,
}

/// POST /api/scores/calculate - force a rebuild of the derived record
pub async fn calculate(
    user: AuthUser,
    Extension(state): Extension<AppState>,
    Json(payload): Json<CalculateRequest>,
) -> Result<Json<ScoreRecord>, ApiError> {
    user.require_admin()?;
    let record = aggregator::recompute(
        payload.student_id,
        payload.semester_id,
        &state.score_locks,
        &state.db_pool,
    )
    .await?;
    Ok(Json(record))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_record_defaults_to_zero_na() {
        let response = ScoreResponse::not_yet_scored();
        assert_eq!(response.total, 0);
        assert_eq!(response.classification, "N/A");

        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body, serde_json::json!({ "total": 0, "classification": "N/A" }));
    }
}
