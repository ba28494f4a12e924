//! Axum route handlers for the Recommendations API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::{error, info};

use crate::errors::AppError;
use crate::recommendations::{normalize_recommendations, JobRecommendation};
use crate::report::models::ReportStatus;
use crate::routes::upload::read_submission;
use crate::state::AppState;

/// Optional preference fields forwarded with the resume.
const PREFERENCE_FIELDS: &[&str] = &["jobTitle", "location", "skills"];

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub status: ReportStatus,
    pub recommendations: Vec<JobRecommendation>,
}

/// POST /api/v1/recommendations
///
/// Multipart: `resume` file + optional `jobTitle`, `location`, `skills`.
/// A failed service call returns `status: "error"` with an empty list.
pub async fn handle_recommend(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<RecommendationsResponse>, AppError> {
    let submission = read_submission(multipart, PREFERENCE_FIELDS).await?;

    let response = match state.analysis.recommend(&submission).await {
        Ok(raw) => RecommendationsResponse {
            status: ReportStatus::Ok,
            recommendations: normalize_recommendations(&raw),
        },
        Err(e) => {
            error!("Recommendation service call failed: {e}");
            RecommendationsResponse {
                status: ReportStatus::Error,
                recommendations: vec![],
            }
        }
    };

    info!(
        "Recommendations complete: status={:?}, jobs={}",
        response.status,
        response.recommendations.len()
    );

    Ok(Json(response))
}
