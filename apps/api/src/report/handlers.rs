//! Axum route handlers for the Report API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::analysis_client::AnalysisError;
use crate::errors::AppError;
use crate::report::{normalize, Report};
use crate::routes::upload::read_submission;
use crate::state::AppState;

const JOB_DESCRIPTION_FIELD: &str = "job_description";

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

/// Identity and timing live here so the `Report` itself stays deterministic.
#[derive(Debug, Serialize)]
pub struct ReportEnvelope {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub report: Report,
}

impl ReportEnvelope {
    pub fn new(report: Report) -> Self {
        Self {
            analysis_id: Uuid::new_v4(),
            analyzed_at: Utc::now(),
            report,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/reports/normalize
///
/// Normalizes an analysis payload the caller already holds. A body that is not
/// JSON at all yields an error-status report.
pub async fn handle_normalize(body: Bytes) -> Json<ReportEnvelope> {
    let report = match serde_json::from_slice::<Value>(&body) {
        Ok(raw) => normalize(&raw),
        Err(e) => {
            warn!("Normalize request body is not JSON: {e}");
            Report::failed()
        }
    };
    Json(ReportEnvelope::new(report))
}

/// POST /api/v1/reports/analyze
///
/// Multipart: `resume` file + optional `job_description` text. Forwards to the
/// analysis service and normalizes whatever comes back. A missing job
/// description is forwarded as an empty string.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ReportEnvelope>, AppError> {
    let submission = read_submission(multipart, &[JOB_DESCRIPTION_FIELD]).await?;

    let job_description = submission
        .field(JOB_DESCRIPTION_FIELD)
        .unwrap_or_default()
        .to_string();
    if job_description.trim().is_empty() {
        warn!("Analyzing resume without a job description");
    }
    let submission = submission.with_field(JOB_DESCRIPTION_FIELD, job_description);

    let report = report_from(state.analysis.analyze(&submission).await);
    info!(
        "Resume analysis complete: status={:?}, score={}, suggestions={}",
        report.status,
        report.overall_score,
        report.suggestions.len()
    );

    Ok(Json(ReportEnvelope::new(report)))
}

/// POST /api/v1/reports/format-check
///
/// Multipart: `resume` file. Returns ranked formatting suggestions.
pub async fn handle_format_check(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ReportEnvelope>, AppError> {
    let submission = read_submission(multipart, &[]).await?;

    let report = report_from(state.analysis.format_check(&submission).await);
    info!(
        "Format check complete: status={:?}, score={}, suggestions={}",
        report.status,
        report.overall_score,
        report.suggestions.len()
    );

    Ok(Json(ReportEnvelope::new(report)))
}

/// Transport failures become error-status reports rather than HTTP errors.
fn report_from(result: Result<Value, AnalysisError>) -> Report {
    match result {
        Ok(raw) => normalize(&raw),
        Err(e) => {
            error!("Analysis service call failed: {e}");
            Report::failed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::models::ReportStatus;
    use serde_json::json;

    #[test]
    fn test_transport_failure_becomes_failed_report() {
        let result = Err(AnalysisError::RetriesExhausted { retries: 3 });
        assert_eq!(report_from(result), Report::failed());
    }

    #[test]
    fn test_successful_call_is_normalized() {
        let report = report_from(Ok(json!({"matchPercentage": 90})));
        assert_eq!(report.status, ReportStatus::Ok);
        assert_eq!(report.overall_score, 90);
    }

    #[test]
    fn test_envelope_serializes_report_inline() {
        let value = serde_json::to_value(ReportEnvelope::new(Report::degraded())).unwrap();
        assert!(value["analysis_id"].is_string());
        assert!(value["analyzed_at"].is_string());
        assert_eq!(value["report"]["status"], "degraded");
    }
}
