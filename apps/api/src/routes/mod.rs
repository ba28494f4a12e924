pub mod health;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::recommendations::handlers as recommendation_handlers;
use crate::report::handlers as report_handlers;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Report API
        .route(
            "/api/v1/reports/normalize",
            post(report_handlers::handle_normalize),
        )
        .route(
            "/api/v1/reports/analyze",
            post(report_handlers::handle_analyze),
        )
        .route(
            "/api/v1/reports/format-check",
            post(report_handlers::handle_format_check),
        )
        // Recommendations API
        .route(
            "/api/v1/recommendations",
            post(recommendation_handlers::handle_recommend),
        )
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis_client::{AnalysisBackend, AnalysisError, Endpoint, Submission};
    use crate::config::Config;
    use crate::report::models::ANALYSIS_FAILED_MESSAGE;

    const BOUNDARY: &str = "feedback-test-boundary";

    /// Replays a canned payload (or a transport failure) and records what it was sent.
    struct StubBackend {
        payload: Option<Value>,
        calls: Mutex<Vec<(Endpoint, Vec<(&'static str, String)>)>>,
    }

    impl StubBackend {
        fn returning(payload: Value) -> Arc<Self> {
            Arc::new(Self {
                payload: Some(payload),
                calls: Mutex::new(vec![]),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                payload: None,
                calls: Mutex::new(vec![]),
            })
        }
    }

    #[async_trait]
    impl AnalysisBackend for StubBackend {
        async fn submit(
            &self,
            endpoint: Endpoint,
            submission: &Submission,
        ) -> Result<Value, AnalysisError> {
            self.calls
                .lock()
                .unwrap()
                .push((endpoint, submission.fields.clone()));
            self.payload.clone().ok_or(AnalysisError::Service {
                status: 503,
                message: "unavailable".to_string(),
            })
        }
    }

    fn app(backend: Arc<StubBackend>) -> Router {
        build_router(AppState {
            config: Config {
                analysis_service_url: "http://analysis.test".to_string(),
                analysis_timeout_secs: 5,
                max_upload_bytes: 1024 * 1024,
                port: 0,
                rust_log: "debug".to_string(),
            },
            analysis: backend,
        })
    }

    /// Builds a multipart body. A part with a file name is sent as a file.
    fn multipart_request(uri: &str, parts: &[(&str, Option<&str>, &str)]) -> Request<Body> {
        let mut body = String::new();
        for (name, file_name, content) in parts {
            body.push_str(&format!("--{BOUNDARY}\r\n"));
            match file_name {
                Some(file) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file}\"\r\n\
                     Content-Type: application/pdf\r\n\r\n"
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )),
            }
            body.push_str(content);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(StubBackend::failing())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_normalize_endpoint() {
        let request = Request::post("/api/v1/reports/normalize")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({"suggestions": ["Add your email address"]}).to_string(),
            ))
            .unwrap();

        let response = app(StubBackend::failing()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["report"]["status"], "ok");
        assert_eq!(body["report"]["overallScore"], 85);
        assert_eq!(body["report"]["suggestions"][0]["type"], "contact");
    }

    #[tokio::test]
    async fn test_normalize_endpoint_non_json_body_is_error_report() {
        let request = Request::post("/api/v1/reports/normalize")
            .body(Body::from("not json {"))
            .unwrap();

        let response = app(StubBackend::failing()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["report"]["status"], "error");
        assert_eq!(
            body["report"]["suggestions"][0]["message"],
            ANALYSIS_FAILED_MESSAGE
        );
    }

    #[tokio::test]
    async fn test_analyze_forwards_job_description() {
        let backend = StubBackend::returning(json!({
            "matchPercentage": 67,
            "missingKeywords": ["Terraform"]
        }));
        let request = multipart_request(
            "/api/v1/reports/analyze",
            &[
                ("resume", Some("cv.pdf"), "%PDF-1.4 resume"),
                ("job_description", None, "Platform engineer, Terraform"),
                ("ignored", None, "x"),
            ],
        );

        let response = app(backend.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["report"]["overallScore"], 67);
        assert_eq!(
            body["report"]["suggestions"][0]["message"],
            "Add these keywords: Terraform"
        );

        let calls = backend.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, Endpoint::Analyze);
        assert_eq!(
            calls[0].1,
            vec![("job_description", "Platform engineer, Terraform".to_string())]
        );
    }

    #[tokio::test]
    async fn test_analyze_without_job_description_forwards_empty_field() {
        let backend = StubBackend::returning(json!({"matchPercentage": 40}));
        let request = multipart_request(
            "/api/v1/reports/analyze",
            &[("resume", Some("cv.pdf"), "%PDF-1.4 resume")],
        );

        let response = app(backend.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["report"]["overallScore"], 40);

        let calls = backend.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, vec![("job_description", String::new())]);
    }

    #[tokio::test]
    async fn test_analyze_forwards_blank_job_description_as_is() {
        let backend = StubBackend::returning(json!({"matchPercentage": 40}));
        let request = multipart_request(
            "/api/v1/reports/analyze",
            &[
                ("resume", Some("cv.pdf"), "%PDF-1.4 resume"),
                ("job_description", None, "   "),
            ],
        );

        let response = app(backend.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let calls = backend.calls.lock().unwrap();
        assert_eq!(calls[0].1, vec![("job_description", "   ".to_string())]);
    }

    #[tokio::test]
    async fn test_missing_resume_is_rejected() {
        let request = multipart_request(
            "/api/v1/reports/format-check",
            &[("job_description", None, "anything")],
        );

        let response = app(StubBackend::failing()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["error"]["code"],
            "VALIDATION_ERROR"
        );
    }

    #[tokio::test]
    async fn test_format_check_transport_failure_is_error_report() {
        let request = multipart_request(
            "/api/v1/reports/format-check",
            &[("resume", Some("cv.pdf"), "%PDF-1.4 resume")],
        );

        let response = app(StubBackend::failing()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["report"]["status"], "error");
        assert_eq!(body["report"]["overallScore"], 0);
        assert_eq!(body["report"]["suggestions"][0]["priority"], "high");
    }

    #[tokio::test]
    async fn test_recommendations_are_ranked() {
        let backend = StubBackend::returning(json!([
            {"id": 1, "title": "QA Engineer", "company": "Acme", "matchScore": 45},
            {"id": 2, "title": "SDET", "company": "Globex", "matchScore": 88}
        ]));
        let request = multipart_request(
            "/api/v1/recommendations",
            &[
                ("resume", Some("cv.pdf"), "%PDF-1.4 resume"),
                ("jobTitle", None, "Test Engineer"),
                ("location", None, "Remote"),
            ],
        );

        let response = app(backend.clone()).oneshot(request).await.unwrap();
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["recommendations"][0]["title"], "SDET");
        assert_eq!(body["recommendations"][0]["band"], "strong");
        assert_eq!(body["recommendations"][1]["band"], "moderate");

        let calls = backend.calls.lock().unwrap();
        assert_eq!(calls[0].0, Endpoint::Recommend);
        assert_eq!(calls[0].1.len(), 2);
    }

    #[tokio::test]
    async fn test_recommendations_transport_failure() {
        let request = multipart_request(
            "/api/v1/recommendations",
            &[("resume", Some("cv.pdf"), "%PDF-1.4 resume")],
        );

        let response = app(StubBackend::failing()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["recommendations"], json!([]));
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = app(StubBackend::failing())
            .oneshot(Request::get("/api/v1/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
