/// Analysis Client — the single point of entry for calls to the remote resume analysis service.
///
/// ARCHITECTURAL RULE: handlers never talk to the analysis service directly.
/// They go through `AnalysisBackend`, carried in `AppState` as `Arc<dyn AnalysisBackend>`.
///
/// The service's payloads are returned untouched as `serde_json::Value`; shaping them
/// is the job of `report::normalize` and `recommendations::normalize_recommendations`.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub mod submission;

pub use submission::{ResumeUpload, Submission};

const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Analysis service error (status {status}): {message}")]
    Service { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Analysis service unavailable after {retries} attempts")]
    RetriesExhausted { retries: u32 },
}

/// Remote operations offered by the analysis service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Analyze,
    FormatCheck,
    Recommend,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Analyze => "analyze",
            Endpoint::FormatCheck => "format-check",
            Endpoint::Recommend => "recommend",
        }
    }
}

/// The analysis backend trait. Implement this to swap transports without touching handlers.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn submit(&self, endpoint: Endpoint, submission: &Submission)
        -> Result<Value, AnalysisError>;

    /// Resume + job description match analysis.
    async fn analyze(&self, submission: &Submission) -> Result<Value, AnalysisError> {
        self.submit(Endpoint::Analyze, submission).await
    }

    /// Formatting suggestions for a resume.
    async fn format_check(&self, submission: &Submission) -> Result<Value, AnalysisError> {
        self.submit(Endpoint::FormatCheck, submission).await
    }

    /// Job recommendations for a resume.
    async fn recommend(&self, submission: &Submission) -> Result<Value, AnalysisError> {
        self.submit(Endpoint::Recommend, submission).await
    }
}

#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    message: String,
}

/// Multipart-over-HTTP backend with retry and exponential backoff.
#[derive(Clone)]
pub struct HttpAnalysisBackend {
    client: Client,
    base_url: String,
}

impl HttpAnalysisBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AnalysisError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }
}

#[async_trait]
impl AnalysisBackend for HttpAnalysisBackend {
    /// Posts the submission as multipart form data.
    /// Retries on connection errors, 429, and 5xx with exponential backoff.
    async fn submit(
        &self,
        endpoint: Endpoint,
        submission: &Submission,
    ) -> Result<Value, AnalysisError> {
        let url = self.endpoint_url(endpoint);
        let mut last_error: Option<AnalysisError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Analysis call attempt {} to {} failed, retrying after {}ms...",
                    attempt,
                    url,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            // Multipart forms are consumed by send(), so each attempt builds its own.
            let response = self
                .client
                .post(&url)
                .multipart(build_form(submission))
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(AnalysisError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Analysis service returned {}: {}", status, body);
                last_error = Some(AnalysisError::Service {
                    status: status.as_u16(),
                    message: service_message(body),
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(AnalysisError::Service {
                    status: status.as_u16(),
                    message: service_message(body),
                });
            }

            let body = response.text().await?;
            debug!(
                "Analysis call to {} succeeded: {} bytes",
                endpoint.path(),
                body.len()
            );

            return serde_json::from_str(&body).map_err(AnalysisError::Parse);
        }

        Err(last_error.unwrap_or(AnalysisError::RetriesExhausted {
            retries: MAX_RETRIES,
        }))
    }
}

fn build_form(submission: &Submission) -> Form {
    let resume = Part::bytes(submission.resume.bytes.to_vec())
        .file_name(submission.resume.file_name.clone());

    submission
        .fields
        .iter()
        .fold(Form::new().part("resume", resume), |form, (name, value)| {
            form.text(*name, value.clone())
        })
}

/// Uses the service's JSON `message` when present, otherwise the raw body.
fn service_message(body: String) -> String {
    serde_json::from_str::<ServiceErrorBody>(&body)
        .map(|e| e.message)
        .unwrap_or(body)
}
