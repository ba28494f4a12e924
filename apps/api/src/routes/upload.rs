use axum::extract::Multipart;

use crate::analysis_client::{ResumeUpload, Submission};
use crate::errors::AppError;

const RESUME_FIELD: &str = "resume";
const DEFAULT_FILE_NAME: &str = "resume";

/// Reads a multipart upload into a `Submission`.
/// The `resume` file part is required; only text fields named in `accepted` are kept.
pub async fn read_submission(
    mut multipart: Multipart,
    accepted: &[&'static str],
) -> Result<Submission, AppError> {
    let mut resume = None;
    let mut fields = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == RESUME_FIELD {
            let file_name = field
                .file_name()
                .filter(|n| !n.is_empty())
                .unwrap_or(DEFAULT_FILE_NAME)
                .to_string();
            let bytes = field.bytes().await?;
            if bytes.is_empty() {
                return Err(AppError::Validation("Uploaded resume is empty".to_string()));
            }
            resume = Some(ResumeUpload { file_name, bytes });
        } else if let Some(known) = accepted.iter().find(|a| **a == name) {
            fields.push((*known, field.text().await?));
        }
    }

    let resume =
        resume.ok_or_else(|| AppError::Validation("Please upload a resume".to_string()))?;

    Ok(fields
        .into_iter()
        .fold(Submission::new(resume), |submission, (name, value)| {
            submission.with_field(name, value)
        }))
}
