//! Axum route handlers for the Analysis API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::analysis::models::AnalysisResult;
use crate::analysis::rating::ScoreOverview;
use crate::errors::AppError;
use crate::state::AppState;
use crate::submission::models::{ResumeFile, SubmissionInput, TextAnalysisRequest};
use crate::submission::validation::ValidationError;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis: AnalysisResult,
    pub overview: ScoreOverview,
}

impl From<AnalysisResult> for AnalyzeResponse {
    fn from(analysis: AnalysisResult) -> Self {
        let overview = ScoreOverview::for_score(analysis.overall_score);
        Self { analysis, overview }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Multipart form as posted by the upload page: `file` (optional), `resumeText`
/// (optional), `jobText`, and `mode` (optional, `upload` or `paste`, the tab the
/// user had open). Without `mode`, an attached file selects upload mode and pasted
/// text is used only when no file is attached.
pub async fn handle_analyze_form(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let input = read_submission_form(multipart).await?;
    let analysis = state.submitter.submit(input).await?;
    Ok(Json(analysis.into()))
}

/// POST /api/v1/analyze/text
///
/// JSON `{ resume_text, job_text }`, the same body the text backend accepts.
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    Json(request): Json<TextAnalysisRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let input = SubmissionInput::Text {
        resume_text: request.resume_text,
        job_text: request.job_text,
    };
    let analysis = state.submitter.submit(input).await?;
    Ok(Json(analysis.into()))
}

// ────────────────────────────────────────────────────────────────────────────
// Form decoding
// ────────────────────────────────────────────────────────────────────────────

async fn read_submission_form(mut multipart: Multipart) -> Result<SubmissionInput, AppError> {
    let mut file: Option<ResumeFile> = None;
    let mut resume_text: Option<String> = None;
    let mut job_text = String::new();
    let mut mode: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(form_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let media_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(form_error)?;
                // An empty file input still posts a nameless, empty part.
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }
                file = Some(ResumeFile {
                    file_name,
                    media_type,
                    bytes,
                });
            }
            "resumeText" => resume_text = Some(field.text().await.map_err(form_error)?),
            "jobText" => job_text = field.text().await.map_err(form_error)?,
            "mode" => mode = Some(field.text().await.map_err(form_error)?),
            other => tracing::debug!("Ignoring unknown form field '{other}'"),
        }
    }

    let input = match (mode.as_deref().map(str::trim), file, resume_text) {
        (Some("upload"), file, _) => SubmissionInput::File { file, job_text },
        (Some("paste"), _, resume_text) => SubmissionInput::Text {
            resume_text: resume_text.unwrap_or_default(),
            job_text,
        },
        (Some(other), _, _) => {
            return Err(AppError::BadRequest(format!(
                "Unknown mode '{other}', expected 'upload' or 'paste'"
            )))
        }
        (None, Some(file), _) => SubmissionInput::File {
            file: Some(file),
            job_text,
        },
        (None, None, Some(resume_text)) => SubmissionInput::Text {
            resume_text,
            job_text,
        },
        (None, None, None) => SubmissionInput::File {
            file: None,
            job_text,
        },
    };
    Ok(input)
}

fn form_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::Validation(ValidationError::TooLarge)
    } else {
        AppError::BadRequest(err.body_text())
    }
}
