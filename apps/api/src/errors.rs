use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::submission::builder::SubmitError;
use crate::submission::validation::ValidationError;

const ANALYSIS_FAILED_TITLE: &str = "Analysis failed";
const ANALYSIS_FAILED_MESSAGE: &str =
    "There was an error analyzing your resume. Please try again.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),
}

impl From<SubmitError> for AppError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Validation(e) => AppError::Validation(e),
            other => AppError::AnalysisFailed(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, title, message) = match &self {
            AppError::Validation(e) => (
                StatusCode::BAD_REQUEST,
                e.reason(),
                e.title(),
                e.to_string(),
            ),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "bad_request",
                "Invalid request",
                msg.clone(),
            ),
            AppError::AnalysisFailed(msg) => {
                tracing::error!("Analysis failed: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "analysis_failed",
                    ANALYSIS_FAILED_TITLE,
                    ANALYSIS_FAILED_MESSAGE.to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "title": title,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
