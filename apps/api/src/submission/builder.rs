//! Submission Builder: validates a submission, shapes exactly one outbound
//! request, and normalizes whatever comes back.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::analysis::models::AnalysisResult;
use crate::analysis::normalizer::{normalize, MalformedResponseError};
use crate::backend_client::{AnalysisBackend, OutboundRequest, TransportError};
use crate::submission::models::{SubmissionInput, TextAnalysisRequest};
use crate::submission::validation::{validate_submission, ValidationError};

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Backend returned a body that is not JSON: {0}")]
    Backend(#[from] serde_json::Error),

    #[error("Malformed response: {0}")]
    Malformed(#[from] MalformedResponseError),
}

/// Base URLs of the two backends.
#[derive(Debug, Clone)]
pub struct BackendEndpoints {
    pub file_api_base: String,
    pub text_api_base: String,
}

impl BackendEndpoints {
    pub fn upload_url(&self) -> String {
        format!("{}/upload", self.file_api_base.trim_end_matches('/'))
    }

    pub fn analyze_url(&self) -> String {
        format!("{}/analyze-resume", self.text_api_base.trim_end_matches('/'))
    }
}

/// Cheap to clone; shared across handlers through `AppState`.
#[derive(Clone)]
pub struct SubmissionBuilder {
    endpoints: BackendEndpoints,
    backend: Arc<dyn AnalysisBackend>,
}

impl SubmissionBuilder {
    pub fn new(endpoints: BackendEndpoints, backend: Arc<dyn AnalysisBackend>) -> Self {
        Self { endpoints, backend }
    }

    /// Validates, sends one request, and normalizes the response.
    /// Nothing is retried; every error is terminal for this attempt.
    pub async fn submit(&self, input: SubmissionInput) -> Result<AnalysisResult, SubmitError> {
        let submission_id = Uuid::new_v4();
        let span = info_span!("submission", %submission_id, mode = input.mode());
        self.run(input).instrument(span).await
    }

    async fn run(&self, input: SubmissionInput) -> Result<AnalysisResult, SubmitError> {
        if let Err(e) = validate_submission(&input) {
            info!(reason = e.reason(), "Submission rejected");
            return Err(e.into());
        }

        let request = self.build_request(input);
        info!(url = request.url(), "Dispatching analysis request");

        let body = self.backend.send(request).await.map_err(|e| {
            warn!("Analysis request failed: {e}");
            e
        })?;

        let raw: serde_json::Value = serde_json::from_slice(&body).map_err(|e| {
            warn!("Analysis response is not JSON: {e}");
            e
        })?;
        debug!("Raw analysis response: {raw}");

        let result = normalize(&raw)?;
        info!(
            overall_score = result.overall_score,
            sections = result.sections.len(),
            "Analysis complete"
        );
        Ok(result)
    }

    /// File present → multipart upload; otherwise JSON text analysis.
    fn build_request(&self, input: SubmissionInput) -> OutboundRequest {
        match input {
            SubmissionInput::File {
                file: Some(file),
                job_text,
            } => {
                info!(
                    file_name = %file.file_name,
                    size = file.size(),
                    media_type = %file.media_type,
                    "Uploading resume file"
                );
                OutboundRequest::Upload {
                    url: self.endpoints.upload_url(),
                    file,
                    job_text,
                }
            }
            // Validation has already rejected upload mode without a file.
            SubmissionInput::File {
                file: None,
                job_text,
            } => OutboundRequest::AnalyzeText {
                url: self.endpoints.analyze_url(),
                body: TextAnalysisRequest {
                    resume_text: String::new(),
                    job_text,
                },
            },
            SubmissionInput::Text {
                resume_text,
                job_text,
            } => OutboundRequest::AnalyzeText {
                url: self.endpoints.analyze_url(),
                body: TextAnalysisRequest {
                    resume_text,
                    job_text,
                },
            },
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::sync::Mutex;

    use crate::analysis::models::Section;
    use crate::submission::models::{ResumeFile, MAX_UPLOAD_BYTES};

    /// Records every request and answers with a canned result.
    pub(crate) struct RecordingBackend {
        pub requests: Mutex<Vec<OutboundRequest>>,
        reply: Box<dyn Fn() -> Result<Bytes, TransportError> + Send + Sync>,
    }

    impl RecordingBackend {
        pub(crate) fn replying(body: &'static str) -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(vec![]),
                reply: Box::new(move || Ok(Bytes::from_static(body.as_bytes()))),
            })
        }

        pub(crate) fn failing(status: u16) -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(vec![]),
                reply: Box::new(move || {
                    Err(TransportError::Status {
                        status,
                        body: "backend down".to_string(),
                    })
                }),
            })
        }

        pub(crate) fn recorded(&self) -> Vec<OutboundRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AnalysisBackend for RecordingBackend {
        async fn send(&self, request: OutboundRequest) -> Result<Bytes, TransportError> {
            self.requests.lock().unwrap().push(request);
            (self.reply)()
        }
    }

    pub(crate) const REFERENCE_BODY: &str = r#"{
        "total_score": 73,
        "spacy_analysis": { "scores": { "readability": 88 } },
        "suggestions": [],
        "openai_feedback": ""
    }"#;

    pub(crate) fn endpoints() -> BackendEndpoints {
        BackendEndpoints {
            file_api_base: "http://files.test".to_string(),
            text_api_base: "http://analysis.test/".to_string(),
        }
    }

    fn pdf(len: usize) -> ResumeFile {
        ResumeFile {
            file_name: "cv.pdf".to_string(),
            media_type: "application/pdf".to_string(),
            bytes: Bytes::from(vec![1u8; len]),
        }
    }

    #[tokio::test]
    async fn test_file_mode_sends_one_multipart_upload() {
        let backend = RecordingBackend::replying(REFERENCE_BODY);
        let builder = SubmissionBuilder::new(endpoints(), backend.clone());

        let result = builder
            .submit(SubmissionInput::File {
                file: Some(pdf(2_000_000)),
                job_text: "Platform engineer".to_string(),
            })
            .await
            .unwrap();

        let requests = backend.recorded();
        assert_eq!(requests.len(), 1);
        match &requests[0] {
            OutboundRequest::Upload {
                url,
                file,
                job_text,
            } => {
                assert_eq!(url, "http://files.test/upload");
                assert_eq!(file.size(), 2_000_000);
                assert_eq!(job_text, "Platform engineer");
            }
            other => panic!("expected multipart upload, got {other:?}"),
        }
        assert_eq!(result.overall_score, 73);
    }

    #[tokio::test]
    async fn test_text_mode_sends_one_json_request() {
        let backend = RecordingBackend::replying(REFERENCE_BODY);
        let builder = SubmissionBuilder::new(endpoints(), backend.clone());

        builder
            .submit(SubmissionInput::Text {
                resume_text: "  Shipped a database  ".to_string(),
                job_text: "Storage engineer".to_string(),
            })
            .await
            .unwrap();

        let requests = backend.recorded();
        assert_eq!(requests.len(), 1);
        match &requests[0] {
            OutboundRequest::AnalyzeText { url, body } => {
                assert_eq!(url, "http://analysis.test/analyze-resume");
                // forwarded as typed, not trimmed
                assert_eq!(body.resume_text, "  Shipped a database  ");
                assert_eq!(body.job_text, "Storage engineer");
            }
            other => panic!("expected JSON analysis request, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_reference_response_normalizes() {
        let backend = RecordingBackend::replying(REFERENCE_BODY);
        let builder = SubmissionBuilder::new(endpoints(), backend);

        let result = builder
            .submit(SubmissionInput::Text {
                resume_text: "resume".to_string(),
                job_text: "job".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(
            result,
            AnalysisResult {
                overall_score: 73,
                sections: vec![Section {
                    name: "Readability".to_string(),
                    score: 88.0,
                    description: "Analyzes how easily your resume can be read.".to_string(),
                }],
                suggestions: vec![],
                feedback: String::new(),
            }
        );
    }

    #[tokio::test]
    async fn test_validation_failures_issue_no_requests() {
        let backend = RecordingBackend::replying(REFERENCE_BODY);
        let builder = SubmissionBuilder::new(endpoints(), backend.clone());

        let cases = vec![
            (
                SubmissionInput::File {
                    file: Some(ResumeFile {
                        media_type: "image/png".to_string(),
                        ..pdf(10)
                    }),
                    job_text: "job".to_string(),
                },
                ValidationError::InvalidType,
            ),
            (
                SubmissionInput::File {
                    file: Some(pdf(MAX_UPLOAD_BYTES + 1)),
                    job_text: "job".to_string(),
                },
                ValidationError::TooLarge,
            ),
            (
                SubmissionInput::File {
                    file: None,
                    job_text: "job".to_string(),
                },
                ValidationError::MissingFile,
            ),
            (
                SubmissionInput::Text {
                    resume_text: "resume".to_string(),
                    job_text: " ".to_string(),
                },
                ValidationError::MissingJobDescription,
            ),
        ];

        for (input, expected) in cases {
            match builder.submit(input).await {
                Err(SubmitError::Validation(e)) => assert_eq!(e, expected),
                other => panic!("expected {expected:?}, got {other:?}"),
            }
        }
        assert!(backend.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_is_not_retried() {
        let backend = RecordingBackend::failing(503);
        let builder = SubmissionBuilder::new(endpoints(), backend.clone());

        let err = builder
            .submit(SubmissionInput::Text {
                resume_text: "resume".to_string(),
                job_text: "job".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, SubmitError::Transport(_)));
        assert_eq!(backend.recorded().len(), 1);
    }

    #[tokio::test]
    async fn test_non_json_body_is_backend_error() {
        let backend = RecordingBackend::replying("<html>Bad Gateway</html>");
        let builder = SubmissionBuilder::new(endpoints(), backend);

        let err = builder
            .submit(SubmissionInput::Text {
                resume_text: "resume".to_string(),
                job_text: "job".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, SubmitError::Backend(_)));
    }

    #[tokio::test]
    async fn test_non_object_json_is_malformed() {
        let backend = RecordingBackend::replying("[73]");
        let builder = SubmissionBuilder::new(endpoints(), backend);

        let err = builder
            .submit(SubmissionInput::Text {
                resume_text: "resume".to_string(),
                job_text: "job".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, SubmitError::Malformed(_)));
    }

    #[test]
    fn test_endpoint_urls_tolerate_trailing_slash() {
        let endpoints = endpoints();
        assert_eq!(endpoints.upload_url(), "http://files.test/upload");
        assert_eq!(endpoints.analyze_url(), "http://analysis.test/analyze-resume");
    }
}
