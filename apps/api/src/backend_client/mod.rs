/// Backend client: the single point of contact with the two analysis services.
///
/// No other module talks to the backends directly. The submission builder holds an
/// `Arc<dyn AnalysisBackend>`; production wires in `HttpBackend`, tests use doubles.
///
/// One request per call. No retries, no backoff, no client-side timeout: a hung
/// backend is bounded only by the transport's own behaviour.
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{multipart, Client};
use thiserror::Error;
use tracing::{debug, warn};

use crate::submission::models::{ResumeFile, TextAnalysisRequest};

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },
}

/// A fully shaped request to one of the two backends.
#[derive(Debug, Clone)]
pub enum OutboundRequest {
    /// Multipart `file` + `jobText` to the file-handling API.
    Upload {
        url: String,
        file: ResumeFile,
        job_text: String,
    },
    /// JSON `{ resume_text, job_text }` to the text-analysis API.
    AnalyzeText {
        url: String,
        body: TextAnalysisRequest,
    },
}

impl OutboundRequest {
    pub fn url(&self) -> &str {
        match self {
            OutboundRequest::Upload { url, .. } | OutboundRequest::AnalyzeText { url, .. } => url,
        }
    }
}

/// Transport seam between the submission builder and the outside world.
/// Returns the raw response body of a 2xx response.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn send(&self, request: OutboundRequest) -> Result<Bytes, TransportError>;
}

/// `reqwest`-backed implementation used in production.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
}

impl HttpBackend {
    pub fn new() -> Result<Self, TransportError> {
        Ok(Self {
            client: Client::builder().build()?,
        })
    }
}

#[async_trait]
impl AnalysisBackend for HttpBackend {
    async fn send(&self, request: OutboundRequest) -> Result<Bytes, TransportError> {
        let response = match request {
            OutboundRequest::Upload {
                url,
                file,
                job_text,
            } => {
                let part = multipart::Part::bytes(file.bytes.to_vec())
                    .file_name(file.file_name)
                    .mime_str(&file.media_type)?;
                let form = multipart::Form::new()
                    .part("file", part)
                    .text("jobText", job_text);

                self.client.post(url).multipart(form).send().await?
            }
            OutboundRequest::AnalyzeText { url, body } => {
                self.client
                    .post(url)
                    .header("content-type", "application/json")
                    .json(&body)
                    .send()
                    .await?
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Analysis backend returned {}: {}", status, body);
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        debug!("Analysis backend responded with {} bytes", body.len());
        Ok(body)
    }
}
