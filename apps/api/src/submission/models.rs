use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Upload size ceiling: 5 MiB.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Media types accepted for resume uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeMediaType {
    Pdf,
    Word,
    WordXml,
    PlainText,
}

impl ResumeMediaType {
    pub const ALL: [ResumeMediaType; 4] = [
        ResumeMediaType::Pdf,
        ResumeMediaType::Word,
        ResumeMediaType::WordXml,
        ResumeMediaType::PlainText,
    ];

    pub fn mime(self) -> &'static str {
        match self {
            ResumeMediaType::Pdf => "application/pdf",
            ResumeMediaType::Word => "application/msword",
            ResumeMediaType::WordXml => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ResumeMediaType::PlainText => "text/plain",
        }
    }

    /// Matches a declared content type by its MIME essence, so
    /// `text/plain; charset=utf-8` is still plain text.
    pub fn from_declared(declared: &str) -> Option<Self> {
        let essence = declared.split(';').next().unwrap_or_default().trim();
        Self::ALL
            .into_iter()
            .find(|t| t.mime().eq_ignore_ascii_case(essence))
    }
}

/// A resume file as received from the user, before validation.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub file_name: String,
    /// Content type as declared by the client; not sniffed.
    pub media_type: String,
    pub bytes: Bytes,
}

impl ResumeFile {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// One user-initiated analysis attempt.
#[derive(Debug, Clone)]
pub enum SubmissionInput {
    /// Upload mode. `file` is `None` when the user picked this mode but attached nothing.
    File {
        file: Option<ResumeFile>,
        job_text: String,
    },
    /// Paste mode.
    Text {
        resume_text: String,
        job_text: String,
    },
}

impl SubmissionInput {
    pub fn job_text(&self) -> &str {
        match self {
            SubmissionInput::File { job_text, .. } | SubmissionInput::Text { job_text, .. } => {
                job_text
            }
        }
    }

    pub fn mode(&self) -> &'static str {
        match self {
            SubmissionInput::File { .. } => "file",
            SubmissionInput::Text { .. } => "text",
        }
    }
}

/// JSON body of the text-analysis endpoint. Also accepted as-is by the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnalysisRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub job_text: String,
}
