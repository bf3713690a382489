use thiserror::Error;

use crate::submission::models::{ResumeFile, ResumeMediaType, SubmissionInput, MAX_UPLOAD_BYTES};

/// A locally detected, user-correctable problem with a submission.
/// Raised before any network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please upload a PDF, DOCX, or TXT file.")]
    InvalidType,

    #[error("Please upload a file smaller than 5MB.")]
    TooLarge,

    #[error("Please upload a resume file or paste resume text.")]
    MissingFile,

    #[error("Please paste your resume text.")]
    MissingText,

    #[error("Please paste the job description for better analysis.")]
    MissingJobDescription,
}

impl ValidationError {
    /// Stable machine-readable tag.
    pub fn reason(self) -> &'static str {
        match self {
            ValidationError::InvalidType => "invalid_type",
            ValidationError::TooLarge => "too_large",
            ValidationError::MissingFile => "missing_file",
            ValidationError::MissingText => "missing_text",
            ValidationError::MissingJobDescription => "missing_job_description",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ValidationError::InvalidType => "Invalid file type",
            ValidationError::TooLarge => "File too large",
            ValidationError::MissingFile => "No file selected",
            ValidationError::MissingText => "No text provided",
            ValidationError::MissingJobDescription => "No job description provided",
        }
    }
}

/// Checks a file on its own: type first, then size.
pub fn validate_file(file: &ResumeFile) -> Result<ResumeMediaType, ValidationError> {
    let media_type =
        ResumeMediaType::from_declared(&file.media_type).ok_or(ValidationError::InvalidType)?;
    if file.size() > MAX_UPLOAD_BYTES {
        return Err(ValidationError::TooLarge);
    }
    Ok(media_type)
}

/// Validates a whole submission. Mode-specific checks run before the
/// shared job-description check.
pub fn validate_submission(input: &SubmissionInput) -> Result<(), ValidationError> {
    match input {
        SubmissionInput::File { file, .. } => {
            let file = file.as_ref().ok_or(ValidationError::MissingFile)?;
            validate_file(file)?;
        }
        SubmissionInput::Text { resume_text, .. } => {
            if resume_text.trim().is_empty() {
                return Err(ValidationError::MissingText);
            }
        }
    }

    if input.job_text().trim().is_empty() {
        return Err(ValidationError::MissingJobDescription);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn make_file(media_type: &str, len: usize) -> ResumeFile {
        ResumeFile {
            file_name: "resume".to_string(),
            media_type: media_type.to_string(),
            bytes: Bytes::from(vec![0u8; len]),
        }
    }

    fn file_submission(file: Option<ResumeFile>, job_text: &str) -> SubmissionInput {
        SubmissionInput::File {
            file,
            job_text: job_text.to_string(),
        }
    }

    fn text_submission(resume_text: &str, job_text: &str) -> SubmissionInput {
        SubmissionInput::Text {
            resume_text: resume_text.to_string(),
            job_text: job_text.to_string(),
        }
    }

    #[test]
    fn test_valid_pdf_passes() {
        let input = file_submission(Some(make_file("application/pdf", 2_000_000)), "Rust dev");
        assert_eq!(validate_submission(&input), Ok(()));
    }

    #[test]
    fn test_disallowed_types_are_rejected() {
        for media_type in ["image/jpeg", "application/zip", "text/html", ""] {
            let input = file_submission(Some(make_file(media_type, 10)), "Rust dev");
            assert_eq!(
                validate_submission(&input),
                Err(ValidationError::InvalidType),
                "{media_type}"
            );
        }
    }

    #[test]
    fn test_oversized_file_is_rejected() {
        let input = file_submission(
            Some(make_file("application/pdf", MAX_UPLOAD_BYTES + 1)),
            "Rust dev",
        );
        assert_eq!(validate_submission(&input), Err(ValidationError::TooLarge));
    }

    #[test]
    fn test_file_at_exact_limit_is_accepted() {
        let input = file_submission(Some(make_file("text/plain", MAX_UPLOAD_BYTES)), "Rust dev");
        assert_eq!(validate_submission(&input), Ok(()));
    }

    #[test]
    fn test_type_is_checked_before_size() {
        let file = make_file("image/png", MAX_UPLOAD_BYTES * 2);
        assert_eq!(validate_file(&file), Err(ValidationError::InvalidType));
    }

    #[test]
    fn test_missing_file_in_upload_mode() {
        let input = file_submission(None, "Rust dev");
        assert_eq!(validate_submission(&input), Err(ValidationError::MissingFile));
    }

    #[test]
    fn test_blank_resume_text_is_rejected() {
        let input = text_submission("  \n\t ", "Rust dev");
        assert_eq!(validate_submission(&input), Err(ValidationError::MissingText));
    }

    #[test]
    fn test_blank_job_description_rejected_in_both_modes() {
        let file_mode = file_submission(Some(make_file("application/pdf", 10)), "   ");
        let text_mode = text_submission("Ten years of Rust", "");
        assert_eq!(
            validate_submission(&file_mode),
            Err(ValidationError::MissingJobDescription)
        );
        assert_eq!(
            validate_submission(&text_mode),
            Err(ValidationError::MissingJobDescription)
        );
    }

    #[test]
    fn test_reason_tags() {
        assert_eq!(ValidationError::InvalidType.reason(), "invalid_type");
        assert_eq!(ValidationError::TooLarge.reason(), "too_large");
        assert_eq!(ValidationError::MissingFile.reason(), "missing_file");
        assert_eq!(ValidationError::MissingText.reason(), "missing_text");
        assert_eq!(
            ValidationError::MissingJobDescription.reason(),
            "missing_job_description"
        );
    }
}
