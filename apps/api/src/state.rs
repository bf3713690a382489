use crate::submission::builder::SubmissionBuilder;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds nothing mutable: each request runs its own submission end to end.
#[derive(Clone)]
pub struct AppState {
    /// Validates submissions and talks to the analysis backends.
    pub submitter: SubmissionBuilder,
}
