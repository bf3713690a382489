use serde::{Deserialize, Serialize};

/// The fixed-shape display model returned to clients.
/// Built only by `normalizer::normalize` and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub overall_score: i64,
    pub sections: Vec<Section>,
    pub suggestions: Vec<SuggestionCategory>,
    pub feedback: String,
}

/// One named scoring dimension, e.g. readability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub score: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionCategory {
    pub category: String,
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub text: String,
    pub priority: Priority,
}

/// Suggestion priority. Tags the backend sends outside the known three are kept
/// verbatim in `Other` so nothing is lost on the way to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    High,
    Medium,
    Low,
    Other(String),
}

impl Priority {
    pub fn as_str(&self) -> &str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
            Priority::Other(tag) => tag.as_str(),
        }
    }
}

impl From<&str> for Priority {
    fn from(tag: &str) -> Self {
        match tag {
            "high" => Priority::High,
            "medium" => Priority::Medium,
            "low" => Priority::Low,
            other => Priority::Other(other.to_string()),
        }
    }
}

impl From<String> for Priority {
    fn from(tag: String) -> Self {
        Priority::from(tag.as_str())
    }
}

impl From<Priority> for String {
    fn from(priority: Priority) -> Self {
        priority.as_str().to_string()
    }
}
