//! Result Normalizer: maps whatever JSON the backend returned into the fixed
//! `AnalysisResult` shape.
//!
//! Total by construction: every field has a default, so a sparse or oddly shaped
//! payload still yields a complete result. The only failure is a payload that is
//! not a JSON object at all.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::analysis::models::{AnalysisResult, Priority, Section, Suggestion, SuggestionCategory};

/// Fixed explanations of what each known scoring dimension measures.
/// Keys are matched exactly; anything else gets an empty description.
const SECTION_DESCRIPTIONS: &[(&str, &str)] = &[
    (
        "formatting",
        "Measures the visual layout and consistency of your resume.",
    ),
    (
        "content_quality",
        "Evaluates the depth, clarity, and impact of your resume content.",
    ),
    (
        "structure",
        "Assesses the logical organization and sectioning of your resume.",
    ),
    (
        "keyword_optimization",
        "Determines the presence of job-relevant keywords.",
    ),
    ("readability", "Analyzes how easily your resume can be read."),
    (
        "achievements",
        "Evaluates how effectively your achievements are quantified.",
    ),
    (
        "professionalism",
        "Assesses the tone and overall professional presentation.",
    ),
];

#[derive(Debug, Error)]
#[error("backend response is not a JSON object (got {kind})")]
pub struct MalformedResponseError {
    pub kind: &'static str,
}

/// Normalizes a raw backend payload into an `AnalysisResult`.
pub fn normalize(raw: &Value) -> Result<AnalysisResult, MalformedResponseError> {
    let object = raw.as_object().ok_or(MalformedResponseError {
        kind: json_kind(raw),
    })?;

    Ok(AnalysisResult {
        overall_score: overall_score(object.get("total_score")),
        sections: sections(object),
        suggestions: suggestions(object.get("suggestions")),
        feedback: object
            .get("openai_feedback")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    })
}

/// Returns the fixed description for a section key, or "" when unrecognized.
pub fn section_description(key: &str) -> &'static str {
    SECTION_DESCRIPTIONS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, d)| *d)
        .unwrap_or_default()
}

fn overall_score(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.round() as i64))
            .unwrap_or(0),
        _ => 0,
    }
}

fn sections(object: &Map<String, Value>) -> Vec<Section> {
    let Some(scores) = object
        .get("spacy_analysis")
        .and_then(|a| a.get("scores"))
        .and_then(Value::as_object)
    else {
        return vec![];
    };

    // Map iteration follows wire order (serde_json `preserve_order`).
    scores
        .iter()
        .map(|(key, score)| Section {
            name: capitalize_first(key),
            score: coerce_number(score),
            description: section_description(key).to_string(),
        })
        .collect()
}

fn suggestions(value: Option<&Value>) -> Vec<SuggestionCategory> {
    let Some(groups) = value.and_then(Value::as_array) else {
        return vec![];
    };

    groups
        .iter()
        .map(|group| SuggestionCategory {
            category: string_field(group, "category"),
            suggestions: group
                .get("suggestions")
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .map(|item| Suggestion {
                            text: string_field(item, "text"),
                            priority: Priority::from(string_field(item, "priority")),
                        })
                        .collect()
                })
                .unwrap_or_default(),
        })
        .collect()
}

fn string_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Upper-cases the first character and leaves the remainder untouched.
fn capitalize_first(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Loose numeric coercion: numbers pass through, numeric strings are parsed,
/// booleans become 1/0. Anything unrepresentable collapses to 0.
fn coerce_number(value: &Value) -> f64 {
    let coerced = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>().unwrap_or(0.0)
            }
        }
        Value::Bool(true) => 1.0,
        Value::Bool(false) | Value::Null => 0.0,
        Value::Array(_) | Value::Object(_) => 0.0,
    };
    if coerced.is_finite() {
        coerced
    } else {
        0.0
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
