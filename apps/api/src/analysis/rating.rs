use serde::Serialize;

/// Coarse band a score falls into. Clients key their colouring off this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreTier {
    Strong, // ≥ 80
    Fair,   // 60 – 79
    Weak,   // < 60
}

impl ScoreTier {
    pub fn for_score(score: f64) -> Self {
        if score >= 80.0 {
            ScoreTier::Strong
        } else if score >= 60.0 {
            ScoreTier::Fair
        } else {
            ScoreTier::Weak
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            ScoreTier::Strong => "Your resume is well-optimized and follows best practices. With a few tweaks, it can be even better!",
            ScoreTier::Fair => "Your resume meets basic standards but has room for improvement in several key areas.",
            ScoreTier::Weak => "Your resume needs significant improvements to meet professional standards.",
        }
    }
}

/// Human label for a score.
pub fn score_label(score: f64) -> &'static str {
    match score {
        s if s >= 90.0 => "Excellent",
        s if s >= 80.0 => "Very Good",
        s if s >= 70.0 => "Good",
        s if s >= 60.0 => "Average",
        s if s >= 50.0 => "Below Average",
        _ => "Needs Improvement",
    }
}

/// Headline shown above the detailed breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreOverview {
    pub tier: ScoreTier,
    pub label: &'static str,
    pub summary: &'static str,
}

impl ScoreOverview {
    pub fn for_score(score: i64) -> Self {
        let score = score as f64;
        let tier = ScoreTier::for_score(score);
        Self {
            tier,
            label: score_label(score),
            summary: tier.summary(),
        }
    }
}
