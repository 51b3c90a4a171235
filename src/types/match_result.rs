use serde::{Deserialize, Serialize};

use crate::dataset::QuestionOptions;

/// Raw, independent score components produced by a matching strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub division_score: f64,
    pub topic_score: f64,
    pub keyword_score: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.division_score + self.topic_score + self.keyword_score
    }

    /// A record is a candidate only when its total is strictly positive.
    pub fn is_admitted(&self) -> bool {
        self.total() > 0.0
    }
}

/// How well a record's own topic and division agree with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpectedMatch {
    High,
    Medium,
    Low,
    VeryLow,
}

/// Suggested place of a question in a study plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendedOrder {
    Priority,
    Recommended,
    Optional,
    Backup,
}

impl RecommendedOrder {
    pub fn label(&self) -> &'static str {
        match self {
            RecommendedOrder::Priority => "practice first: high relevance, low difficulty",
            RecommendedOrder::Recommended => "recommended: good relevance, moderate difficulty",
            RecommendedOrder::Optional => "optional: medium relevance",
            RecommendedOrder::Backup => "backup: low relevance",
        }
    }
}

/// One scored and annotated pairing of a query against a question record.
///
/// Recomputed on every match call; never cached across knowledge points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub division_score: f64,
    pub topic_score: f64,
    pub keyword_score: f64,
    pub total_score: f64,

    /// 0..=100, one decimal.
    pub relevance_score: f64,
    /// 1..=5
    pub difficulty_level: u8,
    /// 1..=10
    pub practice_priority: u8,

    pub expected_match: ExpectedMatch,
    pub recommended_order: RecommendedOrder,
}

/// A question record as returned to callers, with its match annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedQuestion {
    pub problem_id: String,
    pub formatted_title: String,
    pub question_text: String,
    /// Lower-cased topic field of the record.
    pub topics: String,
    /// Lower-cased division field of the record.
    pub division: String,
    /// Raw difficulty code of the record.
    pub difficulty: String,

    #[serde(flatten)]
    pub scores: MatchResult,

    pub answer: String,
    pub explanation: String,
    pub hint: String,
    pub options: QuestionOptions,
}
