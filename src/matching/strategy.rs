use serde::{Deserialize, Serialize};

use crate::dataset::QuestionRecord;
use crate::topics::KeywordTable;
use crate::types::ScoreBreakdown;

pub const DIVISION_HIT: f64 = 5.0;
pub const TOPIC_HIT: f64 = 3.0;
pub const KEYWORD_HIT: f64 = 1.0;
pub const TOPIC_CODE_HIT: f64 = 1.0;

/// Scores one question record against a list of predicted topics.
///
/// Implementations are pure: the same record and topics always give the
/// same breakdown. Topics that are empty after trimming contribute nothing.
pub trait MatchingStrategy {
    fn score(&self, record: &QuestionRecord, topics: &[String]) -> ScoreBreakdown;
}

/// How topic-field hits are counted for multi-topic records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicScorePolicy {
    /// +3 for a hit on the raw topic field and +3 again for every
    /// comma-split token that also contains the topic.
    #[default]
    DoubleCount,
    /// +3 at most once per predicted topic.
    SingleCount,
}

/// Substring scorer over division, topic and question text.
#[derive(Debug, Clone)]
pub struct WeightedStrategy {
    policy: TopicScorePolicy,
    expansions: KeywordTable,
}

impl Default for WeightedStrategy {
    fn default() -> Self {
        Self::new(TopicScorePolicy::default())
    }
}

impl WeightedStrategy {
    pub fn new(policy: TopicScorePolicy) -> Self {
        Self {
            policy,
            expansions: KeywordTable::concept_expansions(),
        }
    }

    /// Replace the concept expansion table.
    pub fn with_expansions(mut self, expansions: KeywordTable) -> Self {
        self.expansions = expansions;
        self
    }

    pub fn policy(&self) -> TopicScorePolicy {
        self.policy
    }

    fn topic_hits(&self, topic_field: &str, predicted: &str) -> f64 {
        let token_hits = topic_field
            .split(',')
            .filter(|token| token.trim().contains(predicted))
            .count() as f64;
        let raw_hit = topic_field.contains(predicted);

        match self.policy {
            TopicScorePolicy::DoubleCount => {
                let raw = if raw_hit { TOPIC_HIT } else { 0.0 };
                raw + token_hits * TOPIC_HIT
            }
            TopicScorePolicy::SingleCount => {
                if raw_hit || token_hits > 0.0 {
                    TOPIC_HIT
                } else {
                    0.0
                }
            }
        }
    }
}

impl MatchingStrategy for WeightedStrategy {
    fn score(&self, record: &QuestionRecord, topics: &[String]) -> ScoreBreakdown {
        let topic_field = record.topic_code.to_lowercase();
        let division_field = record.division.to_lowercase();
        let text = record.question_text.to_lowercase();
        // Without a topic code a record can only match on its text.
        let classified = record.has_topic_code();

        let mut breakdown = ScoreBreakdown::default();

        for predicted in topics {
            let predicted = predicted.trim().to_lowercase();
            if predicted.is_empty() {
                continue;
            }

            if classified {
                if division_field.contains(&predicted) {
                    breakdown.division_score += DIVISION_HIT;
                }
                breakdown.topic_score += self.topic_hits(&topic_field, &predicted);
            }

            for keyword in self.expansions.expand(&predicted) {
                if text.contains(&keyword.to_lowercase()) {
                    breakdown.keyword_score += KEYWORD_HIT;
                }
            }
            if text.contains(&predicted) {
                breakdown.keyword_score += KEYWORD_HIT;
            }
        }

        breakdown
    }
}

/// Exact topic-code equality: 1.0 when the record's topic code is one of the
/// predicted codes, reported as the topic component.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopicCodeStrategy;

impl MatchingStrategy for TopicCodeStrategy {
    fn score(&self, record: &QuestionRecord, topics: &[String]) -> ScoreBreakdown {
        let code = record.topic_code.trim();
        if code.is_empty() {
            return ScoreBreakdown::default();
        }

        let hit = topics
            .iter()
            .map(|t| t.trim())
            .any(|t| !t.is_empty() && t == code);

        ScoreBreakdown {
            topic_score: if hit { TOPIC_CODE_HIT } else { 0.0 },
            ..ScoreBreakdown::default()
        }
    }
}
