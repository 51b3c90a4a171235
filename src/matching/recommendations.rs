use serde::{Deserialize, Serialize};

use crate::matching::{MatchingStrategy, QuestionMatcher};
use crate::types::MatchedQuestion;

/// Matched questions grouped by practice priority.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriorityBuckets {
    /// priority ≥ 8
    pub priority_1: Vec<MatchedQuestion>,
    /// priority ≥ 6
    pub priority_2: Vec<MatchedQuestion>,
    /// priority ≥ 4
    pub priority_3: Vec<MatchedQuestion>,
    pub priority_4: Vec<MatchedQuestion>,
}

impl PriorityBuckets {
    fn push(&mut self, question: MatchedQuestion) {
        match question.scores.practice_priority {
            8.. => self.priority_1.push(question),
            6..=7 => self.priority_2.push(question),
            4..=5 => self.priority_3.push(question),
            _ => self.priority_4.push(question),
        }
    }

    pub fn len(&self) -> usize {
        self.priority_1.len() + self.priority_2.len() + self.priority_3.len() + self.priority_4.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// One line per non-empty bucket, most urgent first.
    pub fn practice_strategy(&self) -> String {
        let tiers = [
            (&self.priority_1, "Start here", "high relevance, low difficulty; good entry points"),
            (&self.priority_2, "Build up", "good relevance, moderate difficulty; consolidates the basics"),
            (&self.priority_3, "Broaden", "medium relevance; widens coverage"),
            (&self.priority_4, "Stretch", "lower relevance but worth a try"),
        ];

        let mut strategy = String::from("Practice plan:\n");
        for (bucket, title, note) in tiers {
            if !bucket.is_empty() {
                strategy.push_str(&format!("- {title} ({} questions): {note}\n", bucket.len()));
            }
        }
        strategy
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeRecommendations {
    pub knowledge_point: String,
    /// Size of the candidate pool the recommendations were picked from.
    pub total_matched: usize,
    pub recommendations: PriorityBuckets,
    pub practice_strategy: String,
}

impl<S> QuestionMatcher<S>
where
    S: MatchingStrategy,
{
    /// Pick up to `limit` questions for `knowledge_point` from a pool of
    /// `limit * 2` matches, ordered by practice priority, and bucket them.
    pub fn get_practice_recommendations(
        &self,
        knowledge_point: &str,
        limit: usize,
    ) -> PracticeRecommendations {
        let mut pool = self.find_questions_by_knowledge_point(knowledge_point, limit.saturating_mul(2));
        let total_matched = pool.len();

        // Stable: equal priorities keep relevance order.
        pool.sort_by(|a, b| b.scores.practice_priority.cmp(&a.scores.practice_priority));

        let mut recommendations = PriorityBuckets::default();
        for question in pool.into_iter().take(limit) {
            recommendations.push(question);
        }

        let practice_strategy = recommendations.practice_strategy();
        PracticeRecommendations {
            knowledge_point: knowledge_point.to_string(),
            total_matched,
            recommendations,
            practice_strategy,
        }
    }
}
