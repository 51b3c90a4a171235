pub mod annotation;
pub mod recommendations;
pub mod strategy;

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::MatcherConfig;
use crate::dataset::{DatasetStatistics, QuestionDataset};
use crate::session::PracticeSession;
use crate::topics::TopicCodeResolver;
use crate::types::MatchedQuestion;
pub use annotation::{annotate, matched_question, sort_matches};
pub use recommendations::{PracticeRecommendations, PriorityBuckets};
pub use strategy::{MatchingStrategy, TopicCodeStrategy, TopicScorePolicy, WeightedStrategy};

/// Finds and ranks practice questions for knowledge points.
///
/// Every call is a pure function of the dataset snapshot and its inputs.
pub struct QuestionMatcher<S = WeightedStrategy> {
    dataset: Arc<QuestionDataset>,
    resolver: TopicCodeResolver,
    strategy: S,
}

impl Default for QuestionMatcher<WeightedStrategy> {
    fn default() -> Self {
        Self::from_config(&MatcherConfig::default())
    }
}

impl QuestionMatcher<WeightedStrategy> {
    /// Weighted matcher over the configured sources. The dataset itself is
    /// loaded on first use.
    pub fn from_config(config: &MatcherConfig) -> Self {
        Self {
            dataset: Arc::new(QuestionDataset::new(config)),
            resolver: TopicCodeResolver::from_config(config),
            strategy: WeightedStrategy::new(config.topic_score_policy),
        }
    }
}

impl<S> QuestionMatcher<S>
where
    S: MatchingStrategy,
{
    pub fn new(dataset: Arc<QuestionDataset>, resolver: TopicCodeResolver, strategy: S) -> Self {
        Self {
            dataset,
            resolver,
            strategy,
        }
    }

    /// Same dataset and resolver, different scoring strategy.
    pub fn with_strategy<T: MatchingStrategy>(self, strategy: T) -> QuestionMatcher<T> {
        QuestionMatcher {
            dataset: self.dataset,
            resolver: self.resolver,
            strategy,
        }
    }

    pub fn dataset(&self) -> &QuestionDataset {
        &self.dataset
    }

    pub fn resolver(&self) -> &TopicCodeResolver {
        &self.resolver
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Score every record against `topics`, keep those with a positive total,
    /// annotate, sort, then truncate to `limit`.
    pub fn find_questions_by_topics<T: AsRef<str>>(
        &self,
        topics: &[T],
        limit: usize,
    ) -> Vec<MatchedQuestion> {
        let records = self.dataset.records();
        if records.is_empty() {
            return Vec::new();
        }

        let topics: Vec<String> = topics.iter().map(|t| t.as_ref().to_string()).collect();

        // 1. Scoring and admission
        let mut matches: Vec<MatchedQuestion> = records
            .iter()
            .filter_map(|record| {
                let breakdown = self.strategy.score(record, &topics);
                if !breakdown.is_admitted() {
                    return None;
                }
                Some(matched_question(record, annotate(record, breakdown)))
            })
            .collect();

        // 2. Ordering, over the full candidate set
        sort_matches(&mut matches);

        log::debug!(
            "[QuestionMatcher] {} candidates for {:?}, returning up to {}",
            matches.len(),
            topics,
            limit
        );

        // 3. Truncation
        matches.truncate(limit);
        matches
    }

    /// Match with the raw knowledge point as the only topic, so its text can
    /// hit question text even when no topic code would be predicted.
    pub fn find_questions_by_knowledge_point(
        &self,
        knowledge_point: &str,
        limit: usize,
    ) -> Vec<MatchedQuestion> {
        self.find_questions_by_topics(&[knowledge_point], limit)
    }

    /// Predict topic codes first, then match on those codes. No predicted
    /// code means no matches.
    pub fn find_questions_by_knowledge_point_codes(
        &self,
        knowledge_point: &str,
        limit: usize,
    ) -> Vec<MatchedQuestion> {
        let codes = self.resolver.predict(knowledge_point);
        if codes.is_empty() {
            return Vec::new();
        }
        self.find_questions_by_topics(codes.as_slice(), limit)
    }

    pub fn build_practice_session(
        &self,
        knowledge_point: &str,
        questions: &[MatchedQuestion],
    ) -> PracticeSession {
        PracticeSession::build(knowledge_point, questions)
    }

    pub fn build_practice_session_at(
        &self,
        knowledge_point: &str,
        questions: &[MatchedQuestion],
        created_at: DateTime<Utc>,
    ) -> PracticeSession {
        PracticeSession::build_at(knowledge_point, questions, created_at)
    }

    pub fn get_statistics(&self) -> DatasetStatistics {
        self.dataset.statistics()
    }
}
