use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dataset::QuestionOptions;
use crate::types::{
    ExpectedMatch, MatchedQuestion, PracticeQuestionId, RecommendedOrder, SessionId,
};

/// Coarse difficulty label derived from a question's total match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyBand {
    Easy,
    Medium,
    Hard,
}

impl DifficultyBand {
    pub fn from_total_score(total_score: f64) -> Self {
        if total_score >= 5.0 {
            DifficultyBand::Hard
        } else if total_score >= 3.0 {
            DifficultyBand::Medium
        } else {
            DifficultyBand::Easy
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyBand::Easy => "easy",
            DifficultyBand::Medium => "medium",
            DifficultyBand::Hard => "hard",
        }
    }
}

/// A question as presented inside a practice session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeQuestion {
    pub id: PracticeQuestionId,
    pub problem_id: String,
    pub title: String,
    pub question_text: String,
    pub topics: String,
    pub difficulty: DifficultyBand,
    pub difficulty_level: u8,
    pub relevance_score: f64,
    pub practice_priority: u8,
    pub expected_match: ExpectedMatch,
    pub recommended_order: RecommendedOrder,
    pub answer: String,
    pub explanation: String,
    pub hint: String,
    pub options: QuestionOptions,
}

impl PracticeQuestion {
    fn from_match(index: usize, question: &MatchedQuestion) -> Self {
        Self {
            id: PracticeQuestionId::from_index(index),
            problem_id: question.problem_id.clone(),
            title: question.formatted_title.clone(),
            question_text: question.question_text.clone(),
            topics: question.topics.clone(),
            difficulty: DifficultyBand::from_total_score(question.scores.total_score),
            difficulty_level: question.scores.difficulty_level,
            relevance_score: question.scores.relevance_score,
            practice_priority: question.scores.practice_priority,
            expected_match: question.scores.expected_match,
            recommended_order: question.scores.recommended_order,
            answer: question.answer.clone(),
            explanation: question.explanation.clone(),
            hint: question.hint.clone(),
            options: question.options.clone(),
        }
    }
}

/// Matched questions for one knowledge point, bundled for a client UI.
/// Built fresh per request; nothing is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeSession {
    pub knowledge_point: String,
    pub total_questions: usize,
    pub questions: Vec<PracticeQuestion>,
    pub session_id: SessionId,
    pub created_at: DateTime<Utc>, // informational only
}

impl PracticeSession {
    pub fn build(knowledge_point: &str, questions: &[MatchedQuestion]) -> Self {
        Self::build_at(knowledge_point, questions, Utc::now())
    }

    pub fn build_at(
        knowledge_point: &str,
        questions: &[MatchedQuestion],
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            knowledge_point: knowledge_point.to_string(),
            total_questions: questions.len(),
            questions: questions
                .iter()
                .enumerate()
                .map(|(i, q)| PracticeQuestion::from_match(i, q))
                .collect(),
            session_id: SessionId::derive(knowledge_point, questions.len()),
            created_at,
        }
    }
}
