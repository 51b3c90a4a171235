//! Turns raw score breakdowns into the annotations shown to learners, and
//! orders the annotated results.

use std::cmp::Ordering;

use crate::dataset::QuestionRecord;
use crate::topics::keywords::TOPIC_DIVISIONS;
use crate::types::{ExpectedMatch, MatchResult, MatchedQuestion, RecommendedOrder, ScoreBreakdown};

const DIVISION_WEIGHT: f64 = 0.5;
const TOPIC_WEIGHT: f64 = 0.3;
const KEYWORD_WEIGHT: f64 = 0.2;

const DIVISION_NORM: f64 = 5.0;
const TOPIC_NORM: f64 = 3.0;
const KEYWORD_NORM: f64 = 2.0;

/// Weighted composite in 0..=100, rounded to one decimal. Each component is
/// normalized by its assumed per-topic maximum and capped at 1.0.
pub fn relevance_score(breakdown: &ScoreBreakdown) -> f64 {
    let component = |score: f64, norm: f64| (score / norm).clamp(0.0, 1.0);

    let relevance = (component(breakdown.division_score, DIVISION_NORM) * DIVISION_WEIGHT
        + component(breakdown.topic_score, TOPIC_NORM) * TOPIC_WEIGHT
        + component(breakdown.keyword_score, KEYWORD_NORM) * KEYWORD_WEIGHT)
        * 100.0;

    (relevance * 10.0).round() / 10.0
}

fn base_difficulty(difficulty_code: &str) -> u8 {
    match difficulty_code.trim().to_uppercase().as_str() {
        "E" | "EASY" => 1,
        "M" | "MEDIUM" => 3,
        "H" | "HARD" => 5,
        _ => 3,
    }
}

/// Difficulty 1..=5 from the record's code, eased by one step for strong
/// matches (total ≥ 8) and raised by one for weak ones (total < 5).
pub fn difficulty_level(difficulty_code: &str, total_score: f64) -> u8 {
    let base = base_difficulty(difficulty_code);
    if total_score >= 8.0 {
        base.saturating_sub(1).max(1)
    } else if total_score >= 5.0 {
        base
    } else {
        (base + 1).min(5)
    }
}

/// Relevance tier × inverted difficulty tier, clamped to 1..=10.
pub fn practice_priority(relevance: f64, difficulty: u8) -> u8 {
    let relevance_tier: u8 = if relevance >= 80.0 {
        3
    } else if relevance >= 50.0 {
        2
    } else {
        1
    };

    let ease_tier: u8 = if difficulty <= 2 {
        3
    } else if difficulty <= 3 {
        2
    } else {
        1
    };

    (relevance_tier * ease_tier).clamp(1, 10)
}

/// Agreement between a record's own topic field and division.
pub fn expected_match(topic_field: &str, division_field: &str) -> ExpectedMatch {
    let topic = topic_field.trim().to_lowercase();
    let division = division_field.trim().to_lowercase();

    if TOPIC_DIVISIONS
        .iter()
        .any(|(keyword, expected)| topic.contains(keyword) && division == *expected)
    {
        return ExpectedMatch::High;
    }

    if TOPIC_DIVISIONS.iter().any(|(keyword, _)| topic.contains(keyword)) {
        return ExpectedMatch::Medium;
    }

    if topic.is_empty() {
        ExpectedMatch::VeryLow
    } else {
        ExpectedMatch::Low
    }
}

pub fn recommended_order(relevance: f64, difficulty: u8) -> RecommendedOrder {
    if relevance >= 80.0 && difficulty <= 2 {
        RecommendedOrder::Priority
    } else if relevance >= 60.0 && difficulty <= 3 {
        RecommendedOrder::Recommended
    } else if relevance >= 40.0 {
        RecommendedOrder::Optional
    } else {
        RecommendedOrder::Backup
    }
}

pub fn annotate(record: &QuestionRecord, breakdown: ScoreBreakdown) -> MatchResult {
    let total_score = breakdown.total();
    let relevance = relevance_score(&breakdown);
    let difficulty = difficulty_level(&record.difficulty_code, total_score);

    MatchResult {
        division_score: breakdown.division_score,
        topic_score: breakdown.topic_score,
        keyword_score: breakdown.keyword_score,
        total_score,
        relevance_score: relevance,
        difficulty_level: difficulty,
        practice_priority: practice_priority(relevance, difficulty),
        expected_match: expected_match(&record.topic_code, &record.division),
        recommended_order: recommended_order(relevance, difficulty),
    }
}

/// Client view of `record` carrying its annotations.
pub fn matched_question(record: &QuestionRecord, scores: MatchResult) -> MatchedQuestion {
    MatchedQuestion {
        problem_id: record.problem_id.clone(),
        formatted_title: record.formatted_title(),
        question_text: record.question_text.clone(),
        topics: record.topic_code.to_lowercase(),
        division: record.division.to_lowercase(),
        difficulty: record.difficulty_code.clone(),
        scores,
        answer: record.answer.clone(),
        explanation: record.explanation.clone(),
        hint: record.hint.clone(),
        options: record.options.clone(),
    }
}

/// Stable sort by relevance descending, then difficulty ascending. Records
/// with equal keys keep their input order.
pub fn sort_matches(matches: &mut [MatchedQuestion]) {
    matches.sort_by(|a, b| {
        b.scores
            .relevance_score
            .partial_cmp(&a.scores.relevance_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.scores.difficulty_level.cmp(&b.scores.difficulty_level))
    });

    debug_assert!(matches.windows(2).all(|w| {
        let (a, b) = (&w[0].scores, &w[1].scores);
        a.relevance_score > b.relevance_score
            || (a.relevance_score == b.relevance_score && a.difficulty_level <= b.difficulty_level)
    }));
}
