use std::sync::Arc;

use chrono::{TimeZone, Utc};
use question_match::dataset::{QuestionDataset, QuestionRecord};
use question_match::matching::{QuestionMatcher, WeightedStrategy};
use question_match::session::{DifficultyBand, PracticeSession};
use question_match::topics::TopicCodeResolver;
use question_match::types::{ExpectedMatch, RecommendedOrder};

fn make_record(id: &str, topic: &str, division: &str, difficulty: &str, text: &str) -> QuestionRecord {
    QuestionRecord {
        problem_id: id.to_string(),
        topic_code: topic.to_string(),
        division: division.to_string(),
        difficulty_code: difficulty.to_string(),
        question_text: text.to_string(),
        year: "2023".to_string(),
        competition_category: "AMC10".to_string(),
        problem_number: id.trim_start_matches('P').to_string(),
        ..QuestionRecord::default()
    }
}

fn matcher_over(records: Vec<QuestionRecord>) -> QuestionMatcher {
    QuestionMatcher::new(
        Arc::new(QuestionDataset::from_records(records)),
        TopicCodeResolver::builtin(),
        WeightedStrategy::default(),
    )
}

#[test]
fn session_numbers_questions_and_derives_id() {
    let matcher = matcher_over(vec![
        make_record("P1", "prob", "c", "E", "Probability Basics: roll a die."),
        make_record("P2", "prob", "c", "M", "Probability Basics: flip a coin."),
        make_record("P3", "geom", "g", "M", "Find the area."),
    ]);

    let questions = matcher.find_questions_by_knowledge_point("Probability Basics", 10);
    assert_eq!(questions.len(), 2);

    let session = matcher.build_practice_session("Probability Basics", &questions);
    assert_eq!(session.knowledge_point, "Probability Basics");
    assert_eq!(session.total_questions, 2);
    assert_eq!(session.questions.len(), 2);
    assert_eq!(session.questions[0].id.as_str(), "q_001");
    assert_eq!(session.questions[1].id.as_str(), "q_002");
    assert_eq!(session.session_id.as_str(), "session_Probability Basics_2");
    assert_eq!(session.questions[0].problem_id, questions[0].problem_id);
}

#[test]
fn empty_session_is_well_formed() {
    let session = PracticeSession::build("zzznonexistent", &[]);
    assert_eq!(session.total_questions, 0);
    assert!(session.questions.is_empty());
    assert_eq!(session.session_id.as_str(), "session_zzznonexistent_0");
}

#[test]
fn session_ids_repeat_for_equal_inputs() {
    let a = PracticeSession::build_at("geom", &[], Utc.timestamp_opt(0, 0).unwrap());
    let b = PracticeSession::build_at("geom", &[], Utc.timestamp_opt(60, 0).unwrap());
    assert_eq!(a.session_id, b.session_id);
    assert_ne!(a.created_at, b.created_at);
}

#[test]
fn difficulty_band_follows_total_score() {
    assert_eq!(DifficultyBand::from_total_score(6.0), DifficultyBand::Hard);
    assert_eq!(DifficultyBand::from_total_score(5.0), DifficultyBand::Hard);
    assert_eq!(DifficultyBand::from_total_score(3.0), DifficultyBand::Medium);
    assert_eq!(DifficultyBand::from_total_score(2.0), DifficultyBand::Easy);
}

#[test]
fn golden_practice_session_serialization() {
    let mut record = make_record("P1", "prob", "c", "E", "Roll a die.");
    record.answer = "C".to_string();
    record.hint = "Six faces.".to_string();
    record.options.c = "1/6".to_string();
    let matcher = matcher_over(vec![record]);

    let questions = matcher.find_questions_by_topics(&["prob"], 5);
    let q = &questions[0].scores;
    assert_eq!(q.total_score, 6.0);
    assert_eq!(q.expected_match, ExpectedMatch::High);
    assert_eq!(q.recommended_order, RecommendedOrder::Backup);

    let session =
        matcher.build_practice_session_at("prob", &questions, Utc.timestamp_opt(0, 0).unwrap());
    let json_str = serde_json::to_string_pretty(&session).unwrap();

    const EXPECTED_JSON: &str = r#"{
      "knowledge_point": "prob",
      "total_questions": 1,
      "questions": [
        {
          "id": "q_001",
          "problem_id": "P1",
          "title": "2023 AMC10 Problem 1",
          "question_text": "Roll a die.",
          "topics": "prob",
          "difficulty": "hard",
          "difficulty_level": 1,
          "relevance_score": 30.0,
          "practice_priority": 3,
          "expected_match": "HIGH",
          "recommended_order": "BACKUP",
          "answer": "C",
          "explanation": "",
          "hint": "Six faces.",
          "options": {
            "A": "",
            "B": "",
            "C": "1/6",
            "D": "",
            "E": ""
          }
        }
      ],
      "session_id": "session_prob_1",
      "created_at": "1970-01-01T00:00:00Z"
    }"#;

    let normalized_actual: String = json_str.chars().filter(|c| !c.is_whitespace()).collect();
    let normalized_expected: String = EXPECTED_JSON.chars().filter(|c| !c.is_whitespace()).collect();
    assert_eq!(normalized_actual, normalized_expected, "practice session snapshot mismatch");

    let roundtrip: PracticeSession = serde_json::from_str(&json_str).unwrap();
    assert_eq!(roundtrip, session);
}

fn geometry_bank() -> Vec<QuestionRecord> {
    vec![
        // relevance 90, difficulty 2 -> priority 9
        make_record("P1", "geom", "geom", "M", "A geom question."),
        // relevance 50, difficulty 1 -> priority 6
        make_record("P2", "alg", "geom", "E", ""),
        // relevance 50, difficulty 3 -> priority 4
        make_record("P3", "alg", "geom", "M", ""),
        // relevance 30, difficulty 1 -> priority 3
        make_record("P4", "geom", "c", "E", ""),
        // relevance 10, difficulty 4 -> priority 1
        make_record("P5", "", "", "M", "geom"),
    ]
}

#[test]
fn recommendations_bucket_by_priority() {
    let matcher = matcher_over(geometry_bank());
    let recs = matcher.get_practice_recommendations("geom", 5);

    assert_eq!(recs.knowledge_point, "geom");
    assert_eq!(recs.total_matched, 5);

    let ids = |bucket: &[question_match::types::MatchedQuestion]| {
        bucket.iter().map(|q| q.problem_id.clone()).collect::<Vec<_>>()
    };
    assert_eq!(ids(&recs.recommendations.priority_1), vec!["P1"]);
    assert_eq!(ids(&recs.recommendations.priority_2), vec!["P2"]);
    assert_eq!(ids(&recs.recommendations.priority_3), vec!["P3"]);
    assert_eq!(ids(&recs.recommendations.priority_4), vec!["P4", "P5"]);
    assert_eq!(recs.recommendations.len(), 5);
}

#[test]
fn recommendations_pick_from_a_double_sized_pool() {
    let matcher = matcher_over(geometry_bank());
    let recs = matcher.get_practice_recommendations("geom", 2);

    // pool: P1 (9), P2 (6), P3 (4), P4 (3)
    assert_eq!(recs.total_matched, 4);
    assert_eq!(recs.recommendations.len(), 2);
    assert_eq!(recs.recommendations.priority_1[0].problem_id, "P1");
    assert_eq!(recs.recommendations.priority_2[0].problem_id, "P2");
    assert!(recs.recommendations.priority_3.is_empty());

    assert_eq!(
        recs.practice_strategy,
        "Practice plan:\n\
         - Start here (1 questions): high relevance, low difficulty; good entry points\n\
         - Build up (1 questions): good relevance, moderate difficulty; consolidates the basics\n"
    );
}

#[test]
fn recommendations_for_unknown_point_are_empty() {
    let matcher = matcher_over(geometry_bank());
    let recs = matcher.get_practice_recommendations("zzznonexistent", 5);

    assert_eq!(recs.total_matched, 0);
    assert!(recs.recommendations.is_empty());
    assert_eq!(recs.practice_strategy, "Practice plan:\n");
}
