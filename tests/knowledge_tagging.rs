use std::fs;
use std::sync::Arc;

use question_match::dataset::{QuestionDataset, QuestionRecord};
use question_match::matching::{QuestionMatcher, WeightedStrategy};
use question_match::session::{extract_knowledge_points, save_report, KnowledgeTagger, TaggingReport};
use question_match::topics::{KeywordTable, TopicCodeResolver};
use tempfile::tempdir;

fn make_record(id: &str, topic: &str, division: &str, difficulty: &str, text: &str) -> QuestionRecord {
    QuestionRecord {
        problem_id: id.to_string(),
        topic_code: topic.to_string(),
        division: division.to_string(),
        difficulty_code: difficulty.to_string(),
        question_text: text.to_string(),
        ..QuestionRecord::default()
    }
}

fn make_tagger() -> KnowledgeTagger {
    let records = vec![
        make_record("P1", "prob", "c", "E", "Two dice are rolled. Find P(doubles)."),
        make_record("P2", "geom", "g", "M", "Find the area of the circle."),
        make_record("P3", "count", "c", "H", "Counting arrangements of letters."),
    ];
    let matcher = QuestionMatcher::new(
        Arc::new(QuestionDataset::from_records(records)),
        TopicCodeResolver::builtin(),
        WeightedStrategy::default(),
    );
    KnowledgeTagger::new(matcher)
}

const SUMMARY: &str = "复习[KP:Counting]，然后[KP:概率论入门]，最后[KP:未知主题]。";

#[test]
fn extracts_markers_in_order_with_sequential_ids() {
    let points = extract_knowledge_points("本章复习[KP:概率基础]与[KP: 几何面积 ]，以及[KP:]和[KP:Counting].");

    let names: Vec<_> = points.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["概率基础", "几何面积", "Counting"]);

    let ids: Vec<_> = points.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["kp_001", "kp_002", "kp_003"]);

    assert_eq!(points[0].marker, "[KP:概率基础]");
    assert_eq!(points[1].marker, "[KP: 几何面积 ]");
}

#[test]
fn positions_are_char_offsets() {
    let points = extract_knowledge_points("本章复习[KP:概率基础]与[KP:几何]");

    assert_eq!(points[0].source_position, 4);
    // 4 + "[KP:概率基础]" (9 chars) + "与"
    assert_eq!(points[1].source_position, 14);
}

#[test]
fn context_spans_a_hundred_chars_either_side() {
    let summary = format!("{}[KP:x]{}", "甲".repeat(150), "乙".repeat(150));
    let points = extract_knowledge_points(&summary);

    assert_eq!(points.len(), 1);
    assert_eq!(
        points[0].context,
        format!("{}[KP:x]{}", "甲".repeat(100), "乙".repeat(100))
    );

    let short = extract_knowledge_points("  see [KP:x] here  ");
    assert_eq!(short[0].context, "see [KP:x] here");
}

#[test]
fn summary_without_markers_has_no_points() {
    assert!(extract_knowledge_points("").is_empty());
    assert!(extract_knowledge_points("KP:missing brackets").is_empty());
}

#[test]
fn direct_match_first_then_concept_fallback() {
    let tagger = make_tagger();
    let points = tagger.extract_knowledge_points(SUMMARY);
    let matches = tagger.match_questions_for_knowledge_points(&points, 5);

    assert_eq!(matches.len(), 3);

    // Counting hits the text directly
    assert!(!matches[0].used_fallback);
    assert_eq!(matches[0].questions.len(), 1);
    assert_eq!(matches[0].questions[0].problem_id, "P3");

    // 概率论入门 matches nothing directly; the 概率 family hits the topic code
    assert!(matches[1].used_fallback);
    assert_eq!(matches[1].questions.len(), 1);
    assert_eq!(matches[1].questions[0].problem_id, "P1");

    // No family mentioned, nothing found
    assert!(matches[2].used_fallback);
    assert!(matches[2].questions.is_empty());
}

#[test]
fn custom_fallback_table() {
    let tagger = make_tagger().with_fallback(KeywordTable::from_static(&[("入门", &["circle"])]));
    let points = tagger.extract_knowledge_points("[KP:概率论入门]");
    let matches = tagger.match_questions_for_knowledge_points(&points, 5);

    assert_eq!(matches[0].questions[0].problem_id, "P2");
}

#[test]
fn report_summarizes_each_point() {
    let tagger = make_tagger();
    let report = tagger.tag_summary(SUMMARY, 5);

    assert_eq!(report.summary.total_knowledge_points, 3);
    assert_eq!(report.summary.total_matched_questions, 2);
    assert!((report.summary.average_questions_per_kp - 2.0 / 3.0).abs() < 1e-9);

    let counting = &report.knowledge_points[0];
    assert_eq!(counting.id.as_str(), "kp_001");
    assert_eq!(counting.matched_questions_count, 1);
    assert_eq!(counting.difficulty_distribution.get("easy"), Some(&1));
    assert_eq!(counting.topic_coverage.get("count"), Some(&1));

    let probability = &report.knowledge_points[1];
    assert_eq!(probability.questions[0].scores.topic_score, 6.0);
    assert_eq!(probability.questions[0].scores.total_score, 6.0);
    assert_eq!(probability.difficulty_distribution.get("hard"), Some(&1));
    assert_eq!(probability.topic_coverage.get("prob"), Some(&1));

    let unknown = &report.knowledge_points[2];
    assert_eq!(unknown.matched_questions_count, 0);
    assert!(unknown.difficulty_distribution.is_empty());
    assert!(unknown.topic_coverage.is_empty());

    assert_eq!(report.question_statistics.total_questions, 3);
}

#[test]
fn report_without_points_has_zero_average() {
    let tagger = make_tagger();
    let report = tagger.tag_summary("nothing tagged here", 5);

    assert_eq!(report.summary.total_knowledge_points, 0);
    assert_eq!(report.summary.average_questions_per_kp, 0.0);
    assert!(report.knowledge_points.is_empty());
}

#[test]
fn saved_report_reads_back() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("results");
    let report = make_tagger().tag_summary(SUMMARY, 5);

    let path = save_report(&report, &out, Some("report.json")).unwrap();
    assert_eq!(path, out.join("report.json"));

    let bytes = fs::read(&path).unwrap();
    let loaded: TaggingReport = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(loaded, report);

    // Non-ASCII labels are written as-is
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.contains("概率论入门"));
}

#[test]
fn saved_report_gets_timestamped_name() {
    let dir = tempdir().unwrap();
    let report = make_tagger().tag_summary("", 5);

    let path = save_report(&report, dir.path(), None).unwrap();
    let name = path.file_name().unwrap().to_str().unwrap();

    assert!(name.starts_with("knowledge_matching_results_"));
    assert!(name.ends_with(".json"));
    // YYYYMMDD_HHMMSS
    assert_eq!(name.len(), "knowledge_matching_results_".len() + 15 + ".json".len());
}
