use question_match::dataset::QuestionRecord;
use question_match::matching::{
    MatchingStrategy, TopicCodeStrategy, TopicScorePolicy, WeightedStrategy,
};
use question_match::topics::{KeywordTable, TopicCodeResolver};
use question_match::types::ScoreBreakdown;

fn make_record(topic: &str, division: &str, text: &str) -> QuestionRecord {
    QuestionRecord {
        problem_id: "P".to_string(),
        topic_code: topic.to_string(),
        division: division.to_string(),
        difficulty_code: "M".to_string(),
        question_text: text.to_string(),
        ..QuestionRecord::default()
    }
}

fn topics(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn division_hit_scores_five() {
    let record = make_record("geom", "C", "");
    let score = WeightedStrategy::default().score(&record, &topics(&["c"]));

    assert_eq!(score.division_score, 5.0);
    assert_eq!(score.topic_score, 0.0);
    assert_eq!(score.keyword_score, 0.0);
}

#[test]
fn topic_hit_double_counts_raw_field_and_tokens() {
    let strategy = WeightedStrategy::default();

    let single = make_record("prob", "c", "");
    assert_eq!(strategy.score(&single, &topics(&["prob"])).topic_score, 6.0);

    let multi = make_record("Prob, Geom", "c", "");
    assert_eq!(strategy.score(&multi, &topics(&["prob"])).topic_score, 6.0);
    assert_eq!(strategy.score(&multi, &topics(&["o"])).topic_score, 9.0);
}

#[test]
fn single_count_policy_awards_topic_once() {
    let strategy = WeightedStrategy::new(TopicScorePolicy::SingleCount);

    let multi = make_record("prob, geom", "c", "");
    assert_eq!(strategy.score(&multi, &topics(&["prob"])).topic_score, 3.0);
    assert_eq!(strategy.score(&multi, &topics(&["o"])).topic_score, 3.0);
    assert_eq!(
        strategy.score(&multi, &topics(&["prob", "geom"])).topic_score,
        6.0
    );
}

#[test]
fn policies_agree_when_topic_misses() {
    let record = make_record("geom", "g", "A circle.");
    let double = WeightedStrategy::new(TopicScorePolicy::DoubleCount);
    let single = WeightedStrategy::new(TopicScorePolicy::SingleCount);

    let t = topics(&["circle"]);
    assert_eq!(double.score(&record, &t), single.score(&record, &t));
}

#[test]
fn direct_text_hit_scores_one_per_topic() {
    let record = make_record("", "", "Compute the Probability that both coins land heads.");
    let score = WeightedStrategy::default().score(&record, &topics(&["probability", "coins"]));

    assert_eq!(score.keyword_score, 2.0);
    assert_eq!(score.total(), 2.0);
}

#[test]
fn concept_expansion_counts_each_english_variant() {
    let record = make_record("", "", "What is the probability of a random chance event?");
    let score = WeightedStrategy::default().score(&record, &topics(&["概率"]));

    // probability, prob, chance, random
    assert_eq!(score.keyword_score, 4.0);
}

#[test]
fn custom_expansion_table_replaces_builtin() {
    let record = make_record("", "", "A fair die is rolled.");
    let strategy = WeightedStrategy::default()
        .with_expansions(KeywordTable::from_static(&[("骰子", &["die", "rolled"])]));

    assert_eq!(strategy.score(&record, &topics(&["骰子"])).keyword_score, 2.0);
    assert_eq!(strategy.score(&record, &topics(&["概率"])).keyword_score, 0.0);
}

#[test]
fn record_without_topic_code_matches_only_on_text() {
    let record = make_record("  ", "c", "counting c words");
    let score = WeightedStrategy::default().score(&record, &topics(&["c"]));

    assert_eq!(score.division_score, 0.0);
    assert_eq!(score.topic_score, 0.0);
    assert_eq!(score.keyword_score, 1.0);
}

#[test]
fn blank_topics_never_match() {
    let record = make_record("prob", "c", "anything");
    let strategy = WeightedStrategy::default();

    assert!(!strategy.score(&record, &topics(&[""])).is_admitted());
    assert!(!strategy.score(&record, &topics(&["  "])).is_admitted());
    assert!(!TopicCodeStrategy.score(&record, &topics(&[""])).is_admitted());
}

#[test]
fn topic_code_strategy_requires_exact_equality() {
    let strategy = TopicCodeStrategy;

    let prob = make_record("prob", "c", "");
    assert_eq!(
        strategy.score(&prob, &topics(&["geom", "prob"])),
        ScoreBreakdown {
            division_score: 0.0,
            topic_score: 1.0,
            keyword_score: 0.0,
        }
    );

    // Substring and case differences do not count
    assert!(!strategy.score(&prob, &topics(&["pro"])).is_admitted());
    assert!(!strategy.score(&prob, &topics(&["PROB"])).is_admitted());

    let multi = make_record("prob,geom", "c", "");
    assert!(!strategy.score(&multi, &topics(&["prob"])).is_admitted());

    let unclassified = make_record("", "c", "prob");
    assert!(!strategy.score(&unclassified, &topics(&["prob"])).is_admitted());
}

#[test]
fn knowledge_point_resolves_to_codes_that_hit_topic_field() {
    // "probability" resolves to prob; the record is division c, topic prob
    let resolver = TopicCodeResolver::builtin();
    let codes = resolver.predict("probability");
    assert!(codes.contains(&"prob".to_string()));

    let record = make_record("prob", "c", "Find the probability of drawing a red ball.");
    let score = WeightedStrategy::default().score(&record, &codes);

    assert_eq!(score.division_score, 0.0);
    assert!(score.topic_score >= 3.0);
    assert!(score.is_admitted());

    // Matching the division letter directly is what earns the division score
    let by_division = WeightedStrategy::default().score(&record, &topics(&["c"]));
    assert_eq!(by_division.division_score, 5.0);
}
