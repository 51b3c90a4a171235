//! Knowledge-point extraction from LLM-authored summaries, and per-point
//! question matching.
//!
//! Summaries mark each knowledge point inline as `[KP:label]`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use chrono::Utc;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dataset::DatasetStatistics;
use crate::matching::{MatchingStrategy, QuestionMatcher, WeightedStrategy};
use crate::session::practice::DifficultyBand;
use crate::topics::KeywordTable;
use crate::types::{KnowledgePointId, MatchedQuestion};

const CONTEXT_RADIUS: usize = 100;

#[derive(Debug, Error)]
pub enum TaggerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn marker_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[KP:(.*?)\]").expect("knowledge point marker pattern is valid"))
}

/// A label extracted from one summary document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgePoint {
    pub id: KnowledgePointId,
    pub name: String,
    /// The marker as it appears in the summary.
    pub marker: String,
    /// Char offset of the marker in the summary.
    pub source_position: usize,
    /// Up to 100 chars either side of the marker, trimmed.
    pub context: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgePointMatches {
    pub knowledge_point: KnowledgePoint,
    pub questions: Vec<MatchedQuestion>,
    /// True when the direct match was empty and the concept table was used.
    pub used_fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_knowledge_points: usize,
    pub total_matched_questions: usize,
    pub average_questions_per_kp: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgePointReport {
    pub id: KnowledgePointId,
    pub name: String,
    pub context: String,
    pub matched_questions_count: usize,
    pub questions: Vec<MatchedQuestion>,
    pub difficulty_distribution: BTreeMap<String, usize>,
    pub topic_coverage: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggingReport {
    pub summary: ReportSummary,
    pub knowledge_points: Vec<KnowledgePointReport>,
    pub question_statistics: DatasetStatistics,
}

/// `text[start..end]` widened by up to `radius` chars on each side.
fn context_window(text: &str, start: usize, end: usize, radius: usize) -> &str {
    let from = text[..start]
        .char_indices()
        .rev()
        .take(radius)
        .last()
        .map_or(start, |(i, _)| i);
    let to = text[end..]
        .char_indices()
        .nth(radius)
        .map_or(text.len(), |(i, _)| end + i);
    text[from..to].trim()
}

/// Extract `[KP:label]` markers from `summary`. Labels are trimmed and empty
/// ones dropped; ids are assigned in order over the kept labels.
///
/// An empty marker does not consume an id, so `[KP:a][KP:][KP:b]` yields
/// `kp_001` and `kp_002`. Ids are contiguous but do not count raw markers.
pub fn extract_knowledge_points(summary: &str) -> Vec<KnowledgePoint> {
    let mut points = Vec::new();

    for caps in marker_pattern().captures_iter(summary) {
        let (Some(marker), Some(label)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let name = label.as_str().trim();
        if name.is_empty() {
            continue;
        }

        points.push(KnowledgePoint {
            id: KnowledgePointId::from_index(points.len()),
            name: name.to_string(),
            marker: marker.as_str().to_string(),
            source_position: summary[..marker.start()].chars().count(),
            context: context_window(summary, marker.start(), marker.end(), CONTEXT_RADIUS)
                .to_string(),
        });
    }

    log::debug!("[KnowledgeTagger] extracted {} knowledge points", points.len());
    points
}

/// Extracts knowledge points and matches practice questions for each.
pub struct KnowledgeTagger<S = WeightedStrategy> {
    matcher: QuestionMatcher<S>,
    fallback: KeywordTable,
}

impl<S> KnowledgeTagger<S>
where
    S: MatchingStrategy,
{
    pub fn new(matcher: QuestionMatcher<S>) -> Self {
        Self {
            matcher,
            fallback: KeywordTable::tagger_fallback(),
        }
    }

    /// Replace the concept table used when a label matches nothing directly.
    pub fn with_fallback(mut self, fallback: KeywordTable) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn matcher(&self) -> &QuestionMatcher<S> {
        &self.matcher
    }

    pub fn extract_knowledge_points(&self, summary: &str) -> Vec<KnowledgePoint> {
        extract_knowledge_points(summary)
    }

    /// Match up to `limit_per_kp` questions per point. A point whose label
    /// matches nothing is retried with the English keywords of every
    /// concept family its label mentions.
    pub fn match_questions_for_knowledge_points(
        &self,
        points: &[KnowledgePoint],
        limit_per_kp: usize,
    ) -> Vec<KnowledgePointMatches> {
        points
            .iter()
            .map(|point| {
                let direct = self
                    .matcher
                    .find_questions_by_topics(&[point.name.as_str()], limit_per_kp);

                let (questions, used_fallback) = if direct.is_empty() {
                    (self.match_by_concepts(&point.name, limit_per_kp), true)
                } else {
                    (direct, false)
                };

                log::debug!(
                    "[KnowledgeTagger] '{}': {} questions{}",
                    point.name,
                    questions.len(),
                    if used_fallback { " (concept fallback)" } else { "" }
                );

                KnowledgePointMatches {
                    knowledge_point: point.clone(),
                    questions,
                    used_fallback,
                }
            })
            .collect()
    }

    fn match_by_concepts(&self, label: &str, limit: usize) -> Vec<MatchedQuestion> {
        let keywords: Vec<&str> = self.fallback.expand(label).collect();
        if keywords.is_empty() {
            return Vec::new();
        }
        self.matcher.find_questions_by_topics(&keywords, limit)
    }

    pub fn generate_report(&self, matches: &[KnowledgePointMatches]) -> TaggingReport {
        let total_knowledge_points = matches.len();
        let total_matched_questions: usize = matches.iter().map(|m| m.questions.len()).sum();
        let average_questions_per_kp = if total_knowledge_points == 0 {
            0.0
        } else {
            total_matched_questions as f64 / total_knowledge_points as f64
        };

        let knowledge_points = matches
            .iter()
            .map(|m| KnowledgePointReport {
                id: m.knowledge_point.id.clone(),
                name: m.knowledge_point.name.clone(),
                context: m.knowledge_point.context.clone(),
                matched_questions_count: m.questions.len(),
                questions: m.questions.clone(),
                difficulty_distribution: difficulty_distribution(&m.questions),
                topic_coverage: topic_coverage(&m.questions),
            })
            .collect();

        TaggingReport {
            summary: ReportSummary {
                total_knowledge_points,
                total_matched_questions,
                average_questions_per_kp,
            },
            knowledge_points,
            question_statistics: self.matcher.get_statistics(),
        }
    }

    /// Extract, match and report in one pass.
    pub fn tag_summary(&self, summary: &str, limit_per_kp: usize) -> TaggingReport {
        let points = self.extract_knowledge_points(summary);
        let matches = self.match_questions_for_knowledge_points(&points, limit_per_kp);
        self.generate_report(&matches)
    }
}

fn difficulty_distribution(questions: &[MatchedQuestion]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for question in questions {
        let band = DifficultyBand::from_total_score(question.scores.total_score);
        *counts.entry(band.as_str().to_string()).or_insert(0) += 1;
    }
    counts
}

fn topic_coverage(questions: &[MatchedQuestion]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for question in questions.iter().filter(|q| !q.topics.is_empty()) {
        *counts.entry(question.topics.clone()).or_insert(0) += 1;
    }
    counts
}

/// Write `report` as pretty JSON into `dir`, creating it if needed.
/// Without a filename one is derived from the current time.
pub fn save_report(
    report: &TaggingReport,
    dir: &Path,
    filename: Option<&str>,
) -> Result<PathBuf, TaggerError> {
    let filename = match filename {
        Some(name) => name.to_string(),
        None => format!(
            "knowledge_matching_results_{}.json",
            Utc::now().format("%Y%m%d_%H%M%S")
        ),
    };

    fs::create_dir_all(dir)?;
    let path = dir.join(filename);
    let f = fs::File::create(&path)?;
    serde_json::to_writer_pretty(&f, report)?;
    f.sync_all()?;

    log::info!("[KnowledgeTagger] saved matching report to {}", path.display());
    Ok(path)
}
