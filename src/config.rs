//! Matcher configuration.
//!
//! Every field has a default matching the layout of the bundled question
//! bank, so a JSON config only needs to name what differs.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dataset::SourceEncoding;
use crate::matching::TopicScorePolicy;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Header names of the question bank columns.
///
/// Headers vary between banks (English and Chinese exports), so nothing
/// downstream hardcodes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub problem_id: String,
    pub topic_code: String,
    pub division: String,
    pub difficulty: String,
    pub question_text: String,
    pub answer: String,
    pub explanation: String,
    pub hint: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub option_e: String,
    pub year: String,
    pub competition_category: String,
    pub exam_name: String,
    pub problem_number: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            problem_id: "Problem ID".into(),
            topic_code: "Topic".into(),
            division: "Division".into(),
            difficulty: "难度".into(),
            question_text: "题目".into(),
            answer: "答案".into(),
            explanation: "解题思路".into(),
            hint: "提示".into(),
            option_a: "选项A".into(),
            option_b: "选项B".into(),
            option_c: "选项C".into(),
            option_d: "选项D".into(),
            option_e: "选项E".into(),
            year: "年份".into(),
            competition_category: "竞赛类别".into(),
            exam_name: "试卷".into(),
            problem_number: "题号".into(),
        }
    }
}

impl ColumnMapping {
    /// snake_case English headers.
    pub fn english() -> Self {
        Self {
            problem_id: "problem_id".into(),
            topic_code: "topic_code".into(),
            division: "division".into(),
            difficulty: "difficulty".into(),
            question_text: "question_text".into(),
            answer: "answer".into(),
            explanation: "explanation".into(),
            hint: "hint".into(),
            option_a: "option_a".into(),
            option_b: "option_b".into(),
            option_c: "option_c".into(),
            option_d: "option_d".into(),
            option_e: "option_e".into(),
            year: "year".into(),
            competition_category: "competition_category".into(),
            exam_name: "exam_name".into(),
            problem_number: "problem_number".into(),
        }
    }
}

/// Header names of the topic mapping table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingColumns {
    pub topic_code: String,
    pub description: String,
}

impl Default for MappingColumns {
    fn default() -> Self {
        Self {
            topic_code: "topic_code".into(),
            description: "Topic".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Candidate question bank files in priority order. The first one that
    /// loads is the whole working set.
    pub question_sources: Vec<PathBuf>,
    pub mapping_path: Option<PathBuf>,
    pub columns: ColumnMapping,
    pub mapping_columns: MappingColumns,
    /// Decoders tried in order for each candidate file.
    pub encodings: Vec<SourceEncoding>,
    pub topic_score_policy: TopicScorePolicy,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            question_sources: vec![
                PathBuf::from("data/questions/pdf_test_questions.csv"),
                PathBuf::from("data/questions/AMC10_realtest.csv"),
                PathBuf::from("data/questions/AMC10_v250722.csv"),
            ],
            mapping_path: Some(PathBuf::from("data/knowledge/mapping.csv")),
            columns: ColumnMapping::default(),
            mapping_columns: MappingColumns::default(),
            encodings: SourceEncoding::default_order(),
            topic_score_policy: TopicScorePolicy::default(),
        }
    }
}

impl MatcherConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Resolve relative source and mapping paths against `root`.
    pub fn rooted_at(mut self, root: &Path) -> Self {
        self.question_sources = self
            .question_sources
            .into_iter()
            .map(|p| if p.is_relative() { root.join(p) } else { p })
            .collect();
        self.mapping_path = self
            .mapping_path
            .map(|p| if p.is_relative() { root.join(p) } else { p });
        self
    }
}
