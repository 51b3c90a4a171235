// The snapshot is intentionally thin:
// loaded once, lazily
// never mutated after load
// runtime reads only

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{ColumnMapping, MatcherConfig};
use crate::dataset::encoding::{read_decoded, DecodeError, SourceEncoding};
use crate::dataset::record::{ColumnIndex, QuestionRecord};
use crate::types::DatasetVersion;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{path} has no header row with any mapped column")]
    NoHeader { path: PathBuf },
    #[error("No question source could be loaded ({tried} candidates tried)")]
    DataUnavailable { tried: usize },
}

/// The working set of questions, as loaded from a single source file.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSnapshot {
    pub source: Option<PathBuf>,
    pub encoding: Option<SourceEncoding>,
    pub version: DatasetVersion,
    pub records: Vec<QuestionRecord>,
}

impl DatasetSnapshot {
    pub fn empty() -> Self {
        Self {
            source: None,
            encoding: None,
            version: DatasetVersion::empty(),
            records: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetStatistics {
    pub total_questions: usize,
    pub topic_distribution: BTreeMap<String, usize>,
}

/// Question bank with lazy, load-once semantics.
///
/// Safe to share across threads: concurrent first callers block on a single
/// initializer and then all read the same snapshot.
#[derive(Debug)]
pub struct QuestionDataset {
    sources: Vec<PathBuf>,
    columns: ColumnMapping,
    encodings: Vec<SourceEncoding>,
    snapshot: OnceLock<DatasetSnapshot>,
}

impl QuestionDataset {
    pub fn new(config: &MatcherConfig) -> Self {
        Self {
            sources: config.question_sources.clone(),
            columns: config.columns.clone(),
            encodings: config.encodings.clone(),
            snapshot: OnceLock::new(),
        }
    }

    /// A dataset that is already loaded with `records`.
    pub fn from_records(records: Vec<QuestionRecord>) -> Self {
        let snapshot = OnceLock::new();
        let _ = snapshot.set(DatasetSnapshot {
            records,
            ..DatasetSnapshot::empty()
        });

        Self {
            sources: Vec::new(),
            columns: ColumnMapping::default(),
            encodings: SourceEncoding::default_order(),
            snapshot,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot.get().is_some()
    }

    /// The loaded snapshot. The first call performs the load.
    pub fn snapshot(&self) -> &DatasetSnapshot {
        self.snapshot.get_or_init(|| self.load())
    }

    pub fn records(&self) -> &[QuestionRecord] {
        &self.snapshot().records
    }

    /// Load the first candidate source that parses. Never fails: when no
    /// source loads, the snapshot is empty and matching yields nothing.
    pub fn load(&self) -> DatasetSnapshot {
        match self.try_load() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::warn!("[QuestionDataset] {}", e);
                DatasetSnapshot::empty()
            }
        }
    }

    /// Strict variant of [`load`](Self::load) that reports `DataUnavailable`.
    pub fn try_load(&self) -> Result<DatasetSnapshot, DatasetError> {
        for path in &self.sources {
            if !path.exists() {
                log::debug!("[QuestionDataset] skipping missing source {}", path.display());
                continue;
            }

            match self.load_source(path) {
                Ok(snapshot) => {
                    log::info!(
                        "[QuestionDataset] loaded {} questions from {} ({})",
                        snapshot.records.len(),
                        path.display(),
                        snapshot.encoding.map(|e| e.name()).unwrap_or("unknown"),
                    );
                    return Ok(snapshot);
                }
                Err(e) => {
                    log::warn!("[QuestionDataset] failed to load {}: {}", path.display(), e);
                }
            }
        }

        Err(DatasetError::DataUnavailable {
            tried: self.sources.len(),
        })
    }

    /// Parse one candidate file into a snapshot.
    pub fn load_source(&self, path: &Path) -> Result<DatasetSnapshot, DatasetError> {
        let decoded = read_decoded(path, &self.encodings)?;
        let version = DatasetVersion::from_content(decoded.text.as_bytes());

        let csv_err = |source: csv::Error| DatasetError::Csv {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .from_reader(decoded.text.as_bytes());

        let headers = reader.headers().map_err(csv_err)?.clone();
        let index = ColumnIndex::resolve(&headers, &self.columns);
        // An empty or foreign file must not win the load.
        if headers.iter().all(|h| h.trim().is_empty()) || index.is_unresolved() {
            return Err(DatasetError::NoHeader {
                path: path.to_path_buf(),
            });
        }

        let missing = index.missing(&self.columns);
        if !missing.is_empty() {
            log::warn!(
                "[QuestionDataset] {} has no column(s) {:?}; those fields load as empty",
                path.display(),
                missing
            );
        }

        let mut records = Vec::new();
        for (idx, row) in reader.records().enumerate() {
            match row {
                Ok(row) => records.push(index.record(&row)),
                Err(e) => {
                    // +2: one-based, after the header row
                    log::warn!(
                        "[QuestionDataset] skipping row {} of {}: {}",
                        idx + 2,
                        path.display(),
                        e
                    );
                }
            }
        }

        Ok(DatasetSnapshot {
            source: Some(path.to_path_buf()),
            encoding: Some(decoded.encoding),
            version,
            records,
        })
    }

    pub fn statistics(&self) -> DatasetStatistics {
        let records = self.records();
        let mut topic_distribution = BTreeMap::new();
        for record in records.iter().filter(|r| r.has_topic_code()) {
            *topic_distribution
                .entry(record.topic_code.clone())
                .or_insert(0) += 1;
        }

        DatasetStatistics {
            total_questions: records.len(),
            topic_distribution,
        }
    }

    /// Records whose question text, topic or title contains any keyword,
    /// case-insensitively.
    pub fn search(&self, keywords: &[&str]) -> Vec<&QuestionRecord> {
        let keywords = normalized(keywords);
        if keywords.is_empty() {
            return Vec::new();
        }

        self.records()
            .iter()
            .filter(|record| {
                let haystacks = [
                    record.question_text.to_lowercase(),
                    record.topic_code.to_lowercase(),
                    record.formatted_title().to_lowercase(),
                ];
                keywords
                    .iter()
                    .any(|k| haystacks.iter().any(|h| h.contains(k.as_str())))
            })
            .collect()
    }

    /// Records whose topic field contains any of `topics`, case-insensitively.
    pub fn filter_by_topic(&self, topics: &[&str]) -> Vec<&QuestionRecord> {
        let topics = normalized(topics);
        if topics.is_empty() {
            return Vec::new();
        }

        self.records()
            .iter()
            .filter(|record| {
                let topic = record.topic_code.to_lowercase();
                topics.iter().any(|t| topic.contains(t.as_str()))
            })
            .collect()
    }
}

fn normalized(terms: &[&str]) -> Vec<String> {
    terms
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}
