use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{MappingColumns, MatcherConfig};
use crate::dataset::{read_decoded, DecodeError, SourceEncoding};
use crate::topics::keywords::{static_keywords_for, KeywordTable, TOPIC_CODE_KEYWORDS};

#[derive(Debug, Error)]
pub enum MappingError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("Mapping table {path} has no column '{column}'")]
    MissingColumn { path: PathBuf, column: String },
}

/// Predicts topic codes for a free-text knowledge point by keyword
/// membership. A code is either predicted or not; there is no score here.
#[derive(Debug, Clone, Default)]
pub struct TopicCodeResolver {
    dictionary: KeywordTable,
}

impl TopicCodeResolver {
    /// Seed the dictionary from `(topic_code, description)` rows.
    ///
    /// Each code's keywords are its lower-cased description followed by the
    /// static bilingual list for that code. Rows with an empty code or
    /// description are skipped.
    pub fn from_rows<I, C, D>(rows: I) -> Self
    where
        I: IntoIterator<Item = (C, D)>,
        C: AsRef<str>,
        D: AsRef<str>,
    {
        let mut dictionary = KeywordTable::new();
        let mut skipped = 0usize;

        for (code, description) in rows {
            let code = code.as_ref().trim();
            let description = description.as_ref().trim();
            if code.is_empty() || description.is_empty() {
                skipped += 1;
                continue;
            }

            let mut keywords = vec![description.to_lowercase()];
            if let Some(extra) = static_keywords_for(code) {
                keywords.extend(extra.iter().map(|k| k.to_string()));
            }
            dictionary.insert(code, keywords);
        }

        if skipped > 0 {
            log::debug!("[TopicCodeResolver] skipped {} malformed mapping rows", skipped);
        }

        Self { dictionary }
    }

    /// Dictionary built from the static table alone, each code standing in
    /// for its own description.
    pub fn builtin() -> Self {
        Self::from_rows(TOPIC_CODE_KEYWORDS.iter().map(|(code, _)| (*code, *code)))
    }

    /// Resolver for `config`: the mapping table when one is configured,
    /// otherwise the built-in dictionary.
    pub fn from_config(config: &MatcherConfig) -> Self {
        match &config.mapping_path {
            Some(path) => Self::from_mapping_file(path, &config.mapping_columns, &config.encodings),
            None => Self::builtin(),
        }
    }

    /// Load from a mapping table. An unreadable table yields an empty
    /// resolver, which predicts nothing.
    pub fn from_mapping_file(
        path: &Path,
        columns: &MappingColumns,
        encodings: &[SourceEncoding],
    ) -> Self {
        match Self::try_from_mapping_file(path, columns, encodings) {
            Ok(resolver) => {
                log::info!(
                    "[TopicCodeResolver] loaded {} topic codes from {}",
                    resolver.len(),
                    path.display()
                );
                resolver
            }
            Err(e) => {
                log::warn!("[TopicCodeResolver] {}", e);
                Self::default()
            }
        }
    }

    pub fn try_from_mapping_file(
        path: &Path,
        columns: &MappingColumns,
        encodings: &[SourceEncoding],
    ) -> Result<Self, MappingError> {
        let decoded = read_decoded(path, encodings)?;
        let csv_err = |source: csv::Error| MappingError::Csv {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .from_reader(decoded.text.as_bytes());

        let headers = reader.headers().map_err(csv_err)?.clone();
        let position = |column: &str| {
            headers
                .iter()
                .position(|h| h.trim() == column)
                .ok_or_else(|| MappingError::MissingColumn {
                    path: path.to_path_buf(),
                    column: column.to_string(),
                })
        };
        let code_idx = position(&columns.topic_code)?;
        let description_idx = position(&columns.description)?;

        let mut rows = Vec::new();
        for row in reader.records() {
            match row {
                Ok(row) => rows.push((
                    row.get(code_idx).unwrap_or_default().to_string(),
                    row.get(description_idx).unwrap_or_default().to_string(),
                )),
                Err(e) => log::warn!("[TopicCodeResolver] skipping row of {}: {}", path.display(), e),
            }
        }

        Ok(Self::from_rows(rows))
    }

    /// Predicted topic codes, in dictionary order.
    ///
    /// Empty or whitespace-only input predicts nothing.
    pub fn predict(&self, knowledge_point: &str) -> Vec<String> {
        if knowledge_point.trim().is_empty() {
            return Vec::new();
        }

        let kp_lower = knowledge_point.to_lowercase();
        let predicted: Vec<String> = self
            .dictionary
            .iter()
            .filter(|family| {
                family.keywords.iter().any(|keyword| {
                    let keyword = keyword.to_lowercase();
                    !keyword.is_empty() && kp_lower.contains(&keyword)
                })
            })
            .map(|family| family.key.clone())
            .collect();

        if predicted.is_empty() {
            log::debug!(
                "[TopicCodeResolver] no topic codes predicted for '{}'",
                knowledge_point
            );
        }

        predicted
    }

    pub fn keywords(&self, code: &str) -> Option<&[String]> {
        self.dictionary.get(code)
    }

    pub fn len(&self) -> usize {
        self.dictionary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dictionary.is_empty()
    }
}
