//! Knowledge-point to practice-question matching.
//!
//! `question-match` loads a tabular question bank once, predicts topic codes
//! for free-text knowledge points, scores every question with a pluggable
//! matching strategy, and annotates the admitted matches with relevance,
//! difficulty and practice priority. All matching is deterministic: the same
//! dataset and inputs always produce the same ordered output.
//!
//! Knowledge points come from `[KP:label]` markers in LLM-authored lecture
//! summaries; see [`session::KnowledgeTagger`].

pub mod config;
pub mod dataset;
pub mod matching;
pub mod session;
pub mod topics;
pub mod types;

pub use config::{ColumnMapping, ConfigError, MappingColumns, MatcherConfig};
pub use dataset::{DatasetStatistics, QuestionDataset, QuestionRecord};
pub use matching::{
    MatchingStrategy, QuestionMatcher, TopicCodeStrategy, TopicScorePolicy, WeightedStrategy,
};
pub use session::{KnowledgeTagger, PracticeSession};
pub use topics::TopicCodeResolver;
pub use types::{MatchResult, MatchedQuestion};
