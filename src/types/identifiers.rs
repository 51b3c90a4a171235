use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Content hash of the question bank text a snapshot was built from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetVersion(String);

impl DatasetVersion {
    pub fn from_content(content: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content);

        let hash = hasher.finalize();
        let hex = hex::encode(hash);

        DatasetVersion(format!("sha256:{hex}"))
    }

    /// Version of a snapshot that has no backing text (empty or in-memory).
    pub fn empty() -> Self {
        Self::from_content(b"")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Sequence id of a knowledge point inside one summary: `kp_001`, `kp_002`, ...
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnowledgePointId(String);

impl KnowledgePointId {
    /// `index` is zero-based.
    pub fn from_index(index: usize) -> Self {
        KnowledgePointId(format!("kp_{:03}", index + 1))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Per-session question id: `q_001`, `q_002`, ...
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PracticeQuestionId(String);

impl PracticeQuestionId {
    /// `index` is zero-based.
    pub fn from_index(index: usize) -> Self {
        PracticeQuestionId(format!("q_{:03}", index + 1))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Practice session id.
///
/// Derived from the knowledge point and the question count only, so two
/// sessions built from the same inputs share an id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn derive(knowledge_point: &str, question_count: usize) -> Self {
        SessionId(format!("session_{knowledge_point}_{question_count}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
