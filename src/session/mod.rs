pub mod practice;
pub mod tagger;

pub use practice::{DifficultyBand, PracticeQuestion, PracticeSession};
pub use tagger::{
    extract_knowledge_points, save_report, KnowledgePoint, KnowledgePointMatches,
    KnowledgePointReport, KnowledgeTagger, ReportSummary, TaggerError, TaggingReport,
};
