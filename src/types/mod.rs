pub mod identifiers;
pub mod match_result;

pub use identifiers::{DatasetVersion, KnowledgePointId, PracticeQuestionId, SessionId};
pub use match_result::{
    ExpectedMatch, MatchResult, MatchedQuestion, RecommendedOrder, ScoreBreakdown,
};
