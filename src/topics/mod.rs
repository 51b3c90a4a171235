pub mod keywords;
pub mod resolver;

pub use keywords::{KeywordFamily, KeywordTable};
pub use resolver::{MappingError, TopicCodeResolver};
