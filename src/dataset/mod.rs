pub mod dataset;
pub mod encoding;
pub mod record;

pub use dataset::{DatasetError, DatasetSnapshot, DatasetStatistics, QuestionDataset};
pub use encoding::{read_decoded, DecodeError, DecodedText, SourceEncoding};
pub use record::{QuestionOptions, QuestionRecord};
