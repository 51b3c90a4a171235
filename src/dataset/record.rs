use csv::StringRecord;
use serde::{Deserialize, Serialize};

use crate::config::ColumnMapping;

/// Answer choices A–E. Absent choices are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOptions {
    #[serde(rename = "A")]
    pub a: String,
    #[serde(rename = "B")]
    pub b: String,
    #[serde(rename = "C")]
    pub c: String,
    #[serde(rename = "D")]
    pub d: String,
    #[serde(rename = "E")]
    pub e: String,
}

/// One row of the question bank.
///
/// Missing columns and empty cells are empty strings, never absent values,
/// so scoring never has to special-case them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Not unique across source files.
    pub problem_id: String,
    /// May be comma-separated for multi-topic questions.
    pub topic_code: String,
    pub division: String,
    pub difficulty_code: String,

    pub question_text: String,
    pub options: QuestionOptions,
    pub answer: String,
    pub explanation: String,
    pub hint: String,

    pub year: String,
    pub competition_category: String,
    pub exam_name: String,
    pub problem_number: String,
}

impl QuestionRecord {
    pub fn formatted_title(&self) -> String {
        format!(
            "{} {} Problem {}",
            self.year, self.competition_category, self.problem_number
        )
    }

    pub fn has_topic_code(&self) -> bool {
        !self.topic_code.trim().is_empty()
    }
}

/// Resolved positions of the mapped columns inside one file's header row.
#[derive(Debug, Clone)]
pub(crate) struct ColumnIndex {
    problem_id: Option<usize>,
    topic_code: Option<usize>,
    division: Option<usize>,
    difficulty: Option<usize>,
    question_text: Option<usize>,
    answer: Option<usize>,
    explanation: Option<usize>,
    hint: Option<usize>,
    options: [Option<usize>; 5],
    year: Option<usize>,
    competition_category: Option<usize>,
    exam_name: Option<usize>,
    problem_number: Option<usize>,
}

impl ColumnIndex {
    pub(crate) fn resolve(headers: &StringRecord, mapping: &ColumnMapping) -> Self {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        Self {
            problem_id: find(&mapping.problem_id),
            topic_code: find(&mapping.topic_code),
            division: find(&mapping.division),
            difficulty: find(&mapping.difficulty),
            question_text: find(&mapping.question_text),
            answer: find(&mapping.answer),
            explanation: find(&mapping.explanation),
            hint: find(&mapping.hint),
            options: [
                find(&mapping.option_a),
                find(&mapping.option_b),
                find(&mapping.option_c),
                find(&mapping.option_d),
                find(&mapping.option_e),
            ],
            year: find(&mapping.year),
            competition_category: find(&mapping.competition_category),
            exam_name: find(&mapping.exam_name),
            problem_number: find(&mapping.problem_number),
        }
    }

    /// True when no mapped column was found in the header row.
    pub(crate) fn is_unresolved(&self) -> bool {
        [
            self.problem_id,
            self.topic_code,
            self.division,
            self.difficulty,
            self.question_text,
            self.answer,
            self.explanation,
            self.hint,
            self.year,
            self.competition_category,
            self.exam_name,
            self.problem_number,
        ]
        .iter()
        .chain(self.options.iter())
        .all(Option::is_none)
    }

    /// Names of mapped columns absent from the header row.
    pub(crate) fn missing<'a>(&self, mapping: &'a ColumnMapping) -> Vec<&'a str> {
        let pairs = [
            (self.problem_id, &mapping.problem_id),
            (self.topic_code, &mapping.topic_code),
            (self.division, &mapping.division),
            (self.difficulty, &mapping.difficulty),
            (self.question_text, &mapping.question_text),
        ];
        pairs
            .into_iter()
            .filter(|(idx, _)| idx.is_none())
            .map(|(_, name)| name.as_str())
            .collect()
    }

    pub(crate) fn record(&self, row: &StringRecord) -> QuestionRecord {
        let cell = |idx: Option<usize>| -> String {
            idx.and_then(|i| row.get(i)).unwrap_or_default().to_string()
        };

        QuestionRecord {
            problem_id: cell(self.problem_id),
            topic_code: cell(self.topic_code),
            division: cell(self.division),
            difficulty_code: cell(self.difficulty),
            question_text: cell(self.question_text),
            options: QuestionOptions {
                a: cell(self.options[0]),
                b: cell(self.options[1]),
                c: cell(self.options[2]),
                d: cell(self.options[3]),
                e: cell(self.options[4]),
            },
            answer: cell(self.answer),
            explanation: cell(self.explanation),
            hint: cell(self.hint),
            year: cell(self.year),
            competition_category: cell(self.competition_category),
            exam_name: cell(self.exam_name),
            problem_number: cell(self.problem_number),
        }
    }
}
