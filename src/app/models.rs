//! Data models for decoded answer sheets
//!
//! This module contains the core data structures representing one scanned
//! sheet after decoding: the semester toggle, a single multiple-choice
//! answer, and the complete decoded record that is serialized to output.

use crate::config::SheetSchema;
use crate::constants::{NUM_QUESTIONS, NUM_SURVEYS};
use crate::{Error, Result};
use std::fmt;

// =============================================================================
// Semester
// =============================================================================

/// The semester toggle on the identity block of the sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Semester {
    Spring,
    Fall,
}

impl Semester {
    /// Two-letter code used inside registration ids
    pub fn code(&self) -> &'static str {
        match self {
            Semester::Spring => "SP",
            Semester::Fall => "FA",
        }
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// =============================================================================
// Answer
// =============================================================================

/// A single multiple-choice selection.
///
/// An unanswered question is represented as `Option::<Answer>::None` by the
/// decoder, not as a variant here: absence is a property of the question
/// slot, not of the letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    A,
    B,
    C,
    D,
    E,
}

impl Answer {
    /// All options in bubble order (option index 0 = A)
    pub const ALL: [Answer; 5] = [Answer::A, Answer::B, Answer::C, Answer::D, Answer::E];

    /// Map a bubble position (0-4) to its letter
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Answer::A),
            1 => Some(Answer::B),
            2 => Some(Answer::C),
            3 => Some(Answer::D),
            4 => Some(Answer::E),
            _ => None,
        }
    }

    /// The letter printed on the sheet
    pub fn letter(&self) -> char {
        match self {
            Answer::A => 'A',
            Answer::B => 'B',
            Answer::C => 'C',
            Answer::D => 'D',
            Answer::E => 'E',
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

// =============================================================================
// Decoded Record
// =============================================================================

/// One scanned answer sheet after decoding.
///
/// Built once per valid raw row and immutable afterwards. `answers` and
/// `surveys` are empty on the minimal sheet layout; on the full layout they
/// hold exactly [`NUM_QUESTIONS`] and [`NUM_SURVEYS`] entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRecord {
    /// 1-based row sequence number assigned by the batch driver
    pub id: usize,

    /// Questionnaire id with the scanner prefix stripped (e.g. "042")
    pub qid: String,

    /// Composed registration id (e.g. "BCS-SP15307-")
    pub rid: String,

    /// Multiple-choice answers 1-30; `None` marks an unanswered question
    pub answers: Vec<Option<Answer>>,

    /// Survey responses, each in 1..=5
    pub surveys: Vec<u8>,
}

impl DecodedRecord {
    /// Validate shape against the schema the record was decoded with
    pub fn validate(&self, schema: &SheetSchema) -> Result<()> {
        let (expected_answers, expected_surveys) = if schema.includes_answers() {
            (NUM_QUESTIONS, NUM_SURVEYS)
        } else {
            (0, 0)
        };

        if self.answers.len() != expected_answers {
            return Err(Error::configuration(format!(
                "Decoded record {} holds {} answers, layout expects {}",
                self.id,
                self.answers.len(),
                expected_answers
            )));
        }

        if self.surveys.len() != expected_surveys {
            return Err(Error::configuration(format!(
                "Decoded record {} holds {} survey responses, layout expects {}",
                self.id,
                self.surveys.len(),
                expected_surveys
            )));
        }

        if let Some(value) = self.surveys.iter().find(|v| !(1..=5).contains(*v)) {
            return Err(Error::configuration(format!(
                "Decoded record {} holds out-of-range survey response {}",
                self.id, value
            )));
        }

        Ok(())
    }

    /// Project the record onto the fixed output columns for `schema`.
    ///
    /// Column order matches [`SheetSchema::output_headers`]; unanswered
    /// questions serialize as empty cells.
    pub fn output_fields(&self, schema: &SheetSchema) -> Vec<String> {
        let mut fields = vec![self.id.to_string(), self.qid.clone(), self.rid.clone()];

        if schema.includes_answers() {
            for answer in &self.answers {
                fields.push(match answer {
                    Some(a) => a.letter().to_string(),
                    None => String::new(),
                });
            }
            for survey in &self.surveys {
                fields.push(survey.to_string());
            }
        }

        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ANSWER_LETTERS;

    fn full_record() -> DecodedRecord {
        DecodedRecord {
            id: 7,
            qid: "042".to_string(),
            rid: "BCS-SP15307-".to_string(),
            answers: vec![Some(Answer::C); NUM_QUESTIONS],
            surveys: vec![4, 2],
        }
    }

    #[test]
    fn test_semester_codes() {
        assert_eq!(Semester::Spring.code(), "SP");
        assert_eq!(Semester::Fall.code(), "FA");
        assert_eq!(Semester::Fall.to_string(), "FA");
    }

    #[test]
    fn test_answer_from_index() {
        assert_eq!(Answer::from_index(0), Some(Answer::A));
        assert_eq!(Answer::from_index(2), Some(Answer::C));
        assert_eq!(Answer::from_index(4), Some(Answer::E));
        assert_eq!(Answer::from_index(5), None);
    }

    #[test]
    fn test_answer_letters_match_constants() {
        for (index, expected) in ANSWER_LETTERS.iter().enumerate() {
            assert_eq!(Answer::from_index(index).unwrap().letter(), *expected);
        }
    }

    #[test]
    fn test_validate_full_record() {
        let record = full_record();
        assert!(record.validate(&SheetSchema::full()).is_ok());

        let mut short = record.clone();
        short.answers.pop();
        assert!(short.validate(&SheetSchema::full()).is_err());

        let mut bad_survey = record.clone();
        bad_survey.surveys[0] = 6;
        assert!(bad_survey.validate(&SheetSchema::full()).is_err());
    }

    #[test]
    fn test_validate_minimal_record() {
        let record = DecodedRecord {
            id: 1,
            qid: "042".to_string(),
            rid: "BCS-SP15-XXX".to_string(),
            answers: vec![],
            surveys: vec![],
        };
        assert!(record.validate(&SheetSchema::minimal()).is_ok());
        assert!(record.validate(&SheetSchema::full()).is_err());
    }

    #[test]
    fn test_output_fields_full() {
        let mut record = full_record();
        record.answers[1] = None;

        let fields = record.output_fields(&SheetSchema::full());
        assert_eq!(fields.len(), 3 + NUM_QUESTIONS + NUM_SURVEYS);
        assert_eq!(fields[0], "7");
        assert_eq!(fields[1], "042");
        assert_eq!(fields[2], "BCS-SP15307-");
        assert_eq!(fields[3], "C");
        // Unanswered question serializes as an empty cell
        assert_eq!(fields[4], "");
        assert_eq!(fields[33], "4");
        assert_eq!(fields[34], "2");
    }

    #[test]
    fn test_output_fields_minimal() {
        let record = DecodedRecord {
            id: 3,
            qid: "101".to_string(),
            rid: "BCS-FA09-XXX".to_string(),
            answers: vec![],
            surveys: vec![],
        };
        let fields = record.output_fields(&SheetSchema::minimal());
        assert_eq!(fields, vec!["3", "101", "BCS-FA09-XXX"]);
    }
}
