//! OMR Extractor Library
//!
//! A Rust library for extracting structured exam-response data from the raw
//! CSV export of an optical-mark-recognition scanning pipeline.
//!
//! This library provides tools for:
//! - Decoding per-bubble 0/1 indicator fields into semantic values
//! - Enforcing the exactly-one-selected constraint on every bubble group
//! - Assembling student registration identifiers from decoded fields
//! - Recovering questionnaire ids from a manual lookup table
//! - Writing decoded records to fixed-column CSV output
//! - Per-row error isolation so one bad sheet never aborts a batch

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod qid_registry;
        pub mod report_writer;
        pub mod sheet_decoder;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Answer, DecodedRecord, Semester};
pub use app::services::qid_registry::QidRegistry;
pub use app::services::sheet_decoder::{ExtractResult, ExtractStats, SheetParser};
pub use config::SheetSchema;

/// Result type alias for the OMR extractor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for OMR extraction operations
///
/// Row-level validation errors carry the 1-based row sequence number and the
/// field-group that violated its constraint, so each can be logged standalone.
/// Everything else (I/O, malformed CSV, schema mismatches) is fatal for the
/// whole batch.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Field key expected by the sheet layout is absent from the input.
    /// The input does not match the scanner export format at all.
    #[error("schema mismatch in row {row}: field '{key}' not found in input")]
    SchemaMismatch { row: usize, key: String },

    /// Indicator field held something other than an integer
    #[error("schema mismatch in row {row}: field '{key}' holds non-indicator value '{value}'")]
    InvalidIndicator {
        row: usize,
        key: String,
        value: String,
    },

    /// Questionnaire id absent from both the raw row and the recovery table
    #[error("questionnaire id is missing for row {row}")]
    MissingQuestionnaireId { row: usize },

    /// Zero or two semester bits set
    #[error("incorrect semester choice (FA/SP) in row {row}")]
    InvalidSemesterChoice { row: usize },

    /// More than one box checked in a year-digit group
    #[error("multiple checked boxes in year {group} entry in row {row}")]
    MultipleYearBoxes { row: usize, group: String },

    /// No box checked in a year-digit group
    #[error("missing checked box in year {group} entry in row {row}")]
    MissingYearBoxes { row: usize, group: String },

    /// More than one box checked in a roll-number digit group
    #[error("multiple checked boxes in roll digit {digit} in row {row}")]
    MultipleRollBoxes { row: usize, digit: usize },

    /// No box checked in a roll-number digit group
    #[error("missing checked box in roll digit {digit} in row {row}")]
    MissingRollBoxes { row: usize, digit: usize },

    /// More than one answer bubble filled for a question.
    /// There is no "missing" counterpart: an unanswered question is valid.
    #[error("multiple checked boxes for question {question} in row {row}")]
    MultipleAnswerBoxes { row: usize, question: usize },

    /// More than one box checked for a survey question
    #[error("multiple checked boxes for survey question {question} in row {row}")]
    MultipleSurveyBoxes { row: usize, question: usize },

    /// No box checked for a survey question
    #[error("no box checked for survey question {question} in row {row}")]
    MissingSurveyBox { row: usize, question: usize },

    /// Batch-level validation verdict raised by the check command
    #[error("validation failed: {failed} of {total} rows violate the sheet constraints")]
    ValidationFailed { failed: usize, total: usize },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a schema mismatch error for an absent field key
    pub fn schema_mismatch(row: usize, key: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            row,
            key: key.into(),
        }
    }

    /// Create an invalid indicator error
    pub fn invalid_indicator(
        row: usize,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidIndicator {
            row,
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a missing questionnaire id error
    pub fn missing_questionnaire_id(row: usize) -> Self {
        Self::MissingQuestionnaireId { row }
    }

    /// Create an invalid semester choice error
    pub fn invalid_semester_choice(row: usize) -> Self {
        Self::InvalidSemesterChoice { row }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether this error is a per-row data-validation failure.
    ///
    /// Validation failures are contained to the offending row: the driver
    /// logs them, skips the row and continues the batch. Anything else
    /// (I/O, malformed CSV, a field key absent from the input) indicates the
    /// input does not match the expected export format and aborts the batch.
    pub fn is_row_validation(&self) -> bool {
        matches!(
            self,
            Error::MissingQuestionnaireId { .. }
                | Error::InvalidSemesterChoice { .. }
                | Error::MultipleYearBoxes { .. }
                | Error::MissingYearBoxes { .. }
                | Error::MultipleRollBoxes { .. }
                | Error::MissingRollBoxes { .. }
                | Error::MultipleAnswerBoxes { .. }
                | Error::MultipleSurveyBoxes { .. }
                | Error::MissingSurveyBox { .. }
        )
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}
