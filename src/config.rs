//! Schema configuration for answer-sheet decoding.
//!
//! The scanning pipeline went through two sheet layouts: a minimal sheet
//! carrying only the identity block (semester and year), and the full sheet
//! adding a roll number, 30 multiple-choice questions and 2 survey questions.
//! `SheetSchema` selects which field-groups the decoder requests from a raw
//! row and how the registration id is composed, so one decoder serves both
//! layouts.

use crate::constants::{
    DEFAULT_RID_PREFIX, NUM_QUESTIONS, NUM_SURVEYS, OUTPUT_ID_COLUMN, OUTPUT_QID_COLUMN,
    OUTPUT_RID_COLUMN, OUTPUT_SURVEY_PREFIX, RID_PLACEHOLDER_SUFFIX,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Which generation of the answer sheet an input file was scanned from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaVariant {
    /// Identity block only: semester and year
    Minimal,
    /// Identity block, roll number, 30 answers and 2 survey questions
    Full,
}

/// Decoding configuration for one batch of scanned sheets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSchema {
    /// Sheet layout generation
    pub variant: SchemaVariant,

    /// Programme prefix of composed registration ids (e.g. "BCS")
    pub rid_prefix: String,

    /// Trailing suffix of composed registration ids. The minimal sheet has
    /// no roll number, so its ids carry a fixed placeholder instead.
    pub rid_suffix: String,
}

impl SheetSchema {
    /// Schema for the full sheet layout (roll number decoded, empty suffix)
    pub fn full() -> Self {
        Self {
            variant: SchemaVariant::Full,
            rid_prefix: DEFAULT_RID_PREFIX.to_string(),
            rid_suffix: String::new(),
        }
    }

    /// Schema for the minimal sheet layout (no roll number, placeholder suffix)
    pub fn minimal() -> Self {
        Self {
            variant: SchemaVariant::Minimal,
            rid_prefix: DEFAULT_RID_PREFIX.to_string(),
            rid_suffix: RID_PLACEHOLDER_SUFFIX.to_string(),
        }
    }

    /// Override the registration-id programme prefix
    pub fn with_rid_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.rid_prefix = prefix.into();
        self
    }

    /// Override the registration-id suffix
    pub fn with_rid_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.rid_suffix = suffix.into();
        self
    }

    /// Whether the layout carries a roll-number block
    pub fn includes_roll(&self) -> bool {
        self.variant == SchemaVariant::Full
    }

    /// Whether the layout carries answer and survey blocks
    pub fn includes_answers(&self) -> bool {
        self.variant == SchemaVariant::Full
    }

    /// Validate the configuration for consistency
    pub fn validate(&self) -> Result<()> {
        if self.rid_prefix.trim().is_empty() {
            return Err(Error::configuration(
                "Registration id prefix cannot be empty".to_string(),
            ));
        }

        if self.rid_prefix.contains('-') || self.rid_suffix.contains('-') {
            return Err(Error::configuration(
                "Registration id prefix and suffix cannot contain '-'".to_string(),
            ));
        }

        Ok(())
    }

    /// Column headers of the output file for this layout:
    /// `id, qid, rid` and, on the full sheet, `1..30, s1, s2`.
    pub fn output_headers(&self) -> Vec<String> {
        let mut headers = vec![
            OUTPUT_ID_COLUMN.to_string(),
            OUTPUT_QID_COLUMN.to_string(),
            OUTPUT_RID_COLUMN.to_string(),
        ];

        if self.includes_answers() {
            for question in 1..=NUM_QUESTIONS {
                headers.push(question.to_string());
            }
            for survey in 1..=NUM_SURVEYS {
                headers.push(format!("{}{}", OUTPUT_SURVEY_PREFIX, survey));
            }
        }

        headers
    }
}

impl Default for SheetSchema {
    fn default() -> Self {
        Self::full()
    }
}
