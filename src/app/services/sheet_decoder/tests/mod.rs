//! Test utilities and fixtures for sheet-decoder testing
//!
//! This module provides a builder for raw sheet rows so tests can describe
//! which bubbles are filled instead of hand-writing hundreds of 0/1 fields.

use std::collections::HashMap;

use crate::app::services::sheet_decoder::keys;
use crate::app::services::sheet_decoder::raw_sheet::RawSheet;
use crate::constants::{
    ANSWER_OPTIONS, GLOBAL_ID_COLUMN, NUM_QUESTIONS, NUM_SURVEYS, QUESTIONNAIRE_ID_COLUMN,
    ROLL_DIGITS, ROLL_OPTIONS, SURVEY_OPTIONS, YEAR_TENS_OPTIONS, YEAR_UNITS_OPTIONS,
};

// Test modules
mod keys_tests;
mod selector_tests;

/// All indicator field keys of the full sheet layout, in export order
pub fn full_layout_keys() -> Vec<String> {
    let mut layout = vec![keys::semester_key(1), keys::semester_key(2)];

    for option in 1..=YEAR_TENS_OPTIONS {
        layout.push(keys::year_tens_key(option));
    }
    for option in 1..=YEAR_UNITS_OPTIONS {
        layout.push(keys::year_units_key(option));
    }
    for digit in 0..ROLL_DIGITS {
        for option in 1..=ROLL_OPTIONS {
            layout.push(keys::roll_key(digit, option));
        }
    }
    for question in 1..=NUM_QUESTIONS {
        let (column, position) = keys::question_slot(question);
        for letter in 0..ANSWER_OPTIONS {
            layout.push(keys::answer_key(column, position, letter));
        }
    }
    for question in 1..=NUM_SURVEYS {
        for option in 0..SURVEY_OPTIONS {
            layout.push(keys::survey_key(question, option));
        }
    }

    layout
}

/// Indicator field keys of the minimal sheet layout (identity block only)
pub fn minimal_layout_keys() -> Vec<String> {
    let mut layout = vec![keys::semester_key(1), keys::semester_key(2)];

    for option in 1..=YEAR_TENS_OPTIONS {
        layout.push(keys::year_tens_key(option));
    }
    for option in 1..=YEAR_UNITS_OPTIONS {
        layout.push(keys::year_units_key(option));
    }

    layout
}

/// Builder for one raw scan row.
///
/// Starts from an all-zeros row and fills bubbles through the setters. The
/// default fixtures describe a completely valid sheet matching the
/// end-to-end case used throughout the tests: qid `FCI042`, spring, year 15,
/// roll 307, every question answered, both surveys marked.
#[derive(Debug, Clone)]
pub struct SheetFixture {
    qid: String,
    layout: Vec<String>,
    set_bits: HashMap<String, i64>,
}

impl SheetFixture {
    /// Empty full-layout fixture: no bubbles filled, qid readable
    pub fn blank_full() -> Self {
        Self {
            qid: "FCI042".to_string(),
            layout: full_layout_keys(),
            set_bits: HashMap::new(),
        }
    }

    /// Fully valid full-layout fixture
    pub fn valid_full() -> Self {
        let mut fixture = Self::blank_full();
        fixture.set_semester_spring();
        fixture.set_year(1, 5);
        fixture.set_roll([3, 0, 7]);
        for question in 1..=NUM_QUESTIONS {
            fixture.set_answer(question, (question - 1) % ANSWER_OPTIONS);
        }
        fixture.set_survey(1, 4);
        fixture.set_survey(2, 2);
        fixture
    }

    /// Fully valid minimal-layout fixture (identity block only)
    pub fn valid_minimal() -> Self {
        let mut fixture = Self {
            qid: "FCI042".to_string(),
            layout: minimal_layout_keys(),
            set_bits: HashMap::new(),
        };
        fixture.set_semester_spring();
        fixture.set_year(1, 5);
        fixture
    }

    /// Override the raw questionnaire-id field
    pub fn with_qid(mut self, qid: impl Into<String>) -> Self {
        self.qid = qid.into();
        self
    }

    /// Mark the questionnaire id as unread by the scanner
    pub fn with_unread_qid(self) -> Self {
        self.with_qid("None")
    }

    /// Set one raw indicator field directly
    pub fn set_key(&mut self, key: impl Into<String>, value: i64) -> &mut Self {
        self.set_bits.insert(key.into(), value);
        self
    }

    pub fn set_semester_spring(&mut self) -> &mut Self {
        self.set_key(keys::semester_key(1), 1)
    }

    pub fn set_semester_fall(&mut self) -> &mut Self {
        self.set_key(keys::semester_key(2), 1)
    }

    /// Fill the year bubbles for the given digits
    pub fn set_year(&mut self, tens: usize, units: usize) -> &mut Self {
        self.set_key(keys::year_tens_key(tens + 1), 1);
        self.set_key(keys::year_units_key(units + 1), 1)
    }

    /// Fill the roll bubbles for the given digits
    pub fn set_roll(&mut self, digits: [usize; ROLL_DIGITS]) -> &mut Self {
        for (position, digit) in digits.iter().enumerate() {
            self.set_key(keys::roll_key(position, digit + 1), 1);
        }
        self
    }

    /// Fill one answer bubble (`letter` is the 0-based option index)
    pub fn set_answer(&mut self, question: usize, letter: usize) -> &mut Self {
        let (column, position) = keys::question_slot(question);
        self.set_key(keys::answer_key(column, position, letter), 1)
    }

    /// Clear every answer bubble of one question
    pub fn clear_answer(&mut self, question: usize) -> &mut Self {
        let (column, position) = keys::question_slot(question);
        for letter in 0..ANSWER_OPTIONS {
            self.set_key(keys::answer_key(column, position, letter), 0);
        }
        self
    }

    /// Fill one survey bubble (`option` is the 0-based bubble index)
    pub fn set_survey(&mut self, question: usize, option: usize) -> &mut Self {
        self.set_key(keys::survey_key(question, option), 1)
    }

    /// Clear every bubble of one survey question
    pub fn clear_survey(&mut self, question: usize) -> &mut Self {
        for option in 0..SURVEY_OPTIONS {
            self.set_key(keys::survey_key(question, option), 0);
        }
        self
    }

    /// Header row of the CSV export this fixture describes
    pub fn headers(&self) -> Vec<String> {
        let mut headers = vec![
            QUESTIONNAIRE_ID_COLUMN.to_string(),
            GLOBAL_ID_COLUMN.to_string(),
        ];
        headers.extend(self.layout.iter().cloned());
        headers
    }

    /// Field values of the CSV row this fixture describes
    pub fn values(&self) -> Vec<String> {
        let mut values = vec![self.qid.clone(), "7".to_string()];
        for key in &self.layout {
            values.push(self.set_bits.get(key).copied().unwrap_or(0).to_string());
        }
        values
    }

    /// Build the [`RawSheet`] for this fixture
    pub fn to_raw_sheet(&self) -> RawSheet {
        let fields = self
            .headers()
            .into_iter()
            .zip(self.values())
            .collect::<Vec<_>>();
        RawSheet::from_fields(fields)
    }

    /// Render this fixture as one CSV line
    pub fn to_csv_row(&self) -> String {
        self.values().join(",")
    }

    /// Render a complete CSV export from several fixtures
    pub fn to_csv(fixtures: &[SheetFixture]) -> String {
        let mut csv = fixtures[0].headers().join(",");
        csv.push('\n');
        for fixture in fixtures {
            csv.push_str(&fixture.to_csv_row());
            csv.push('\n');
        }
        csv
    }
}
