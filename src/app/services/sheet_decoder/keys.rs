//! Field-key construction for the fixed answer-sheet layout
//!
//! Every bubble on the sheet is exported as one CSV column named
//! `{group}_{index}_{subindex}`. These functions are the single place the
//! naming scheme lives; the decoder never formats a key itself.

use crate::constants::{QUESTIONS_PER_COLUMN, groups};

/// Key of a semester bit: `1_2_1_0` (spring) or `1_2_2_0` (fall)
pub fn semester_key(index: usize) -> String {
    format!("{}_{}_0", groups::SEMESTER, index)
}

/// Key of a year tens-digit option, `1_3_{1..3}_0`
pub fn year_tens_key(option: usize) -> String {
    format!("{}_{}_0", groups::YEAR_TENS, option)
}

/// Key of a year units-digit option, `1_4_{1..10}_0`
pub fn year_units_key(option: usize) -> String {
    format!("{}_{}_0", groups::YEAR_UNITS, option)
}

/// Key of a roll-number option, `1_5_{digit}_{1..10}`.
/// `digit` is the 0-based digit position, `option` the 1-based bubble index.
pub fn roll_key(digit: usize, option: usize) -> String {
    format!("{}_{}_{}", groups::ROLL, digit, option)
}

/// Key of an answer bubble, `2_{column}_{position}_{letter}`.
/// `letter` is the 0-based option index (0 = A).
pub fn answer_key(column: usize, position: usize, letter: usize) -> String {
    format!("{}_{}_{}_{}", groups::ANSWERS, column, position, letter)
}

/// Key of a survey bubble, `3_1_{question}_{option}`.
/// `option` is the 0-based bubble index; the decoded value is `option + 1`.
pub fn survey_key(question: usize, option: usize) -> String {
    format!("{}_{}_{}", groups::SURVEY, question, option)
}

/// Map a question number (1-30) to its (column, position) slot on the sheet.
///
/// Questions 1-15 occupy column 1 at their own position; questions 16-30
/// occupy column 2 at position `n - 15`.
pub fn question_slot(question: usize) -> (usize, usize) {
    if question <= QUESTIONS_PER_COLUMN {
        (1, question)
    } else {
        (2, question - QUESTIONS_PER_COLUMN)
    }
}
