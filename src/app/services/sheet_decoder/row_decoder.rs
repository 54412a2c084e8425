//! Decoding of a single raw scan row
//!
//! This module turns one [`RawSheet`] into a [`DecodedRecord`], driving a
//! fresh [`Selector`] over every bubble group and applying each group's
//! recovery policy. Steps run in a fixed order and short-circuit at the
//! first failure, so no partial records are ever emitted. The decoder does
//! no logging and no I/O; it returns labeled errors and lets the caller
//! decide what to do with the row.

use super::keys;
use super::raw_sheet::{Indicators, RawSheet};
use super::selector::{Selector, SelectorError};
use crate::app::models::{Answer, DecodedRecord, Semester};
use crate::app::services::qid_registry::QidRegistry;
use crate::config::SheetSchema;
use crate::constants::{
    NUM_QUESTIONS, NUM_SURVEYS, ROLL_DIGITS, ROLL_OPTIONS, SURVEY_OPTIONS, YEAR_TENS_OPTIONS,
    YEAR_UNITS_OPTIONS, strip_qid_prefix,
};
use crate::{Error, Result};

/// Decode one raw scan row into a [`DecodedRecord`].
///
/// `row` is the 1-based sequence number assigned by the batch driver; it
/// tags every validation error so each can be logged standalone. The
/// registry supplies questionnaire ids the scanner failed to read, keyed by
/// that same sequence number.
pub fn decode_sheet(
    row: usize,
    sheet: &RawSheet,
    registry: &QidRegistry,
    schema: &SheetSchema,
) -> Result<DecodedRecord> {
    let qid = resolve_questionnaire_id(row, sheet, registry)?;

    let indicators = sheet.normalize(row)?;

    let semester = decode_semester(&indicators, row)?;
    let year = decode_year(&indicators, row)?;

    let roll = if schema.includes_roll() {
        decode_roll(&indicators, row)?
    } else {
        String::new()
    };

    let rid = format!(
        "{}-{}{}{}-{}",
        schema.rid_prefix, semester, year, roll, schema.rid_suffix
    );

    let (answers, surveys) = if schema.includes_answers() {
        (
            decode_answers(&indicators, row)?,
            decode_surveys(&indicators, row)?,
        )
    } else {
        (Vec::new(), Vec::new())
    };

    Ok(DecodedRecord {
        id: row,
        qid,
        rid,
        answers,
        surveys,
    })
}

/// Resolve the questionnaire id: scanner-read field first (with the fixed
/// prefix stripped), then the recovery table, then a validation error.
fn resolve_questionnaire_id(
    row: usize,
    sheet: &RawSheet,
    registry: &QidRegistry,
) -> Result<String> {
    if let Some(raw) = sheet.questionnaire_id() {
        return Ok(strip_qid_prefix(raw).to_string());
    }

    registry
        .get(row)
        .map(|qid| qid.to_string())
        .ok_or_else(|| Error::missing_questionnaire_id(row))
}

/// Decode the semester toggle: two single-bit fields, valid iff exactly one
/// is set.
fn decode_semester(indicators: &Indicators, row: usize) -> Result<Semester> {
    let spring = indicators.is_set(&keys::semester_key(1))?;
    let fall = indicators.is_set(&keys::semester_key(2))?;

    if spring ^ fall {
        Ok(if spring {
            Semester::Spring
        } else {
            Semester::Fall
        })
    } else {
        Err(Error::invalid_semester_choice(row))
    }
}

/// Decode the two-digit enrollment year as a string, tens digit first
fn decode_year(indicators: &Indicators, row: usize) -> Result<String> {
    let tens = select_one(
        indicators,
        "year tens",
        (1..=YEAR_TENS_OPTIONS).map(|option| (keys::year_tens_key(option), option - 1)),
    )?
    .map_err(|e| year_error(row, "tens", e))?;

    let units = select_one(
        indicators,
        "year units",
        (1..=YEAR_UNITS_OPTIONS).map(|option| (keys::year_units_key(option), option - 1)),
    )?
    .map_err(|e| year_error(row, "units", e))?;

    Ok(format!("{}{}", tens, units))
}

fn year_error(row: usize, group: &str, error: SelectorError) -> Error {
    match error {
        SelectorError::Conflict { .. } => Error::MultipleYearBoxes {
            row,
            group: group.to_string(),
        },
        SelectorError::Empty { .. } => Error::MissingYearBoxes {
            row,
            group: group.to_string(),
        },
    }
}

/// Decode the three-digit roll number, concatenated in digit order.
/// `digit` in errors is the 0-based digit position on the sheet.
fn decode_roll(indicators: &Indicators, row: usize) -> Result<String> {
    let mut roll = String::with_capacity(ROLL_DIGITS);

    for digit in 0..ROLL_DIGITS {
        let value = select_one(
            indicators,
            &format!("roll digit {}", digit),
            (1..=ROLL_OPTIONS).map(|option| (keys::roll_key(digit, option), option - 1)),
        )?
        .map_err(|e| match e {
            SelectorError::Conflict { .. } => Error::MultipleRollBoxes { row, digit },
            SelectorError::Empty { .. } => Error::MissingRollBoxes { row, digit },
        })?;

        roll.push_str(&value.to_string());
    }

    Ok(roll)
}

/// Decode all 30 multiple-choice answers.
///
/// An empty group is NOT an error here: it decodes to `None` ("no answer").
/// This is deliberate and differs from every other group on the sheet.
fn decode_answers(indicators: &Indicators, row: usize) -> Result<Vec<Option<Answer>>> {
    let mut answers = Vec::with_capacity(NUM_QUESTIONS);

    for question in 1..=NUM_QUESTIONS {
        let (column, position) = keys::question_slot(question);
        let options = Answer::ALL
            .iter()
            .enumerate()
            .map(|(letter, answer)| (keys::answer_key(column, position, letter), *answer));

        match select_one(indicators, &format!("question {}", question), options)? {
            Ok(answer) => answers.push(Some(answer)),
            Err(SelectorError::Empty { .. }) => answers.push(None),
            Err(SelectorError::Conflict { .. }) => {
                return Err(Error::MultipleAnswerBoxes { row, question });
            }
        }
    }

    Ok(answers)
}

/// Decode both survey responses as integers in 1..=5.
/// Unlike the answer groups, an empty survey group is a validation error.
fn decode_surveys(indicators: &Indicators, row: usize) -> Result<Vec<u8>> {
    let mut surveys = Vec::with_capacity(NUM_SURVEYS);

    for question in 1..=NUM_SURVEYS {
        let value = select_one(
            indicators,
            &format!("survey question {}", question),
            (0..SURVEY_OPTIONS).map(|option| (keys::survey_key(question, option), (option + 1) as u8)),
        )?
        .map_err(|e| match e {
            SelectorError::Conflict { .. } => Error::MultipleSurveyBoxes { row, question },
            SelectorError::Empty { .. } => Error::MissingSurveyBox { row, question },
        })?;

        surveys.push(value);
    }

    Ok(surveys)
}

/// Drive one [`Selector`] over a bubble group.
///
/// Feeds every set bit into the selector in option order, then consumes. The
/// outer `Result` carries fatal lookup failures (absent field key); the
/// inner one carries the group's exactly-one verdict for the caller to
/// relabel under its own policy.
fn select_one<T>(
    indicators: &Indicators,
    group: &str,
    options: impl IntoIterator<Item = (String, T)>,
) -> Result<std::result::Result<T, SelectorError>> {
    let mut selector = Selector::new(group);

    for (key, value) in options {
        if indicators.is_set(&key)? {
            if let Err(conflict) = selector.record(value) {
                return Ok(Err(conflict));
            }
        }
    }

    Ok(selector.consume())
}
