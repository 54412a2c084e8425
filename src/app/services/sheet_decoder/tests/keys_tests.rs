//! Tests for field-key construction

use crate::app::services::sheet_decoder::keys;

#[test]
fn test_semester_keys() {
    assert_eq!(keys::semester_key(1), "1_2_1_0");
    assert_eq!(keys::semester_key(2), "1_2_2_0");
}

#[test]
fn test_year_keys() {
    assert_eq!(keys::year_tens_key(1), "1_3_1_0");
    assert_eq!(keys::year_tens_key(3), "1_3_3_0");
    assert_eq!(keys::year_units_key(1), "1_4_1_0");
    assert_eq!(keys::year_units_key(10), "1_4_10_0");
}

#[test]
fn test_roll_keys() {
    assert_eq!(keys::roll_key(0, 1), "1_5_0_1");
    assert_eq!(keys::roll_key(2, 10), "1_5_2_10");
}

#[test]
fn test_answer_keys() {
    assert_eq!(keys::answer_key(1, 1, 0), "2_1_1_0");
    assert_eq!(keys::answer_key(2, 15, 4), "2_2_15_4");
}

#[test]
fn test_survey_keys() {
    assert_eq!(keys::survey_key(1, 0), "3_1_1_0");
    assert_eq!(keys::survey_key(2, 4), "3_1_2_4");
}

#[test]
fn test_question_slot_mapping() {
    // First column holds questions 1-15 at their own position
    assert_eq!(keys::question_slot(1), (1, 1));
    assert_eq!(keys::question_slot(15), (1, 15));

    // Second column holds questions 16-30, offset by 15
    assert_eq!(keys::question_slot(16), (2, 1));
    assert_eq!(keys::question_slot(17), (2, 2));
    assert_eq!(keys::question_slot(30), (2, 15));
}

#[test]
fn test_layout_keys_are_distinct() {
    let layout = super::full_layout_keys();
    let unique: std::collections::HashSet<_> = layout.iter().collect();
    assert_eq!(unique.len(), layout.len());

    // 2 semester + 3 + 10 year + 30 roll + 150 answer + 10 survey
    assert_eq!(layout.len(), 205);
}
