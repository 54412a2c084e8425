//! Tests for the exactly-one selection accumulator

use crate::app::services::sheet_decoder::selector::{Selector, SelectorError};

#[test]
fn test_record_then_consume() {
    let mut selector: Selector<usize> = Selector::new("year tens");

    selector.record(3).unwrap();
    assert_eq!(selector.consume().unwrap(), 3);
}

#[test]
fn test_second_record_conflicts() {
    let mut selector: Selector<usize> = Selector::new("year tens");

    selector.record(1).unwrap();
    let err = selector.record(2).unwrap_err();
    assert_eq!(
        err,
        SelectorError::Conflict {
            group: "year tens".to_string()
        }
    );
}

#[test]
fn test_consume_without_record_is_empty() {
    let mut selector: Selector<char> = Selector::new("question 4");

    let err = selector.consume().unwrap_err();
    assert_eq!(
        err,
        SelectorError::Empty {
            group: "question 4".to_string()
        }
    );
}

#[test]
fn test_consume_clears_pending_value() {
    let mut selector: Selector<usize> = Selector::new("roll digit 0");

    selector.record(9).unwrap();
    assert_eq!(selector.consume().unwrap(), 9);

    // Consumed means empty again
    assert!(matches!(
        selector.consume(),
        Err(SelectorError::Empty { .. })
    ));

    // And recording is allowed again after a consume
    selector.record(4).unwrap();
    assert_eq!(selector.consume().unwrap(), 4);
}

#[test]
fn test_zero_is_a_real_pending_value() {
    // Digit 0 must conflict with a second record like any other value
    let mut selector: Selector<usize> = Selector::new("year units");

    selector.record(0).unwrap();
    assert!(matches!(
        selector.record(5),
        Err(SelectorError::Conflict { .. })
    ));
}

#[test]
fn test_error_messages_name_the_group() {
    let mut selector: Selector<usize> = Selector::new("survey question 2");

    let err = selector.consume().unwrap_err();
    assert_eq!(err.to_string(), "no box is checked in survey question 2");

    selector.record(1).unwrap();
    let err = selector.record(2).unwrap_err();
    assert_eq!(
        err.to_string(),
        "more than one box is checked in survey question 2"
    );
}
