//! Tests for .var rotational constant decoding

use super::*;
use crate::error::IngestError;
use crate::parsers::decode_rotational_constants;

#[test]
fn test_decode_spfit_parameter_file() {
    let constants = decode_rotational_constants(&create_test_var()).unwrap();

    assert_eq!(constants.a, Some(281970.556));
    assert_eq!(constants.b, Some(38833.9871));
    assert_eq!(constants.c, Some(34004.2444));
}

#[test]
fn test_missing_axis_stays_absent() {
    let constants = decode_rotational_constants("H2O /A 20.0\nH2O /B 10.0\n").unwrap();

    // the marker sits in the second field, so the value follows it
    assert_eq!(constants.a, Some(20.0));
    assert_eq!(constants.b, Some(10.0));
    assert_eq!(constants.c, None);
}

#[test]
fn test_later_lines_overwrite() {
    let content = "1 100.0 /A\n2 50.0 /B\n1 101.5 /A\n";
    let constants = decode_rotational_constants(content).unwrap();

    assert_eq!(constants.a, Some(101.5));
    assert_eq!(constants.b, Some(50.0));
}

#[test]
fn test_line_mentioning_two_axes_sets_both() {
    let constants = decode_rotational_constants("x 7.5 /A/B\n").unwrap();

    assert_eq!(constants.a, Some(7.5));
    assert_eq!(constants.b, Some(7.5));
    assert_eq!(constants.c, None);
}

#[test]
fn test_no_markers_is_empty() {
    let constants = decode_rotational_constants("title\n  200 -0.075 /DJ\n\n").unwrap();
    assert!(constants.is_empty());
}

#[test]
fn test_non_numeric_constant_aborts() {
    match decode_rotational_constants("ok 1.0 /A\nbad xyz /C\n") {
        Err(IngestError::MalformedNumber { line, token }) => {
            assert_eq!(line, 2);
            assert_eq!(token, "xyz");
        }
        other => panic!("expected MalformedNumber, got {:?}", other),
    }
}

#[test]
fn test_marker_without_value_aborts() {
    assert!(matches!(
        decode_rotational_constants("/B\n"),
        Err(IngestError::MalformedLine { line: 1, .. })
    ));
}

#[test]
fn test_value_after_marker_field() {
    let content = "H2O /A 27880.0\nH2O /B 14500.5\nH2O /C 9580.2\n";
    let constants = decode_rotational_constants(content).unwrap();

    assert_eq!(constants.a, Some(27880.0));
    assert_eq!(constants.b, Some(14500.5));
    assert_eq!(constants.c, Some(9580.2));
}

#[test]
fn test_marker_with_nothing_after_it_aborts() {
    match decode_rotational_constants("bad /C\n") {
        Err(IngestError::MalformedNumber { line, token }) => {
            assert_eq!(line, 1);
            assert_eq!(token, "/C");
        }
        other => panic!("expected MalformedNumber, got {:?}", other),
    }
}

#[test]
fn test_marker_followed_by_non_number_aborts() {
    assert!(matches!(
        decode_rotational_constants("H2O /A big\n"),
        Err(IngestError::MalformedNumber { line: 1, .. })
    ));
}
