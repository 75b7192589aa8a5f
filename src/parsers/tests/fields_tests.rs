//! Tests for tokenizing, column slicing and numeric conversion

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::IngestError;
use crate::parsers::fields::{
    column, parse_decimal, parse_decimal_with_scale, parse_f64, parse_i32, raw_column,
    required_token, tokenize,
};

#[test]
fn test_tokenize_collapses_whitespace() {
    assert_eq!(tokenize("  300.000\t 2883.1190  "), vec!["300.000", "2883.1190"]);
    assert!(tokenize("   ").is_empty());
}

#[test]
fn test_required_token_reports_missing_field() {
    let tokens = tokenize("001");
    assert_eq!(required_token(&tokens, 0, 3, "label").unwrap(), "001");

    match required_token(&tokens, 1, 3, "dipole value") {
        Err(IngestError::MalformedLine { line, reason }) => {
            assert_eq!(line, 3);
            assert!(reason.contains("dipole value"));
        }
        other => panic!("expected MalformedLine, got {:?}", other),
    }
}

#[test]
fn test_column_clamps_short_lines() {
    let text = "   72837.9480";
    assert_eq!(column(text, 0..13), "72837.9480");
    assert_eq!(raw_column(text, 10..20), "480");
    assert_eq!(raw_column(text, 20..30), "");
}

#[test]
fn test_parse_decimal_accepts_scientific_forms() {
    assert_eq!(parse_decimal("12.5", 1).unwrap(), Decimal::from_str("12.5").unwrap());
    assert_eq!(parse_decimal("1.5E-03", 1).unwrap(), Decimal::from_str("0.0015").unwrap());
    assert_eq!(parse_decimal("1.5D-03", 1).unwrap(), Decimal::from_str("0.0015").unwrap());
    assert_eq!(parse_decimal("-2.0e2", 1).unwrap(), Decimal::from_str("-200").unwrap());
}

#[test]
fn test_parse_decimal_handles_exponents_past_decimal_scale() {
    assert_eq!(parse_decimal("1.0E-30", 1).unwrap(), Decimal::ZERO);
    assert_eq!(parse_decimal("-4.2D-35", 1).unwrap(), Decimal::ZERO);

    let small = parse_decimal("1.5E-27", 1).unwrap();
    assert!(small > Decimal::ZERO);
    assert!(small < Decimal::from_str("0.00000000000000000000000001").unwrap());

    assert!(matches!(
        parse_decimal("1.0E+40", 3),
        Err(IngestError::MalformedNumber { line: 3, .. })
    ));
    assert!(parse_decimal("1.0E", 1).is_err());
}

#[test]
fn test_parse_decimal_rejects_garbage() {
    match parse_decimal("abc", 7) {
        Err(IngestError::MalformedNumber { line, token }) => {
            assert_eq!(line, 7);
            assert_eq!(token, "abc");
        }
        other => panic!("expected MalformedNumber, got {:?}", other),
    }
}

#[test]
fn test_parse_decimal_with_scale_pads_and_rounds() {
    let padded = parse_decimal_with_scale("1.5", 4, 1).unwrap();
    assert_eq!(padded.to_string(), "1.5000");

    let rounded = parse_decimal_with_scale("0.123456", 4, 1).unwrap();
    assert_eq!(rounded.to_string(), "0.1235");

    let negative = parse_decimal_with_scale("-0.00005", 4, 1).unwrap();
    assert_eq!(negative.to_string(), "-0.0001");
}

#[test]
fn test_parse_integers_and_floats() {
    assert_eq!(parse_i32(" -30501 ", 1).unwrap(), -30501);
    assert!(parse_i32("3.5", 1).is_err());
    assert_eq!(parse_f64("281970.556", 1).unwrap(), 281970.556);
    assert!(parse_f64("/A", 1).is_err());
}
