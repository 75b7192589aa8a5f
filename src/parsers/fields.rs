//! Field parsing utilities for spectroscopy data files
//!
//! Lines are either split on whitespace (metadata files) or cut at fixed
//! byte columns (catalog lines). Quantities the source format writes with a
//! fixed number of decimal places are parsed into [`Decimal`] so that storing
//! them never introduces binary rounding drift; free-form reals use `f64`.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::ops::Range;
use std::str::FromStr;

use crate::error::{IngestError, Result};

/// Smallest non-zero magnitude a [`Decimal`] can hold
const DECIMAL_RESOLUTION: f64 = 1e-28;

/// Split a line into whitespace-delimited tokens
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Get a token that must be present on a line
pub fn required_token<'a>(
    tokens: &[&'a str],
    index: usize,
    line: usize,
    field_name: &str,
) -> Result<&'a str> {
    tokens.get(index).copied().ok_or_else(|| {
        IngestError::malformed_line(
            line,
            format!(
                "missing {} (expected at least {} fields, found {})",
                field_name,
                index + 1,
                tokens.len()
            ),
        )
    })
}

/// Cut a fixed byte range out of a line without trimming
///
/// The range is clamped to the line length, so short lines yield a shorter
/// (possibly empty) slice instead of panicking.
pub fn raw_column(text: &str, range: Range<usize>) -> &str {
    let end = range.end.min(text.len());
    let start = range.start.min(end);
    text.get(start..end).unwrap_or_default()
}

/// Cut a fixed byte range out of a line and trim surrounding whitespace
pub fn column(text: &str, range: Range<usize>) -> &str {
    raw_column(text, range).trim()
}

/// Parse a decimal or scientific-notation token into a [`Decimal`]
///
/// Accepts `12.5`, `-0.25`, `1.5E-03`, `1.5e-3` and the Fortran form `1.5D-03`.
/// Exponents beyond the 28 digit scale of [`Decimal`] go through `f64`, and
/// magnitudes below that resolution become zero.
pub fn parse_decimal(token: &str, line: usize) -> Result<Decimal> {
    let trimmed = token.trim();
    let normalized = trimmed.replace(['D', 'd'], "E");

    let parsed = if normalized.contains(['e', 'E']) {
        Decimal::from_scientific(&normalized)
            .ok()
            .or_else(|| decimal_via_float(&normalized))
    } else {
        Decimal::from_str(&normalized).ok()
    };

    parsed.ok_or_else(|| IngestError::malformed_number(line, trimmed))
}

fn decimal_via_float(text: &str) -> Option<Decimal> {
    let value = text.parse::<f64>().ok().filter(|v| v.is_finite())?;
    if value.abs() < DECIMAL_RESOLUTION {
        return Some(Decimal::ZERO);
    }
    Decimal::from_f64(value)
}

/// Parse a decimal token and fix it to `scale` decimal places
///
/// Extra digits are rounded half away from zero; missing digits are padded,
/// so `1.5` at scale 4 becomes `1.5000`.
pub fn parse_decimal_with_scale(token: &str, scale: u32, line: usize) -> Result<Decimal> {
    let mut value =
        parse_decimal(token, line)?.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    value.rescale(scale);
    Ok(value)
}

/// Parse a free-form floating point token
pub fn parse_f64(token: &str, line: usize) -> Result<f64> {
    let trimmed = token.trim();
    trimmed
        .parse::<f64>()
        .map_err(|_| IngestError::malformed_number(line, trimmed))
}

/// Parse an integer token
pub fn parse_i32(token: &str, line: usize) -> Result<i32> {
    let trimmed = token.trim();
    trimmed
        .parse::<i32>()
        .map_err(|_| IngestError::malformed_number(line, trimmed))
}
