//! Fixed-column layout of a single catalog line
//!
//! ```text
//! FREQ(13) ERR(8) LGINT(8) DR(2) ELO(10) GUP(3) TAG(7) QNFMT(4) QN'(12) QN''(12)
//! ```

use rust_decimal::Decimal;

use crate::constants::{CAT_DECIMAL_SCALE, LOWER_ENERGY_SCALE, cat_columns};
use crate::error::{IngestError, Result};
use crate::parsers::fields::{column, parse_decimal_with_scale, parse_i32, raw_column};

/// Scalar columns and raw quantum-number blocks of one catalog line
#[derive(Debug, Clone, PartialEq)]
pub struct RawCatalogLine<'a> {
    /// 1-based line number in the source file
    pub line: usize,
    pub frequency: Decimal,
    pub uncertainty: Decimal,
    pub log_intensity: Decimal,
    pub degrees_of_freedom: i32,
    pub lower_state_energy: Decimal,
    pub upper_state_degeneracy: u32,
    pub species_tag: i32,
    pub qn_format: i32,
    pub upper_qn: &'a str,
    pub lower_qn: &'a str,
}

impl<'a> RawCatalogLine<'a> {
    /// Split a catalog line into its columns
    pub fn parse(text: &'a str, line: usize) -> Result<Self> {
        if text.len() < cat_columns::MIN_LINE_LENGTH {
            return Err(IngestError::TruncatedLine {
                line,
                length: text.len(),
                required: cat_columns::MIN_LINE_LENGTH,
            });
        }

        let frequency =
            parse_decimal_with_scale(column(text, cat_columns::FREQUENCY), CAT_DECIMAL_SCALE, line)?;
        let uncertainty = parse_decimal_with_scale(
            column(text, cat_columns::UNCERTAINTY),
            CAT_DECIMAL_SCALE,
            line,
        )?;
        let log_intensity = parse_decimal_with_scale(
            column(text, cat_columns::LOG_INTENSITY),
            CAT_DECIMAL_SCALE,
            line,
        )?;
        let degrees_of_freedom = parse_i32(column(text, cat_columns::DEGREES_OF_FREEDOM), line)?;
        let lower_state_energy = parse_decimal_with_scale(
            column(text, cat_columns::LOWER_STATE_ENERGY),
            LOWER_ENERGY_SCALE,
            line,
        )?;
        let upper_state_degeneracy =
            parse_degeneracy(column(text, cat_columns::UPPER_STATE_DEGENERACY), line)?;
        let species_tag = parse_i32(column(text, cat_columns::SPECIES_TAG), line)?;
        let qn_format = parse_i32(column(text, cat_columns::QN_FORMAT), line)?;

        Ok(Self {
            line,
            frequency,
            uncertainty,
            log_intensity,
            degrees_of_freedom,
            lower_state_energy,
            upper_state_degeneracy,
            species_tag,
            qn_format,
            upper_qn: raw_column(text, cat_columns::UPPER_QN),
            lower_qn: raw_column(text, cat_columns::LOWER_QN),
        })
    }
}

/// Parse the upper state degeneracy column
///
/// Degeneracies above 999 replace the hundreds digit with a letter:
/// `A23` = 1023, `B00` = 1100.
pub fn parse_degeneracy(field: &str, line: usize) -> Result<u32> {
    let malformed = || IngestError::malformed_number(line, field);

    match field.as_bytes() {
        [marker, rest @ ..] if marker.is_ascii_uppercase() && !rest.is_empty() => {
            let hundreds = u32::from(marker - b'A') + 10;
            let remainder = std::str::from_utf8(rest)
                .ok()
                .filter(|digits| digits.bytes().all(|b| b.is_ascii_digit()))
                .and_then(|digits| digits.parse::<u32>().ok())
                .ok_or_else(malformed)?;
            Ok(hundreds * 100 + remainder)
        }
        _ => field.parse::<u32>().map_err(|_| malformed()),
    }
}
