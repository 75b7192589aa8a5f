//! Rotational constant extraction from .var files
//!
//! Any line mentioning `/A`, `/B` or `/C` sets the matching constant. The
//! value is the second field, unless that field is the marker itself
//! (`NAME /A value`), in which case the field after it is used. The checks
//! are independent and a later line overwrites an earlier one for the same
//! axis.

use tracing::debug;

use super::fields::{parse_f64, required_token, tokenize};
use crate::error::Result;
use crate::models::RotationalConstants;

/// Decode the rotational constants of a .var file
pub fn decode_rotational_constants(content: &str) -> Result<RotationalConstants> {
    let mut constants = RotationalConstants::default();

    for (index, raw_line) in content.lines().enumerate() {
        let line_number = index + 1;
        let line = raw_line.trim();

        if line.is_empty() {
            continue;
        }

        let targets = [
            ("/A", &mut constants.a),
            ("/B", &mut constants.b),
            ("/C", &mut constants.c),
        ];
        let mut tokens = None;

        for (marker, slot) in targets {
            if !line.contains(marker) {
                continue;
            }
            let tokens = tokens.get_or_insert_with(|| tokenize(line));
            let token = constant_token(tokens, marker, line_number)?;
            *slot = Some(parse_f64(token, line_number)?);
        }
    }

    debug!(
        "Read rotational constants: A={:?} B={:?} C={:?}",
        constants.a, constants.b, constants.c
    );
    Ok(constants)
}

/// Pick the field holding the constant for `marker`
fn constant_token<'a>(tokens: &[&'a str], marker: &str, line: usize) -> Result<&'a str> {
    let second = required_token(tokens, 1, line, "rotational constant")?;
    if second.parse::<f64>().is_err() && second.contains(marker) {
        if let Some(next) = tokens.get(2).copied() {
            return Ok(next);
        }
    }
    Ok(second)
}
