//! Dipole moment extraction from .int files
//!
//! The first two lines of a .int file are a title and a flag line. Each
//! following line starts with a dipole identifier and its value; the block
//! ends at the first blank line. The identifier only has to *contain* the
//! axis digit, and the axes are checked in a-b-c order, so an identifier
//! like `12` selects μa.

use tracing::debug;

use super::fields::{parse_decimal, required_token, tokenize};
use crate::constants::INT_HEADER_LINES;
use crate::error::Result;
use crate::models::DipoleMoments;

/// Decode the dipole moment components of a .int file
pub fn decode_dipole_moments(content: &str) -> Result<DipoleMoments> {
    let mut moments = DipoleMoments::default();

    for (index, raw_line) in content.lines().enumerate().skip(INT_HEADER_LINES) {
        let line_number = index + 1;
        let line = raw_line.trim();

        if line.is_empty() {
            break;
        }

        let tokens = tokenize(line);
        let label = required_token(&tokens, 0, line_number, "dipole label")?;
        let value_token = required_token(&tokens, 1, line_number, "dipole value")?;
        let value = parse_decimal(value_token, line_number)?;

        if label.contains('1') {
            moments.mu_a = Some(value);
        } else if label.contains('2') {
            moments.mu_b = Some(value);
        } else if label.contains('3') {
            moments.mu_c = Some(value);
        } else {
            debug!("Ignoring dipole line {} with label '{}'", line_number, label);
        }
    }

    debug!(
        "Read dipole moments: mu_a={:?} mu_b={:?} mu_c={:?}",
        moments.mu_a, moments.mu_b, moments.mu_c
    );
    Ok(moments)
}
