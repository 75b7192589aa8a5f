//! Packed quantum-number fields of catalog lines
//!
//! A catalog line stores the quantum numbers of each state as consecutive
//! two-character fields. Values from -9 to 99 are written as plain
//! right-aligned integers. Larger magnitudes replace the tens digit with a
//! letter; the exact letter convention lives behind [`FieldScheme`] so it can
//! be swapped without touching the decoders.

use std::fmt::Debug;
use std::sync::Arc;

use super::fields::raw_column;
use crate::constants::QN_FIELD_WIDTH;
use crate::error::{IngestError, Result};
use crate::models::QuantumNumberSet;

/// Encoding of a single two-character quantum-number field
pub trait FieldScheme: Debug + Send + Sync {
    /// Decode one field, `None` if it is not a valid encoding
    fn decode_field(&self, field: &str) -> Option<i32>;

    /// Encode one value, `None` if the value cannot be represented
    fn encode_field(&self, value: i32) -> Option<String>;
}

/// SPCAT/CDMS letter convention
///
/// Uppercase tens markers extend the positive range (`A0` = 100 up to
/// `Z9` = 359); lowercase markers carry negative tens (`a0` = -10 down to
/// `z9` = -269).
#[derive(Debug, Clone, Copy, Default)]
pub struct PickettScheme;

impl PickettScheme {
    pub const MIN: i32 = -269;
    pub const MAX: i32 = 359;
}

impl FieldScheme for PickettScheme {
    fn decode_field(&self, field: &str) -> Option<i32> {
        let bytes = field.as_bytes();
        if let [marker, ones] = bytes {
            if marker.is_ascii_alphabetic() {
                if !ones.is_ascii_digit() {
                    return None;
                }
                let ones = i32::from(ones - b'0');
                return Some(if marker.is_ascii_uppercase() {
                    (i32::from(marker - b'A') + 10) * 10 + ones
                } else {
                    -((i32::from(marker - b'a') + 1) * 10 + ones)
                });
            }
        }

        let trimmed = field.trim();
        if trimmed.is_empty() || trimmed.starts_with('+') {
            return None;
        }
        trimmed.parse::<i32>().ok()
    }

    fn encode_field(&self, value: i32) -> Option<String> {
        match value {
            -9..=99 => Some(format!("{value:>2}")),
            100..=Self::MAX => {
                let marker = char::from(b'A' + (value / 10 - 10) as u8);
                Some(format!("{marker}{}", value % 10))
            }
            Self::MIN..=-10 => {
                let magnitude = -value;
                let marker = char::from(b'a' + (magnitude / 10 - 1) as u8);
                Some(format!("{marker}{}", magnitude % 10))
            }
            _ => None,
        }
    }
}

/// Label-driven codec for packed quantum-number blocks
#[derive(Debug, Clone)]
pub struct QuantumNumberCodec<S: FieldScheme = PickettScheme> {
    labels: Arc<[String]>,
    scheme: S,
}

impl QuantumNumberCodec<PickettScheme> {
    /// Create a codec for the given labels using the SPCAT letter convention
    pub fn new(labels: Arc<[String]>) -> Self {
        Self::with_scheme(labels, PickettScheme)
    }
}

impl<S: FieldScheme> QuantumNumberCodec<S> {
    /// Create a codec with a custom overflow scheme
    pub fn with_scheme(labels: Arc<[String]>, scheme: S) -> Self {
        Self { labels, scheme }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of two-character fields present in a packed block
    ///
    /// Trailing blanks are unused fields; everything up to the last
    /// non-blank character counts.
    pub fn field_count(block: &str) -> usize {
        block.trim_end().len().div_ceil(QN_FIELD_WIDTH)
    }

    /// Decode one packed block into a labelled quantum number set
    pub fn decode(&self, block: &str, line: usize) -> Result<QuantumNumberSet> {
        let found = Self::field_count(block);
        if found != self.labels.len() {
            return Err(IngestError::QuantumNumberCountMismatch {
                line,
                expected: self.labels.len(),
                found,
            });
        }

        let values = (0..found)
            .map(|index| {
                let start = index * QN_FIELD_WIDTH;
                let field = raw_column(block, start..start + QN_FIELD_WIDTH);
                self.scheme
                    .decode_field(field)
                    .ok_or_else(|| IngestError::malformed_number(line, field))
            })
            .collect::<Result<Vec<_>>>()?;

        QuantumNumberSet::new(Arc::clone(&self.labels), values, line)
    }

    /// Encode raw values into a packed block
    pub fn encode_values(&self, values: &[i32]) -> Result<String> {
        if values.len() != self.labels.len() {
            return Err(IngestError::QuantumNumberCountMismatch {
                line: 0,
                expected: self.labels.len(),
                found: values.len(),
            });
        }

        values
            .iter()
            .map(|&value| {
                self.scheme
                    .encode_field(value)
                    .ok_or(IngestError::QuantumNumberOutOfRange { value })
            })
            .collect()
    }

    /// Encode a quantum number set into a packed block
    pub fn encode(&self, set: &QuantumNumberSet) -> Result<String> {
        self.encode_values(set.values())
    }
}
