//! Partition function extraction from .qpart files
//!
//! Each data line starts with a `<temperature> <value>` pair kept verbatim as
//! text; trailing columns are ignored.
//! A `#` anywhere on a line turns the whole line into a comment. The table
//! must contain a 300 K entry, since catalog intensities are tabulated at
//! that temperature.

use tracing::debug;

use super::fields::tokenize;
use crate::constants::QPART_COMMENT_MARKER;
use crate::error::{IngestError, Result};
use crate::models::PartitionFunctionTable;

/// Decode a .qpart file into a partition function table
pub fn decode_partition_function(content: &str) -> Result<PartitionFunctionTable> {
    let mut entries = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let line_number = index + 1;

        if line.contains(QPART_COMMENT_MARKER) || line.trim().is_empty() {
            continue;
        }

        match tokenize(line).as_slice() {
            [temperature, value, rest @ ..] => {
                if !rest.is_empty() {
                    debug!(
                        "Ignoring {} extra field(s) on partition function line {}",
                        rest.len(),
                        line_number
                    );
                }
                entries.push((*temperature, *value));
            }
            tokens => {
                return Err(IngestError::malformed_line(
                    line_number,
                    format!(
                        "expected '<temperature> <value>', found {} field",
                        tokens.len()
                    ),
                ));
            }
        }
    }

    let table = PartitionFunctionTable::new(entries)?;
    debug!(
        "Read partition function with {} temperatures (reference key '{}')",
        table.len(),
        table.reference_key()
    );
    Ok(table)
}
