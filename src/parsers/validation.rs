//! Structural validation of ingestion hints
//!
//! Runs before any catalog line is decoded, so a bad configuration never
//! produces partial work.

use std::collections::HashSet;

use crate::constants::MAX_QUANTUM_NUMBERS;
use crate::error::{IngestError, Result};
use crate::models::IngestionConfig;

/// Validate an [`IngestionConfig`] against the catalog format
pub fn validate_config(config: &IngestionConfig) -> Result<()> {
    validate_labels(config.labels())?;
    validate_vibrational(config)
}

/// Check the quantum-number label list itself
pub fn validate_labels(labels: &[String]) -> Result<()> {
    if labels.is_empty() {
        return Err(IngestError::invalid_labels("at least one label is required"));
    }

    if let Some(position) = labels.iter().position(|label| label.is_empty()) {
        return Err(IngestError::invalid_labels(format!(
            "label {} is empty",
            position + 1
        )));
    }

    if labels.len() > MAX_QUANTUM_NUMBERS {
        return Err(IngestError::invalid_labels(format!(
            "{} labels given, a catalog line holds at most {} quantum numbers per state",
            labels.len(),
            MAX_QUANTUM_NUMBERS
        )));
    }

    let mut seen = HashSet::new();
    if let Some(duplicate) = labels.iter().find(|label| !seen.insert(label.as_str())) {
        return Err(IngestError::invalid_labels(format!(
            "label '{}' appears more than once",
            duplicate
        )));
    }

    Ok(())
}

/// Check that the rovibrational flag and vibrational label agree
pub fn validate_vibrational(config: &IngestionConfig) -> Result<()> {
    match (config.rovibrational(), config.vibrational_label()) {
        (true, None) => Err(IngestError::invalid_vibrational(
            "Vibrational quantum number label must be provided if rovibrational is true",
        )),
        (true, Some(label)) if !config.labels().iter().any(|l| l == label) => {
            Err(IngestError::invalid_vibrational(format!(
                "Vibrational quantum number label '{}' must be in quantum number label string",
                label
            )))
        }
        (false, Some(label)) => Err(IngestError::invalid_vibrational(format!(
            "Vibrational quantum number label must be empty if there is no rovibrational transition (got '{}')",
            label
        ))),
        _ => Ok(()),
    }
}
