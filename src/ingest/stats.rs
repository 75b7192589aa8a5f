//! Ingestion statistics and per-species results
//!
//! Decoding is all-or-nothing per file, so statistics count whole files and
//! species rather than individual lines.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::IngestError;
use crate::models::{CatalogLineRecord, SpeciesMetadata};

/// Everything decoded for one species
#[derive(Debug, Clone)]
pub struct SpeciesIngest {
    pub name: String,
    pub metadata: SpeciesMetadata,
    /// Empty when the species has no catalog file
    pub catalog: Vec<CatalogLineRecord>,
    pub files_decoded: usize,
}

impl SpeciesIngest {
    pub fn rovibrational_lines(&self) -> usize {
        self.catalog.iter().filter(|line| line.rovibrational).count()
    }
}

/// Serializable description of one failed species or file
#[derive(Debug, Clone, Serialize)]
pub struct IngestFailure {
    pub name: String,
    pub kind: &'static str,
    pub line: Option<usize>,
    pub message: String,
}

impl IngestFailure {
    pub fn new(name: impl Into<String>, error: &IngestError) -> Self {
        Self {
            name: name.into(),
            kind: error.kind(),
            line: error.line(),
            message: error.to_string(),
        }
    }
}

/// Running totals over a batch of species
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestStats {
    /// Species attempted
    pub species_total: usize,

    /// Species whose every file decoded
    pub species_succeeded: usize,

    /// Individual files decoded across successful species
    pub files_decoded: usize,

    /// Catalog lines across successful species
    pub catalog_lines: usize,

    pub rovibrational_lines: usize,

    /// Failures in completion order
    pub failures: Vec<IngestFailure>,

    #[serde(skip)]
    pub elapsed: Duration,
}

impl IngestStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one species result into the totals
    pub fn record(&mut self, name: &str, result: &Result<SpeciesIngest, IngestError>) {
        self.species_total += 1;
        match result {
            Ok(species) => {
                self.species_succeeded += 1;
                self.files_decoded += species.files_decoded;
                self.catalog_lines += species.catalog.len();
                self.rovibrational_lines += species.rovibrational_lines();
            }
            Err(error) => self.failures.push(IngestFailure::new(name, error)),
        }
    }

    pub fn species_failed(&self) -> usize {
        self.failures.len()
    }

    /// Success rate as a percentage of attempted species
    pub fn success_rate(&self) -> f64 {
        if self.species_total == 0 {
            0.0
        } else {
            (self.species_succeeded as f64 / self.species_total as f64) * 100.0
        }
    }

    /// True when at least one species was attempted and none failed
    pub fn is_successful(&self) -> bool {
        self.species_total > 0 && self.failures.is_empty()
    }
}

/// Result of scanning a directory for uploadable files
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanStats {
    pub files_seen: usize,
    pub files_decoded: usize,
    /// Catalog files are only classified; they need labels to decode
    pub catalogs_found: Vec<PathBuf>,
    pub failures: Vec<IngestFailure>,
}

impl ScanStats {
    pub fn is_successful(&self) -> bool {
        self.failures.is_empty()
    }
}
