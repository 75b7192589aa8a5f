//! Catalog (.cat) decoding orchestration
//!
//! Decoding runs in two passes. The first pass splits every line into its
//! columns and decodes both quantum-number blocks; any failure aborts the
//! whole file. The second pass derives line strengths and resolves each
//! lower-state degeneracy from the line whose upper state matches it.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::collections::HashMap;
use tracing::{debug, info};

use super::intensity::{line_strength, upper_state_energy};
use super::layout::RawCatalogLine;
use crate::error::{IngestError, Result};
use crate::models::{CatalogLineRecord, IngestionConfig, PartitionFunctionTable, QuantumNumberSet};
use crate::parsers::quantum_numbers::{FieldScheme, PickettScheme, QuantumNumberCodec};
use crate::parsers::validation::validate_config;

/// A catalog line with both states decoded
#[derive(Debug)]
struct DecodedLine<'a> {
    raw: RawCatalogLine<'a>,
    upper: QuantumNumberSet,
    lower: QuantumNumberSet,
}

/// Decoder for one species' catalog under a validated configuration
#[derive(Debug)]
pub struct CatalogDecoder<'c, S: FieldScheme = PickettScheme> {
    config: &'c IngestionConfig,
    codec: QuantumNumberCodec<S>,
    partition_function_300: f64,
}

impl<'c> CatalogDecoder<'c, PickettScheme> {
    /// Create a decoder using the SPCAT quantum-number letter convention
    ///
    /// The configuration is validated here, before any line is read.
    pub fn new(config: &'c IngestionConfig, partition: &PartitionFunctionTable) -> Result<Self> {
        Self::with_scheme(config, partition, PickettScheme)
    }
}

impl<'c, S: FieldScheme> CatalogDecoder<'c, S> {
    /// Create a decoder with a custom quantum-number field scheme
    pub fn with_scheme(
        config: &'c IngestionConfig,
        partition: &PartitionFunctionTable,
        scheme: S,
    ) -> Result<Self> {
        validate_config(config)?;
        let partition_function_300 = partition.reference_value()?;

        Ok(Self {
            config,
            codec: QuantumNumberCodec::with_scheme(config.shared_labels(), scheme),
            partition_function_300,
        })
    }

    /// Decode a whole catalog file, in file order
    pub fn decode(&self, content: &str) -> Result<Vec<CatalogLineRecord>> {
        let lines = content
            .lines()
            .enumerate()
            .filter(|(_, text)| !text.trim().is_empty())
            .map(|(index, text)| self.decode_line(text, index + 1))
            .collect::<Result<Vec<_>>>()?;

        let mut upper_degeneracies: HashMap<&[i32], u32> = HashMap::with_capacity(lines.len());
        for line in &lines {
            upper_degeneracies
                .entry(line.upper.values())
                .or_insert(line.raw.upper_state_degeneracy);
        }

        let records = lines
            .iter()
            .map(|line| {
                let lower_degeneracy = upper_degeneracies.get(line.lower.values()).copied();
                self.build_record(line, lower_degeneracy)
            })
            .collect::<Result<Vec<_>>>()?;

        let rovibrational = records.iter().filter(|r| r.rovibrational).count();
        let unresolved = records
            .iter()
            .filter(|r| r.lower_state_degeneracy.is_none())
            .count();
        info!(
            "Decoded {} catalog lines ({} rovibrational)",
            records.len(),
            rovibrational
        );
        debug!(
            "{} lines have no matching upper state for their lower state degeneracy",
            unresolved
        );

        Ok(records)
    }

    fn decode_line<'t>(&self, text: &'t str, line: usize) -> Result<DecodedLine<'t>> {
        let raw = RawCatalogLine::parse(text, line)?;
        let upper = self.codec.decode(raw.upper_qn, line)?;
        let lower = self.codec.decode(raw.lower_qn, line)?;
        Ok(DecodedLine { raw, upper, lower })
    }

    fn build_record(
        &self,
        decoded: &DecodedLine<'_>,
        lower_state_degeneracy: Option<u32>,
    ) -> Result<CatalogLineRecord> {
        let raw = &decoded.raw;
        let upper_energy = upper_state_energy(raw.lower_state_energy, raw.frequency);

        let strength = line_strength(
            to_f64(raw.frequency),
            to_f64(raw.log_intensity),
            to_f64(raw.lower_state_energy),
            to_f64(upper_energy),
            raw.upper_state_degeneracy,
            self.partition_function_300,
        )
        .ok_or_else(|| {
            IngestError::malformed_line(
                raw.line,
                format!(
                    "frequency {} MHz with upper state degeneracy {} is not a physical transition",
                    raw.frequency, raw.upper_state_degeneracy
                ),
            )
        })?;

        Ok(CatalogLineRecord {
            frequency: raw.frequency,
            uncertainty: raw.uncertainty,
            intensity: raw.log_intensity,
            degrees_of_freedom: raw.degrees_of_freedom,
            s_ij_mu2: strength.s_ij_mu2,
            a_ij: strength.a_ij,
            lower_state_energy: raw.lower_state_energy,
            upper_state_energy: upper_energy,
            lower_state_degeneracy,
            upper_state_degeneracy: raw.upper_state_degeneracy,
            species_tag: raw.species_tag.abs(),
            experimental_frequency: raw.species_tag < 0,
            pickett_qn_code: raw.qn_format,
            pickett_upper_state_qn: raw.upper_qn.trim_end().to_string(),
            pickett_lower_state_qn: raw.lower_qn.trim_end().to_string(),
            rovibrational: self.is_rovibrational(&decoded.upper, &decoded.lower),
            upper_state_qn: decoded.upper.clone(),
            lower_state_qn: decoded.lower.clone(),
        })
    }

    fn is_rovibrational(&self, upper: &QuantumNumberSet, lower: &QuantumNumberSet) -> bool {
        match (self.config.rovibrational(), self.config.vibrational_label()) {
            (true, Some(label)) => upper.get(label) != lower.get(label),
            _ => false,
        }
    }
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// Decode a catalog file with the default quantum-number scheme
pub fn decode_catalog(
    content: &str,
    config: &IngestionConfig,
    partition: &PartitionFunctionTable,
) -> Result<Vec<CatalogLineRecord>> {
    CatalogDecoder::new(config, partition)?.decode(content)
}
