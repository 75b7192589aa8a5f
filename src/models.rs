//! Typed value records produced by the decoders.
//!
//! Every record is created fresh per parse call and never mutated afterwards.
//! Optional physical quantities are explicit `Option`s: an absent dipole
//! component is not the same thing as a zero dipole.

use regex::Regex;
use rust_decimal::Decimal;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::sync::{Arc, LazyLock};

use crate::constants::REFERENCE_TEMPERATURE_PATTERN;
use crate::error::{IngestError, Result};

static REFERENCE_TEMPERATURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^(?:{REFERENCE_TEMPERATURE_PATTERN})$"))
        .expect("reference temperature pattern is a valid regex")
});

/// Check whether a temperature key denotes the 300 K reference point
///
/// Accepts "300", "300.", "300.0", "300.000", ... and nothing else.
pub fn is_reference_temperature(key: &str) -> bool {
    REFERENCE_TEMPERATURE.is_match(key)
}

/// Dipole moment components read from a .int file (Debye)
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct DipoleMoments {
    pub mu_a: Option<Decimal>,
    pub mu_b: Option<Decimal>,
    pub mu_c: Option<Decimal>,
}

impl DipoleMoments {
    /// True when the file carried no recognised dipole component
    pub fn is_empty(&self) -> bool {
        self.mu_a.is_none() && self.mu_b.is_none() && self.mu_c.is_none()
    }
}

/// Rotational constants read from a .var file (MHz)
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize)]
pub struct RotationalConstants {
    pub a: Option<f64>,
    pub b: Option<f64>,
    pub c: Option<f64>,
}

impl RotationalConstants {
    /// True when none of the constants were present
    pub fn is_empty(&self) -> bool {
        self.a.is_none() && self.b.is_none() && self.c.is_none()
    }
}

/// Partition function values keyed by temperature text
///
/// Both keys and values keep the exact text of the source file so no
/// precision is lost on the way to storage. A table always contains a
/// 300 K entry; [`PartitionFunctionTable::new`] refuses to build one without it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionFunctionTable {
    entries: Vec<(String, String)>,
}

impl PartitionFunctionTable {
    /// Build a table, enforcing the reference temperature invariant
    ///
    /// Repeated temperature keys keep the last value seen.
    pub fn new<I, K, V>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut table: Vec<(String, String)> = Vec::new();
        for (key, value) in entries {
            let key = key.into();
            let value = value.into();
            match table.iter_mut().find(|(existing, _)| *existing == key) {
                Some(slot) => slot.1 = value,
                None => table.push((key, value)),
            }
        }

        if !table.iter().any(|(key, _)| is_reference_temperature(key)) {
            return Err(IngestError::MissingReferenceTemperature);
        }

        Ok(Self { entries: table })
    }

    /// Value recorded for an exact temperature key
    pub fn get(&self, temperature: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == temperature)
            .map(|(_, value)| value.as_str())
    }

    /// Temperature key that satisfied the 300 K check
    ///
    /// A key that reads as exactly 300 wins over looser matches such as
    /// `3000`; otherwise the first matching key in file order is used.
    pub fn reference_key(&self) -> &str {
        let mut candidates = self
            .entries
            .iter()
            .map(|(key, _)| key.as_str())
            .filter(|key| is_reference_temperature(key));
        let first = candidates.next().unwrap_or_default();
        if first.parse::<f64>() == Ok(300.0) {
            return first;
        }
        candidates
            .find(|key| key.parse::<f64>() == Ok(300.0))
            .unwrap_or(first)
    }

    /// Partition function value at 300 K as a float
    pub fn reference_value(&self) -> Result<f64> {
        let key = self.reference_key();
        let value = self.get(key).unwrap_or_default();
        value
            .parse::<f64>()
            .ok()
            .filter(|q| q.is_finite() && *q > 0.0)
            .ok_or_else(|| IngestError::InvalidReferenceValue {
                key: key.to_string(),
                value: value.to_string(),
            })
    }

    /// Iterate entries in file order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for PartitionFunctionTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Ordered quantum numbers of one state, paired with caller-supplied labels
///
/// The label list is shared between every set decoded with the same
/// configuration, so decoding a large catalog does not clone label strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantumNumberSet {
    labels: Arc<[String]>,
    values: Vec<i32>,
}

impl QuantumNumberSet {
    /// Pair values with labels; both sides must have the same length
    pub fn new(labels: Arc<[String]>, values: Vec<i32>, line: usize) -> Result<Self> {
        if labels.len() != values.len() {
            return Err(IngestError::QuantumNumberCountMismatch {
                line,
                expected: labels.len(),
                found: values.len(),
            });
        }
        Ok(Self { labels, values })
    }

    /// Value for a label, if configured
    pub fn get(&self, label: &str) -> Option<i32> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|index| self.values[index])
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[i32] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for QuantumNumberSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (label, value) in self.iter() {
            map.serialize_entry(label, &value)?;
        }
        map.end()
    }
}

/// One decoded transition from a .cat file
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CatalogLineRecord {
    /// Transition frequency (MHz)
    pub frequency: Decimal,
    /// Frequency uncertainty (MHz)
    pub uncertainty: Decimal,
    /// log10 of the integrated intensity at 300 K (nm^2 MHz)
    pub intensity: Decimal,
    pub degrees_of_freedom: i32,
    /// Line strength times squared dipole moment (D^2)
    pub s_ij_mu2: f64,
    /// Einstein A coefficient (s^-1)
    pub a_ij: f64,
    /// Lower state energy (cm^-1)
    pub lower_state_energy: Decimal,
    /// Upper state energy (cm^-1)
    pub upper_state_energy: Decimal,
    /// Resolved from a line whose upper state is this line's lower state
    pub lower_state_degeneracy: Option<u32>,
    pub upper_state_degeneracy: u32,
    pub species_tag: i32,
    /// Negative tag in the source: the frequency is laboratory-measured
    pub experimental_frequency: bool,
    pub pickett_qn_code: i32,
    pub pickett_upper_state_qn: String,
    pub pickett_lower_state_qn: String,
    pub upper_state_qn: QuantumNumberSet,
    pub lower_state_qn: QuantumNumberSet,
    pub rovibrational: bool,
}

/// Structural hints supplied alongside a .cat upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionConfig {
    labels: Arc<[String]>,
    rovibrational: bool,
    vibrational_label: Option<String>,
}

impl IngestionConfig {
    /// Create a config from an ordered label list
    ///
    /// Labels and the vibrational label are trimmed; a blank vibrational
    /// label counts as "not supplied".
    pub fn new(
        labels: impl IntoIterator<Item = impl Into<String>>,
        rovibrational: bool,
        vibrational_label: Option<&str>,
    ) -> Self {
        let labels: Vec<String> = labels
            .into_iter()
            .map(|label| label.into().trim().to_string())
            .collect();
        let vibrational_label = vibrational_label
            .map(|label| label.trim().to_string())
            .filter(|label| !label.is_empty());

        Self {
            labels: labels.into(),
            rovibrational,
            vibrational_label,
        }
    }

    /// Create a config from a comma-separated label string like "N, Ka, Kc, v"
    pub fn from_label_str(
        labels: &str,
        rovibrational: bool,
        vibrational_label: Option<&str>,
    ) -> Self {
        Self::new(labels.split(','), rovibrational, vibrational_label)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Shared handle to the label list for building quantum number sets
    pub fn shared_labels(&self) -> Arc<[String]> {
        Arc::clone(&self.labels)
    }

    pub fn rovibrational(&self) -> bool {
        self.rovibrational
    }

    pub fn vibrational_label(&self) -> Option<&str> {
        self.vibrational_label.as_deref()
    }
}

/// Metadata bundle of one species: partition function plus optional .int/.var
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SpeciesMetadata {
    pub partition_function: PartitionFunctionTable,
    pub dipole_moments: Option<DipoleMoments>,
    pub rotational_constants: Option<RotationalConstants>,
}
