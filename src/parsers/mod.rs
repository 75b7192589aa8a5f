//! Decoders for spectroscopy data files
//!
//! Each decoder is a pure function of the file content: no I/O, no shared
//! state, and no partial results. A single malformed token aborts the whole
//! file with a typed [`IngestError`](crate::error::IngestError).
//!
//! ## Architecture
//!
//! - [`fields`] - tokenizing, fixed-column slicing and numeric conversion
//! - [`dipole`] - `.int` dipole moment components
//! - [`rotational`] - `.var` rotational constants
//! - [`partition`] - `.qpart` partition function with the 300 K gate
//! - [`quantum_numbers`] - packed two-character quantum-number fields
//! - [`catalog`] - `.cat` line lists
//! - [`validation`] - structural checks on ingestion hints
//!
//! ## Usage
//!
//! ```rust
//! use spectro_ingest::models::IngestionConfig;
//! use spectro_ingest::parsers::{decode_catalog, decode_partition_function};
//!
//! # fn example(qpart: &str, cat: &str) -> spectro_ingest::Result<()> {
//! let partition = decode_partition_function(qpart)?;
//! let config = IngestionConfig::from_label_str("N, Ka, Kc", false, None);
//! let lines = decode_catalog(cat, &config, &partition)?;
//! println!("{} transitions", lines.len());
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod dipole;
pub mod fields;
pub mod partition;
pub mod quantum_numbers;
pub mod rotational;
pub mod validation;

#[cfg(test)]
pub mod tests;

pub use catalog::{CatalogDecoder, decode_catalog};
pub use dipole::decode_dipole_moments;
pub use partition::decode_partition_function;
pub use quantum_numbers::{FieldScheme, PickettScheme, QuantumNumberCodec};
pub use rotational::decode_rotational_constants;
pub use validation::validate_config;
