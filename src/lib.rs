//! Spectro Ingest Library
//!
//! A Rust library for decoding molecular spectroscopy files into typed,
//! validated records ready for storage.
//!
//! This library provides tools for:
//! - Parsing dipole moment (.int), rotational constant (.var) and partition
//!   function (.qpart) metadata files
//! - Decoding fixed-width Pickett/JPL-CDMS catalog (.cat) lines, including
//!   packed quantum numbers
//! - Deriving upper state energies, line strengths and Einstein A
//!   coefficients at 300 K
//! - Ingesting many species concurrently with per-species failure isolation
//! - Exporting decoded catalogs to Parquet or CSV

pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod ingest;
pub mod models;
pub mod parsers;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::Config;
pub use error::{IngestError, Result};
pub use models::{
    CatalogLineRecord, DipoleMoments, IngestionConfig, PartitionFunctionTable, QuantumNumberSet,
    RotationalConstants, SpeciesMetadata,
};
