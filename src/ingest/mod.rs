//! File-level ingestion of species uploads
//!
//! - [`file_kind`] - classification of uploads by extension
//! - [`service`] - reading, decoding and concurrent per-species ingestion
//! - [`stats`] - per-species results and batch totals
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use spectro_ingest::ingest::{DecodedFile, decode_file};
//!
//! # async fn example() -> spectro_ingest::Result<()> {
//! if let DecodedFile::PartitionFunction(table) =
//!     decode_file(Path::new("h2co.qpart"), None).await?
//! {
//!     println!("Q(300) = {}", table.reference_value()?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod file_kind;
pub mod service;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use file_kind::FileKind;
pub use service::{
    DecodedFile, IngestionService, SpeciesJob, decode_file, decode_metadata, ingest_species,
    read_file,
};
pub use stats::{IngestFailure, IngestStats, ScanStats, SpeciesIngest};
