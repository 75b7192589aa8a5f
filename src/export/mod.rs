//! Catalog export to columnar files
//!
//! - [`frame`] - decoded catalog lines as a polars `DataFrame`
//! - [`writer`] - Parquet/CSV output with configurable compression

pub mod frame;
pub mod writer;

#[cfg(test)]
pub mod tests;

pub use frame::{SCALAR_COLUMNS, catalog_to_dataframe};
pub use writer::{CompressionAlgorithm, ExportFormat, write_catalog};
