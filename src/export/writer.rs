//! Parquet and CSV output of catalog frames

use clap::ValueEnum;
use polars::prelude::{CsvWriter, DataFrame, ParquetCompression, ParquetWriter, SerWriter};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{IngestError, Result};

/// Output file format of a catalog export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Columnar Parquet file
    #[default]
    Parquet,
    /// Comma-separated text with a header row
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Parquet => "parquet",
            Self::Csv => "csv",
        }
    }

    /// Guess the format from an output path, if its extension is known
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "parquet" | "pq" => Some(Self::Parquet),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

/// Supported compression algorithms for parquet files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionAlgorithm {
    /// Snappy compression - good balance of speed and compression
    #[default]
    Snappy,
    /// ZSTD compression - better compression ratio, slower
    Zstd,
    /// LZ4 compression - fastest, lower compression ratio
    Lz4,
    /// No compression
    Uncompressed,
}

impl CompressionAlgorithm {
    /// Convert to polars ParquetCompression type
    pub fn to_polars_compression(self) -> ParquetCompression {
        match self {
            Self::Snappy => ParquetCompression::Snappy,
            Self::Zstd => ParquetCompression::Zstd(None),
            Self::Lz4 => ParquetCompression::Lz4Raw,
            Self::Uncompressed => ParquetCompression::Uncompressed,
        }
    }
}

/// Write a catalog frame to disk
///
/// Missing parent directories are created. Compression only applies to
/// Parquet output.
pub fn write_catalog(
    path: &Path,
    df: &mut DataFrame,
    format: ExportFormat,
    compression: CompressionAlgorithm,
) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| IngestError::io(parent, e))?;
    }

    let file = File::create(path).map_err(|e| IngestError::io(path, e))?;
    debug!(
        "Writing {} rows to {} as {:?}",
        df.height(),
        path.display(),
        format
    );

    match format {
        ExportFormat::Parquet => ParquetWriter::new(file)
            .with_compression(compression.to_polars_compression())
            .finish(df)
            .map(|_| ()),
        ExportFormat::Csv => CsvWriter::new(file).include_header(true).finish(df),
    }
    .map_err(|e| IngestError::export(path, format!("Failed to write {:?}: {}", format, e)))?;

    info!("Wrote {} catalog lines to {}", df.height(), path.display());
    Ok(())
}
