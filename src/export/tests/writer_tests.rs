//! Tests for Parquet and CSV output

use polars::prelude::{ParquetReader, SerReader};
use std::fs::File;
use std::path::Path;
use tempfile::TempDir;

use super::*;
use crate::export::{CompressionAlgorithm, ExportFormat, catalog_to_dataframe, write_catalog};

#[test]
fn test_parquet_round_trip_shape() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested/h2co.parquet");
    let mut df = catalog_to_dataframe(&create_test_records(), &test_labels()).unwrap();

    write_catalog(&path, &mut df, ExportFormat::Parquet, CompressionAlgorithm::Snappy).unwrap();

    let read_back = ParquetReader::new(File::open(&path).unwrap()).finish().unwrap();
    assert_eq!(read_back.shape(), df.shape());
    assert_eq!(read_back.get_column_names(), df.get_column_names());
}

#[test]
fn test_csv_has_header_row() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("h2co.csv");
    let mut df = catalog_to_dataframe(&create_test_records(), &test_labels()).unwrap();

    write_catalog(&path, &mut df, ExportFormat::Csv, CompressionAlgorithm::default()).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert!(lines.next().unwrap().starts_with("frequency,uncertainty,intensity"));
    assert_eq!(lines.count(), 2);
}

#[test]
fn test_format_from_path() {
    assert_eq!(ExportFormat::from_path(Path::new("a.parquet")), Some(ExportFormat::Parquet));
    assert_eq!(ExportFormat::from_path(Path::new("a.CSV")), Some(ExportFormat::Csv));
    assert_eq!(ExportFormat::from_path(Path::new("a.txt")), None);
    assert_eq!(ExportFormat::Csv.extension(), "csv");
}

#[test]
fn test_unwritable_path_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("file");
    std::fs::write(&blocker, "x").unwrap();
    let mut df = catalog_to_dataframe(&create_test_records(), &test_labels()).unwrap();

    let result = write_catalog(
        &blocker.join("out.parquet"),
        &mut df,
        ExportFormat::Parquet,
        CompressionAlgorithm::Zstd,
    );
    assert!(matches!(result, Err(crate::error::IngestError::Io { .. })));
}
