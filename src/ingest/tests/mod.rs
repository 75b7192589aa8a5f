//! Test utilities for file-level ingestion

use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub use crate::parsers::tests::{
    create_test_cat, create_test_int, create_test_qpart, create_test_var,
};

mod file_kind_tests;
mod service_tests;

/// Write a file into a temporary directory and return its path
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Temporary directory holding a complete H2CO upload
pub fn create_species_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "h2co.qpart", &create_test_qpart());
    write_file(dir.path(), "h2co.int", &create_test_int());
    write_file(dir.path(), "h2co.var", &create_test_var());
    write_file(dir.path(), "h2co.cat", &create_test_cat());
    dir
}
