//! Test utilities for catalog export

use crate::models::CatalogLineRecord;
use crate::parsers::decode_catalog;
use crate::parsers::tests::{create_test_cat, create_test_config, create_test_partition};

mod writer_tests;

/// Decoded records of the two-line H2CO fixture
pub fn create_test_records() -> Vec<CatalogLineRecord> {
    decode_catalog(&create_test_cat(), &create_test_config(), &create_test_partition()).unwrap()
}

pub fn test_labels() -> Vec<String> {
    create_test_config().labels().to_vec()
}
