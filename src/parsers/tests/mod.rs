//! Test fixtures shared by the decoder test modules
//!
//! Catalog lines are built with fixed-width formatting so every column lands
//! at its exact byte offset.

use crate::models::{IngestionConfig, PartitionFunctionTable};
use crate::parsers::decode_partition_function;

mod fields_tests;
mod rotational_tests;

/// Partition function value at 300 K in [`create_test_qpart`]
pub const TEST_Q300: f64 = 2883.1190;

/// Sample .int content with a title, a flag line and three dipole components
pub fn create_test_int() -> String {
    r#"H2CO ground state
 0  30501  2883.1190  0  999  -100.0 -100.0  1000000.0
 001  2.3315
 002  0.0
 003  0.0

 004  9.99"#
        .to_string()
}

/// Sample .var content in SPFIT parameter-file style
pub fn create_test_var() -> String {
    r#"H2CO, ground state fit
   10001  281970.5560000000 1.0E+037 /A
   20000   38833.9871000000 1.0E+037 /B
   30000   34004.2444000000 1.0E+037 /C
  200     -0.0753000000     1.0E+037 /DJ"#
        .to_string()
}

/// Sample .qpart content with a comment header
pub fn create_test_qpart() -> String {
    r#"# H2CO partition function
# T(K)    Q
300.000   2883.1190
225.000   1872.3640
150.000   1020.4510
 75.000    361.5170"#
        .to_string()
}

/// Format one catalog line from its column values
#[allow(clippy::too_many_arguments)]
pub fn cat_line(
    frequency: &str,
    uncertainty: &str,
    log_intensity: &str,
    degrees_of_freedom: i32,
    lower_energy: &str,
    upper_degeneracy: &str,
    tag: i32,
    qn_format: i32,
    upper_qn: &str,
    lower_qn: &str,
) -> String {
    format!(
        "{frequency:>13}{uncertainty:>8}{log_intensity:>8}{degrees_of_freedom:>2}{lower_energy:>10}{upper_degeneracy:>3}{tag:>7}{qn_format:>4}{upper_qn:<12}{lower_qn:<12}"
    )
}

/// Two H2CO lines labelled N, Ka, Kc; the second line's lower state is the
/// first line's upper state
pub fn create_test_cat() -> String {
    [
        cat_line(
            "72837.9480", "0.0010", "-3.9646", 3, "0.0000", "3", -30501, 303, " 1 0 1", " 0 0 0",
        ),
        cat_line(
            "145602.9490", "0.0020", "-3.0183", 3, "2.4296", "5", 30501, 303, " 2 0 2", " 1 0 1",
        ),
    ]
    .join("\n")
}

/// Rotationally resolved vibrational band labelled N, Ka, Kc, v
pub fn create_test_rovib_cat() -> String {
    [
        cat_line(
            "72837.9480", "0.0010", "-3.9646", 3, "0.0000", "3", 30501, 304, " 1 0 1 1", " 0 0 0 0",
        ),
        cat_line(
            "145602.9490", "0.0020", "-3.0183", 3, "2.4296", "5", 30501, 304, " 2 0 2 0", " 1 0 1 0",
        ),
    ]
    .join("\n")
}

pub fn create_test_partition() -> PartitionFunctionTable {
    decode_partition_function(&create_test_qpart()).unwrap()
}

pub fn create_test_config() -> IngestionConfig {
    IngestionConfig::from_label_str("N, Ka, Kc", false, None)
}

pub fn create_rovib_config() -> IngestionConfig {
    IngestionConfig::from_label_str("N, Ka, Kc, v", true, Some("v"))
}

/// Relative comparison for derived floating point quantities
pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    let scale = expected.abs().max(f64::MIN_POSITIVE);
    assert!(
        ((actual - expected) / scale).abs() < tolerance,
        "expected {expected}, got {actual}"
    );
}
