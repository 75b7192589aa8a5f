//! Application constants for spectroscopy file ingestion
//!
//! This module contains the fixed-format column layout of catalog lines,
//! physical constants used to derive line strengths, and default values
//! used throughout the ingestion pipeline.

// =============================================================================
// File Extensions
// =============================================================================

/// Dipole moment file extension
pub const INT_EXTENSION: &str = "int";

/// Rotational constant file extension
pub const VAR_EXTENSION: &str = "var";

/// Partition function file extension
pub const QPART_EXTENSION: &str = "qpart";

/// Catalog line list file extension
pub const CAT_EXTENSION: &str = "cat";

/// All extensions accepted by the ingestion pipeline
pub const SUPPORTED_EXTENSIONS: &[&str] =
    &[INT_EXTENSION, VAR_EXTENSION, QPART_EXTENSION, CAT_EXTENSION];

// =============================================================================
// Metadata File Layout
// =============================================================================

/// Number of header lines preceding dipole moment entries in a .int file
pub const INT_HEADER_LINES: usize = 2;

/// Marker that turns a .qpart line into a comment, anywhere on the line
pub const QPART_COMMENT_MARKER: char = '#';

/// Full-match pattern for the 300 K reference temperature key
pub const REFERENCE_TEMPERATURE_PATTERN: &str = r"300\.?0*";

/// Reference temperature for tabulated catalog intensities (K)
pub const REFERENCE_TEMPERATURE_K: f64 = 300.0;

// =============================================================================
// Catalog (.cat) Column Layout
// =============================================================================

/// Fixed byte ranges of a catalog line (0-based, end-exclusive)
pub mod cat_columns {
    use std::ops::Range;

    /// Frequency (MHz), F13.4
    pub const FREQUENCY: Range<usize> = 0..13;

    /// Frequency uncertainty (MHz), F8.4
    pub const UNCERTAINTY: Range<usize> = 13..21;

    /// Base-10 log of the integrated intensity at 300 K (nm^2 MHz), F8.4
    pub const LOG_INTENSITY: Range<usize> = 21..29;

    /// Degrees of freedom of the rotational partition function, I2
    pub const DEGREES_OF_FREEDOM: Range<usize> = 29..31;

    /// Lower state energy (cm^-1), F10.4
    pub const LOWER_STATE_ENERGY: Range<usize> = 31..41;

    /// Upper state degeneracy, I3
    pub const UPPER_STATE_DEGENERACY: Range<usize> = 41..44;

    /// Species tag, negative for laboratory-measured frequencies, I7
    pub const SPECIES_TAG: Range<usize> = 44..51;

    /// Quantum number format code, I4
    pub const QN_FORMAT: Range<usize> = 51..55;

    /// Upper state packed quantum numbers, 6I2
    pub const UPPER_QN: Range<usize> = 55..67;

    /// Lower state packed quantum numbers, 6I2
    pub const LOWER_QN: Range<usize> = 67..79;

    /// Shortest non-blank line that still carries every scalar column
    pub const MIN_LINE_LENGTH: usize = QN_FORMAT.end;
}

/// Width of one packed quantum-number field
pub const QN_FIELD_WIDTH: usize = 2;

/// Maximum number of quantum numbers per state in a catalog line
pub const MAX_QUANTUM_NUMBERS: usize = 6;

/// Decimal places of frequency, uncertainty and intensity columns
pub const CAT_DECIMAL_SCALE: u32 = 4;

/// Decimal places of the lower state energy column
pub const LOWER_ENERGY_SCALE: u32 = 4;

/// Decimal places kept for the derived upper state energy
pub const UPPER_ENERGY_SCALE: u32 = 15;

// =============================================================================
// Physical Constants
// =============================================================================

/// Second radiation constant hc/k (cm K)
pub const SECOND_RADIATION_CONSTANT: f64 = 1.438_776_9;

/// Intensity prefactor relating nm^2 MHz to MHz D^2 (Pickett 1991)
pub const INTENSITY_PREFACTOR: f64 = 4.162_31e-5;

/// Einstein A prefactor for frequency in MHz and S mu^2 in D^2
pub const EINSTEIN_A_PREFACTOR: f64 = 1.163_95e-20;

// =============================================================================
// Runtime Defaults
// =============================================================================

/// Environment variable overriding the worker count
pub const ENV_WORKERS: &str = "SPECTRO_INGEST_WORKERS";

/// Environment variable overriding the log level
pub const ENV_LOG_LEVEL: &str = "SPECTRO_INGEST_LOG_LEVEL";

/// Application directory name under the user's config dir
pub const APP_CONFIG_DIR: &str = "spectro-ingest";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default log level when neither config nor flags set one
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Upper bound for the worker count accepted from config or flags
pub const MAX_WORKERS: usize = 256;
