//! Error handling for spectroscopy file ingestion.
//!
//! Every decoder fails fast and whole: a single bad token or line aborts the
//! parse of the entire file. Variants carry the 1-based line number and the
//! offending text so callers can surface them directly to the uploader.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Malformed number on line {line}: '{token}'")]
    MalformedNumber { line: usize, token: String },

    #[error("Malformed line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("Line {line} is truncated: {length} characters, at least {required} required")]
    TruncatedLine {
        line: usize,
        length: usize,
        required: usize,
    },

    #[error("Partition function does not contain 300.000 K")]
    MissingReferenceTemperature,

    #[error("Partition function value at {key} K is not a positive number: '{value}'")]
    InvalidReferenceValue { key: String, value: String },

    #[error(
        "Quantum number labels do not match the number of quantum numbers on line {line}: expected {expected}, found {found}"
    )]
    QuantumNumberCountMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Quantum number {value} cannot be packed into a two-character field")]
    QuantumNumberOutOfRange { value: i32 },

    #[error("Invalid vibrational configuration: {reason}")]
    InvalidVibrationalConfiguration { reason: String },

    #[error("Invalid quantum number label list: {reason}")]
    InvalidLabelList { reason: String },

    #[error("Unsupported file extension: {path} (expected .int, .var, .qpart or .cat)")]
    UnsupportedFileExtension { path: PathBuf },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Export failed for {path}: {reason}")]
    Export { path: PathBuf, reason: String },

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Processing interrupted: {reason}")]
    Interrupted { reason: String },
}

impl IngestError {
    /// Create a malformed number error
    pub fn malformed_number(line: usize, token: impl Into<String>) -> Self {
        Self::MalformedNumber {
            line,
            token: token.into(),
        }
    }

    /// Create a malformed line error
    pub fn malformed_line(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedLine {
            line,
            reason: reason.into(),
        }
    }

    /// Create an invalid vibrational configuration error
    pub fn invalid_vibrational(reason: impl Into<String>) -> Self {
        Self::InvalidVibrationalConfiguration {
            reason: reason.into(),
        }
    }

    /// Create an invalid label list error
    pub fn invalid_labels(reason: impl Into<String>) -> Self {
        Self::InvalidLabelList {
            reason: reason.into(),
        }
    }

    /// Create an I/O error bound to a path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an export error
    pub fn export(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Export {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Line number the error points at, if it is tied to file content
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::MalformedNumber { line, .. }
            | Self::MalformedLine { line, .. }
            | Self::TruncatedLine { line, .. }
            | Self::QuantumNumberCountMismatch { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Short machine-readable name of the failure kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedNumber { .. } => "MalformedNumber",
            Self::MalformedLine { .. } => "MalformedLine",
            Self::TruncatedLine { .. } => "TruncatedLine",
            Self::MissingReferenceTemperature => "MissingReferenceTemperature",
            Self::InvalidReferenceValue { .. } => "InvalidReferenceValue",
            Self::QuantumNumberCountMismatch { .. } => "QuantumNumberCountMismatch",
            Self::QuantumNumberOutOfRange { .. } => "QuantumNumberOutOfRange",
            Self::InvalidVibrationalConfiguration { .. } => "InvalidVibrationalConfiguration",
            Self::InvalidLabelList { .. } => "InvalidLabelList",
            Self::UnsupportedFileExtension { .. } => "UnsupportedFileExtension",
            Self::Io { .. } => "Io",
            Self::Configuration { .. } => "Configuration",
            Self::Export { .. } => "Export",
            Self::Polars(_) => "Polars",
            Self::Interrupted { .. } => "Interrupted",
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
