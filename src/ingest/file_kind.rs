//! Classification of uploaded files by extension

use serde::Serialize;
use std::fmt;
use std::path::Path;

use crate::constants::{CAT_EXTENSION, INT_EXTENSION, QPART_EXTENSION, VAR_EXTENSION};
use crate::error::{IngestError, Result};

/// The four file kinds the ingestion pipeline understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    /// `.int` dipole moments
    DipoleMoments,
    /// `.var` rotational constants
    RotationalConstants,
    /// `.qpart` partition function
    PartitionFunction,
    /// `.cat` line list
    Catalog,
}

impl FileKind {
    /// Match a bare extension (without the dot), case-insensitively
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            INT_EXTENSION => Some(Self::DipoleMoments),
            VAR_EXTENSION => Some(Self::RotationalConstants),
            QPART_EXTENSION => Some(Self::PartitionFunction),
            CAT_EXTENSION => Some(Self::Catalog),
            _ => None,
        }
    }

    /// Classify a path, rejecting anything that is not a supported upload
    pub fn from_path(path: &Path) -> Result<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| IngestError::UnsupportedFileExtension {
                path: path.to_path_buf(),
            })
    }

    /// Require a path to be of this kind
    pub fn expect(self, path: &Path) -> Result<()> {
        match Self::from_path(path)? {
            kind if kind == self => Ok(()),
            _ => Err(IngestError::UnsupportedFileExtension {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::DipoleMoments => INT_EXTENSION,
            Self::RotationalConstants => VAR_EXTENSION,
            Self::PartitionFunction => QPART_EXTENSION,
            Self::Catalog => CAT_EXTENSION,
        }
    }

    /// Metadata files decode without any caller-supplied hints
    pub fn is_metadata(self) -> bool {
        !matches!(self, Self::Catalog)
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.extension())
    }
}
