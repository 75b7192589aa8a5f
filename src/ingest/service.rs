//! File-level ingestion on top of the pure decoders
//!
//! The decoders only see text. This layer reads files, checks that each one
//! has the extension its role requires, hands the content to the decoders on
//! the blocking pool, and runs many species concurrently.

use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::task;
use tracing::{debug, error, info, warn};

use super::file_kind::FileKind;
use super::stats::{IngestStats, SpeciesIngest};
use crate::error::{IngestError, Result};
use crate::models::{
    CatalogLineRecord, DipoleMoments, IngestionConfig, PartitionFunctionTable,
    RotationalConstants, SpeciesMetadata,
};
use crate::parsers::{
    decode_catalog, decode_dipole_moments, decode_partition_function,
    decode_rotational_constants, validate_config,
};

/// Files and hints making up one species upload
#[derive(Debug, Clone)]
pub struct SpeciesJob {
    pub name: String,
    pub qpart: PathBuf,
    pub int: Option<PathBuf>,
    pub var: Option<PathBuf>,
    pub cat: Option<PathBuf>,
    /// Required when `cat` is set
    pub config: Option<IngestionConfig>,
}

/// Output of decoding a single file of any kind
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum DecodedFile {
    DipoleMoments(DipoleMoments),
    RotationalConstants(RotationalConstants),
    PartitionFunction(PartitionFunctionTable),
    Catalog(Vec<CatalogLineRecord>),
}

impl DecodedFile {
    pub fn kind(&self) -> FileKind {
        match self {
            Self::DipoleMoments(_) => FileKind::DipoleMoments,
            Self::RotationalConstants(_) => FileKind::RotationalConstants,
            Self::PartitionFunction(_) => FileKind::PartitionFunction,
            Self::Catalog(_) => FileKind::Catalog,
        }
    }

    /// Number of records: catalog lines, table rows, or one for scalar files
    pub fn record_count(&self) -> usize {
        match self {
            Self::DipoleMoments(_) | Self::RotationalConstants(_) => 1,
            Self::PartitionFunction(table) => table.len(),
            Self::Catalog(lines) => lines.len(),
        }
    }
}

/// Read a file of an expected kind as text
///
/// Invalid UTF-8 sequences are replaced rather than rejected; the decoders
/// report any resulting garbage as malformed tokens with a line number.
pub async fn read_file(path: &Path, expected: FileKind) -> Result<String> {
    expected.expect(path)?;
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| IngestError::io(path, e))?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Decode a metadata bundle from already-read content
pub fn decode_metadata(
    qpart: &str,
    int: Option<&str>,
    var: Option<&str>,
) -> Result<SpeciesMetadata> {
    Ok(SpeciesMetadata {
        partition_function: decode_partition_function(qpart)?,
        dipole_moments: int.map(decode_dipole_moments).transpose()?,
        rotational_constants: var.map(decode_rotational_constants).transpose()?,
    })
}

/// Run a CPU-bound decode on the blocking pool
async fn decode_blocking<T, F>(context: &str, decode: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    task::spawn_blocking(decode)
        .await
        .map_err(|e| IngestError::Interrupted {
            reason: format!("decoding {} did not complete: {}", context, e),
        })?
}

/// Read and decode one file
///
/// Catalog files need the ingestion hints and the partition function of
/// their species; metadata files decode on their own.
pub async fn decode_file(
    path: &Path,
    catalog_context: Option<(&IngestionConfig, &PartitionFunctionTable)>,
) -> Result<DecodedFile> {
    let kind = FileKind::from_path(path)?;

    // Hints are validated before the file is even opened
    let catalog_context = match (kind, catalog_context) {
        (FileKind::Catalog, Some((config, partition))) => {
            validate_config(config)?;
            Some((config.clone(), partition.clone()))
        }
        (FileKind::Catalog, None) => {
            return Err(IngestError::configuration(format!(
                "{} is a catalog file; quantum number labels and a partition function are required",
                path.display()
            )));
        }
        _ => None,
    };

    let content = read_file(path, kind).await?;
    let context = path.display().to_string();
    let decoded = decode_blocking(&context, move || match kind {
        FileKind::DipoleMoments => decode_dipole_moments(&content).map(DecodedFile::DipoleMoments),
        FileKind::RotationalConstants => {
            decode_rotational_constants(&content).map(DecodedFile::RotationalConstants)
        }
        FileKind::PartitionFunction => {
            decode_partition_function(&content).map(DecodedFile::PartitionFunction)
        }
        FileKind::Catalog => match catalog_context {
            Some((config, partition)) => {
                decode_catalog(&content, &config, &partition).map(DecodedFile::Catalog)
            }
            None => Err(IngestError::configuration("catalog decoding needs ingestion hints")),
        },
    })
    .await?;

    info!("Decoded {} as {}", path.display(), decoded.kind());
    Ok(decoded)
}

/// Decode every file of one species
///
/// Fails as a whole: a species either yields all of its records or none.
pub async fn ingest_species(job: SpeciesJob) -> Result<SpeciesIngest> {
    debug!("Ingesting species '{}'", job.name);

    if job.cat.is_some() {
        match &job.config {
            Some(config) => validate_config(config)?,
            None => {
                return Err(IngestError::configuration(format!(
                    "species '{}' has a catalog file but no quantum number labels",
                    job.name
                )));
            }
        }
    }

    if job.int.is_none() {
        warn!("Species '{}' has no .int file; dipole moments left unset", job.name);
    }
    if job.var.is_none() {
        warn!("Species '{}' has no .var file; rotational constants left unset", job.name);
    }

    let qpart = read_file(&job.qpart, FileKind::PartitionFunction).await?;
    let int = match &job.int {
        Some(path) => Some(read_file(path, FileKind::DipoleMoments).await?),
        None => None,
    };
    let var = match &job.var {
        Some(path) => Some(read_file(path, FileKind::RotationalConstants).await?),
        None => None,
    };
    let cat = match &job.cat {
        Some(path) => Some(read_file(path, FileKind::Catalog).await?),
        None => None,
    };

    let files_decoded = 1 + [&int, &var, &cat].iter().filter(|f| f.is_some()).count();
    let SpeciesJob { name, config, .. } = job;
    let context = format!("species '{}'", name);

    decode_blocking(&context, move || {
        let metadata = decode_metadata(&qpart, int.as_deref(), var.as_deref())?;
        let catalog = match (cat, config) {
            (Some(content), Some(config)) => {
                decode_catalog(&content, &config, &metadata.partition_function)?
            }
            _ => Vec::new(),
        };

        info!(
            "Species '{}': {} files, {} catalog lines",
            name,
            files_decoded,
            catalog.len()
        );

        Ok(SpeciesIngest {
            name,
            metadata,
            catalog,
            files_decoded,
        })
    })
    .await
}

/// Concurrent ingestion of many species
#[derive(Debug, Clone)]
pub struct IngestionService {
    workers: usize,
}

impl IngestionService {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Ingest every job, at most `workers` at a time
    ///
    /// `on_complete` is called as each species finishes. Results come back
    /// in job order.
    pub async fn ingest_all<F>(
        &self,
        jobs: Vec<SpeciesJob>,
        mut on_complete: F,
    ) -> (Vec<(String, Result<SpeciesIngest>)>, IngestStats)
    where
        F: FnMut(&str, &Result<SpeciesIngest>),
    {
        let started = Instant::now();
        let total = jobs.len();
        info!(
            "Ingesting {} species with {} workers",
            total,
            self.workers.min(total.max(1))
        );

        let mut results: Vec<(usize, String, Result<SpeciesIngest>)> = stream::iter(
            jobs.into_iter().enumerate(),
        )
        .map(|(index, job)| async move {
            let name = job.name.clone();
            let result = ingest_species(job).await;
            if let Err(e) = &result {
                error!("Species '{}' failed: {}", name, e);
            }
            (index, name, result)
        })
        .buffer_unordered(self.workers)
        .inspect(|(_, name, result)| on_complete(name, result))
        .collect()
        .await;

        let mut stats = IngestStats::new();
        for (_, name, result) in &results {
            stats.record(name, result);
        }

        results.sort_by_key(|(index, _, _)| *index);
        stats.elapsed = started.elapsed();

        let ordered = results
            .into_iter()
            .map(|(_, name, result)| (name, result))
            .collect();
        (ordered, stats)
    }
}
