//! Command-line argument definitions for the spectroscopy ingestion tool
//!
//! This module defines the complete CLI interface using clap derive API.

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use crate::constants::MAX_WORKERS;
use crate::error::{IngestError, Result};
use crate::export::{CompressionAlgorithm, ExportFormat};
use crate::ingest::FileKind;
use crate::models::IngestionConfig;

/// CLI arguments for the spectroscopy file ingestion tool
///
/// Decodes molecular spectroscopy metadata (.int, .var, .qpart) and
/// Pickett/JPL-CDMS line catalogs (.cat) into typed records.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "spectro-ingest",
    version,
    about = "Decode and validate molecular spectroscopy catalog and metadata files",
    long_about = "Decodes dipole moment (.int), rotational constant (.var), partition function \
                  (.qpart) and Pickett/JPL-CDMS catalog (.cat) files. Catalog lines are checked \
                  against user-supplied quantum number labels, line strengths and Einstein A \
                  coefficients are derived at 300 K, and results can be exported to Parquet or CSV."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Also disables progress bars.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// <config dir>/spectro-ingest/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        global = true,
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Decode a single file and print its contents
    Inspect(InspectArgs),
    /// Decode a catalog and export it to Parquet or CSV
    Convert(ConvertArgs),
    /// Ingest every species listed in a TOML manifest
    Validate(ValidateArgs),
    /// Decode every metadata file under a directory
    Scan(ScanArgs),
}

/// Structural hints needed to decode a catalog
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct CatalogHintArgs {
    /// Comma-separated quantum number labels, in catalog order
    #[arg(
        short = 'l',
        long = "labels",
        value_name = "LIST",
        help = "Quantum number labels, e.g. \"N, Ka, Kc, v\""
    )]
    pub labels: Option<String>,

    /// The catalog contains rovibrational transitions
    #[arg(long = "rovibrational", requires = "vib_label")]
    pub rovibrational: bool,

    /// Label of the vibrational quantum number
    #[arg(long = "vib-label", value_name = "LABEL", requires = "rovibrational")]
    pub vib_label: Option<String>,
}

impl CatalogHintArgs {
    /// Ingestion hints, if labels were given
    pub fn ingestion_config(&self) -> Option<IngestionConfig> {
        self.labels.as_deref().map(|labels| {
            IngestionConfig::from_label_str(labels, self.rovibrational, self.vib_label.as_deref())
        })
    }
}

/// Arguments for the inspect command
#[derive(Debug, Clone, Parser)]
pub struct InspectArgs {
    /// File to decode (.int, .var, .qpart or .cat)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Partition function file, required for catalogs
    #[arg(long = "qpart", value_name = "FILE")]
    pub qpart: Option<PathBuf>,

    #[command(flatten)]
    pub hints: CatalogHintArgs,

    /// Maximum catalog lines shown in human output
    #[arg(long = "limit", value_name = "COUNT", default_value_t = 20)]
    pub limit: usize,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,
}

/// Arguments for the convert command
#[derive(Debug, Clone, Parser)]
pub struct ConvertArgs {
    /// Catalog file to convert
    #[arg(long = "cat", value_name = "FILE")]
    pub cat: PathBuf,

    /// Partition function of the same species
    #[arg(long = "qpart", value_name = "FILE")]
    pub qpart: PathBuf,

    #[command(flatten)]
    pub hints: CatalogHintArgs,

    /// Output file
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: PathBuf,

    /// Output format; inferred from the output extension when omitted
    #[arg(long = "export-format", value_enum)]
    pub export_format: Option<ExportFormat>,

    /// Parquet compression; defaults to the configured value
    #[arg(long = "compression", value_enum)]
    pub compression: Option<CompressionAlgorithm>,
}

/// Arguments for the validate command
#[derive(Debug, Clone, Parser)]
pub struct ValidateArgs {
    /// Species manifest (TOML with [[species]] entries)
    #[arg(short = 'm', long = "manifest", value_name = "FILE")]
    pub manifest: PathBuf,

    /// Number of species decoded concurrently
    #[arg(short = 'j', long = "workers", value_name = "COUNT")]
    pub workers: Option<usize>,

    /// Output format for the report
    #[arg(long = "format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,
}

/// Arguments for the scan command
#[derive(Debug, Clone, Parser)]
pub struct ScanArgs {
    /// Directory to search recursively
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Glob applied to file names, e.g. "h2co*"
    #[arg(short = 'p', long = "pattern", value_name = "GLOB")]
    pub pattern: Option<String>,

    /// Number of files decoded concurrently
    #[arg(short = 'j', long = "workers", value_name = "COUNT")]
    pub workers: Option<usize>,

    /// Output format for the report
    #[arg(long = "format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,
}

/// Output format options for machine-readable results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
    /// CSV format for data analysis
    Csv,
}

impl Args {
    /// Log level requested on the command line, if any
    pub fn get_log_level(&self) -> Option<&'static str> {
        if self.quiet {
            Some("error")
        } else {
            match self.verbose {
                0 => None,
                1 => Some("info"),
                2 => Some("debug"),
                _ => Some("trace"),
            }
        }
    }

    /// Worker count requested on the command line, if any
    pub fn get_workers(&self) -> Option<usize> {
        match &self.command {
            Some(Commands::Validate(args)) => args.workers,
            Some(Commands::Scan(args)) => args.workers,
            _ => None,
        }
    }
}

fn require_file(path: &Path, what: &str) -> Result<()> {
    if !path.is_file() {
        return Err(IngestError::configuration(format!(
            "{} does not exist or is not a file: {}",
            what,
            path.display()
        )));
    }
    Ok(())
}

fn validate_workers(workers: Option<usize>) -> Result<()> {
    match workers {
        Some(0) => Err(IngestError::configuration(
            "Number of workers must be greater than 0",
        )),
        Some(n) if n > MAX_WORKERS => Err(IngestError::configuration(format!(
            "Number of workers cannot exceed {}",
            MAX_WORKERS
        ))),
        _ => Ok(()),
    }
}

impl InspectArgs {
    /// Validate the inspect command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        let kind = FileKind::from_path(&self.file)?;
        require_file(&self.file, "Input file")?;

        if kind == FileKind::Catalog {
            if self.hints.labels.is_none() {
                return Err(IngestError::configuration(
                    "Inspecting a catalog requires --labels",
                ));
            }
            match &self.qpart {
                Some(qpart) => require_file(qpart, "Partition function file")?,
                None => {
                    return Err(IngestError::configuration(
                        "Inspecting a catalog requires --qpart",
                    ));
                }
            }
        }

        Ok(())
    }
}

impl ConvertArgs {
    /// Validate the convert command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        FileKind::Catalog.expect(&self.cat)?;
        FileKind::PartitionFunction.expect(&self.qpart)?;
        require_file(&self.cat, "Catalog file")?;
        require_file(&self.qpart, "Partition function file")?;

        if self.hints.labels.is_none() {
            return Err(IngestError::configuration("Converting a catalog requires --labels"));
        }

        if self.output.is_dir() {
            return Err(IngestError::configuration(format!(
                "Output path is a directory: {}",
                self.output.display()
            )));
        }

        Ok(())
    }
}

impl ValidateArgs {
    /// Validate the validate command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        require_file(&self.manifest, "Manifest")?;
        validate_workers(self.workers)
    }
}

impl ScanArgs {
    /// Validate the scan command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.dir.is_dir() {
            return Err(IngestError::configuration(format!(
                "Scan path is not a directory: {}",
                self.dir.display()
            )));
        }

        if let Some(pattern) = &self.pattern {
            glob::Pattern::new(pattern).map_err(|e| {
                IngestError::configuration(format!("Invalid pattern '{}': {}", pattern, e))
            })?;
        }

        validate_workers(self.workers)
    }
}
