//! Command implementations for the spectroscopy ingestion CLI
//!
//! Each subcommand lives in its own module:
//! - `inspect`: decode one file and print it
//! - `convert`: decode a catalog and export it to Parquet or CSV
//! - `validate`: ingest every species of a manifest concurrently
//! - `scan`: decode every metadata file under a directory

pub mod convert;
pub mod inspect;
pub mod scan;
pub mod shared;
pub mod validate;

pub use shared::CommandSummary;

use tracing::info;

use crate::cli::args::{Args, Commands};
use crate::error::{IngestError, Result};

/// Main command runner
///
/// Loads the layered configuration, sets up logging once, then dispatches
/// to the subcommand handler.
pub async fn run(args: Args) -> Result<CommandSummary> {
    let config = shared::load_configuration(&args)?;
    shared::setup_logging(&config, args.quiet)?;

    let summary = match &args.command {
        Some(Commands::Inspect(inspect_args)) => inspect::run_inspect(inspect_args).await?,
        Some(Commands::Convert(convert_args)) => {
            convert::run_convert(convert_args, &config).await?
        }
        Some(Commands::Validate(validate_args)) => {
            validate::run_validate(validate_args, &config).await?
        }
        Some(Commands::Scan(scan_args)) => scan::run_scan(scan_args, &config).await?,
        None => return Err(IngestError::configuration("No command given")),
    };

    info!(
        "Finished: {} files decoded, {} records, {} failures in {}",
        summary.files_decoded,
        summary.records,
        summary.failures,
        CommandSummary::format_duration(summary.elapsed)
    );
    Ok(summary)
}
