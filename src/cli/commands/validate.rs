//! Validate command implementation
//!
//! Ingests every species of a manifest concurrently and reports which ones
//! decode cleanly. Nothing is written; a failed species only affects itself.

use colored::*;
use serde_json::json;
use tracing::{debug, info, warn};

use super::shared::{CommandSummary, create_progress_bar, csv_escape};
use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::config::{Config, SpeciesManifest};
use crate::error::{IngestError, Result};
use crate::ingest::{IngestFailure, IngestStats, IngestionService, SpeciesIngest};

/// Per-species outcome, in manifest order
pub type SpeciesResults = Vec<(String, Result<SpeciesIngest>)>;

/// Validate command runner
pub async fn run_validate(args: &ValidateArgs, config: &Config) -> Result<CommandSummary> {
    debug!("Validate arguments: {:?}", args);
    args.validate()?;

    let manifest = SpeciesManifest::load(&args.manifest)?;
    manifest.validate()?;
    let jobs = manifest.into_jobs();

    info!(
        "Validating {} species from {}",
        jobs.len(),
        args.manifest.display()
    );

    let progress = create_progress_bar(
        jobs.len() as u64,
        "Ingesting species",
        config.processing.show_progress,
    );
    let service = IngestionService::new(config.processing.workers);
    let (results, stats) = service
        .ingest_all(jobs, |name, result| {
            if result.is_err() {
                progress.println(format!("{} {}", "✗".red(), name));
            }
            progress.inc(1);
        })
        .await;
    progress.finish_and_clear();

    if !stats.is_successful() {
        warn!(
            "{} of {} species failed validation",
            stats.species_failed(),
            stats.species_total
        );
    }

    let output = match args.output_format {
        OutputFormat::Human => render_human(&results, &stats),
        OutputFormat::Json => render_json(&stats)?,
        OutputFormat::Csv => render_csv(&results),
    };
    println!("{}", output);

    Ok(CommandSummary {
        files_decoded: stats.files_decoded,
        records: stats.catalog_lines,
        failures: stats.species_failed(),
        elapsed: stats.elapsed,
    })
}

/// Human-readable report
pub fn render_human(results: &SpeciesResults, stats: &IngestStats) -> String {
    let mut output = format!(
        "{}\n\
         Species: {} ({} succeeded, {} failed, {:.1}%)\n\
         Files decoded: {}\n\
         Catalog lines: {} ({} rovibrational)\n\
         Elapsed: {}\n\n",
        "Species Validation Report".bold(),
        stats.species_total,
        stats.species_succeeded,
        stats.species_failed(),
        stats.success_rate(),
        stats.files_decoded,
        stats.catalog_lines,
        stats.rovibrational_lines,
        CommandSummary::format_duration(stats.elapsed)
    );

    for (name, result) in results {
        match result {
            Ok(species) => output.push_str(&format!(
                "  {} {:<24} {} files, {} lines\n",
                "✓".green(),
                name,
                species.files_decoded,
                species.catalog.len()
            )),
            Err(error) => output.push_str(&format!(
                "  {} {:<24} {}\n",
                "✗".red(),
                name,
                error.to_string().red()
            )),
        }
    }

    output
}

/// JSON report built from the batch statistics
pub fn render_json(stats: &IngestStats) -> Result<String> {
    let report = json!({
        "summary": stats,
        "success_rate": stats.success_rate(),
        "elapsed_seconds": stats.elapsed.as_secs_f64(),
        "generated_at": chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
    });

    serde_json::to_string_pretty(&report)
        .map_err(|e| IngestError::configuration(format!("Failed to serialize report: {}", e)))
}

/// CSV report with one row per species
pub fn render_csv(results: &SpeciesResults) -> String {
    let mut csv = String::from("species,status,files_decoded,catalog_lines,error_kind,error_line,error\n");

    for (name, result) in results {
        match result {
            Ok(species) => csv.push_str(&format!(
                "{},ok,{},{},,,\n",
                csv_escape(name),
                species.files_decoded,
                species.catalog.len()
            )),
            Err(error) => {
                let failure = IngestFailure::new(name.as_str(), error);
                csv.push_str(&format!(
                    "{},failed,0,0,{},{},{}\n",
                    csv_escape(name),
                    failure.kind,
                    failure.line.map(|l| l.to_string()).unwrap_or_default(),
                    csv_escape(&failure.message)
                ));
            }
        }
    }

    csv.trim_end().to_string()
}
