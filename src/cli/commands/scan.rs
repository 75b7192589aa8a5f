//! Scan command implementation
//!
//! Walks a directory tree, classifies uploadable files by extension and
//! decodes every metadata file concurrently. Catalogs are only listed since
//! they cannot be decoded without quantum number labels.

use colored::*;
use futures::stream::{self, StreamExt};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::shared::{CommandSummary, create_progress_bar, csv_escape};
use crate::cli::args::{OutputFormat, ScanArgs};
use crate::config::Config;
use crate::error::{IngestError, Result};
use crate::ingest::{FileKind, IngestFailure, ScanStats, decode_file};

/// Find supported files under `dir`, sorted by path
///
/// `pattern` is matched against file names only.
pub fn collect_files(dir: &Path, pattern: Option<&str>) -> Result<Vec<(PathBuf, FileKind)>> {
    let pattern = pattern
        .map(glob::Pattern::new)
        .transpose()
        .map_err(|e| IngestError::configuration(format!("Invalid pattern: {}", e)))?;

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", dir.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let Some(kind) = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(FileKind::from_extension)
        else {
            continue;
        };

        let name = entry.file_name().to_string_lossy();
        if let Some(pattern) = &pattern {
            if !pattern.matches(&name) {
                continue;
            }
        }

        files.push((path.to_path_buf(), kind));
    }

    files.sort_by(|a, b| a.0.cmp(&b.0));
    debug!("Found {} supported files under {}", files.len(), dir.display());
    Ok(files)
}

/// Scan command runner
pub async fn run_scan(args: &ScanArgs, config: &Config) -> Result<CommandSummary> {
    let start_time = Instant::now();
    debug!("Scan arguments: {:?}", args);
    args.validate()?;

    let files = collect_files(&args.dir, args.pattern.as_deref())?;
    let (catalogs, metadata): (Vec<_>, Vec<_>) = files
        .into_iter()
        .partition(|(_, kind)| !kind.is_metadata());

    info!(
        "Scanning {}: {} metadata files, {} catalogs",
        args.dir.display(),
        metadata.len(),
        catalogs.len()
    );

    let progress = create_progress_bar(
        metadata.len() as u64,
        "Decoding metadata",
        config.processing.show_progress,
    );

    let mut outcomes: Vec<(PathBuf, Result<usize>)> = stream::iter(metadata)
        .map(|(path, _)| async move {
            let result = decode_file(&path, None).await.map(|decoded| decoded.record_count());
            (path, result)
        })
        .buffer_unordered(config.processing.workers)
        .inspect(|_| progress.inc(1))
        .collect()
        .await;
    progress.finish_and_clear();
    outcomes.sort_by(|a, b| a.0.cmp(&b.0));

    let mut stats = ScanStats {
        files_seen: outcomes.len() + catalogs.len(),
        catalogs_found: catalogs.into_iter().map(|(path, _)| path).collect(),
        ..Default::default()
    };
    let mut records = 0;
    for (path, result) in &outcomes {
        match result {
            Ok(count) => {
                stats.files_decoded += 1;
                records += count;
            }
            Err(error) => {
                warn!("Failed to decode {}: {}", path.display(), error);
                stats
                    .failures
                    .push(IngestFailure::new(path.display().to_string(), error));
            }
        }
    }

    let output = match args.output_format {
        OutputFormat::Human => render_human(&args.dir, &stats),
        OutputFormat::Json => render_json(&args.dir, &stats)?,
        OutputFormat::Csv => render_csv(&outcomes, &stats),
    };
    println!("{}", output);

    Ok(CommandSummary {
        files_decoded: stats.files_decoded,
        records,
        failures: stats.failures.len(),
        elapsed: start_time.elapsed(),
    })
}

/// Human-readable scan report
pub fn render_human(dir: &Path, stats: &ScanStats) -> String {
    let mut output = format!(
        "{} {}\n\
         Files found: {}\n\
         Metadata decoded: {}\n\
         Catalogs found: {}\n",
        "Scan".bold(),
        dir.display(),
        stats.files_seen,
        stats.files_decoded,
        stats.catalogs_found.len()
    );

    for catalog in &stats.catalogs_found {
        output.push_str(&format!("  {} {}\n", "•".cyan(), catalog.display()));
    }

    if !stats.failures.is_empty() {
        output.push_str(&format!("{}\n", format!("Failures: {}", stats.failures.len()).red()));
        for failure in &stats.failures {
            output.push_str(&format!("  {} {}: {}\n", "✗".red(), failure.name, failure.message));
        }
    }

    output
}

/// JSON scan report
pub fn render_json(dir: &Path, stats: &ScanStats) -> Result<String> {
    let report = json!({
        "directory": dir.display().to_string(),
        "summary": stats,
        "generated_at": chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
    });

    serde_json::to_string_pretty(&report)
        .map_err(|e| IngestError::configuration(format!("Failed to serialize report: {}", e)))
}

/// CSV scan report with one row per file
pub fn render_csv(outcomes: &[(PathBuf, Result<usize>)], stats: &ScanStats) -> String {
    let mut csv = String::from("path,status,records,error\n");

    for (path, result) in outcomes {
        let path = csv_escape(&path.display().to_string());
        match result {
            Ok(count) => csv.push_str(&format!("{},decoded,{},\n", path, count)),
            Err(error) => csv.push_str(&format!(
                "{},failed,0,{}\n",
                path,
                csv_escape(&error.to_string())
            )),
        }
    }
    for catalog in &stats.catalogs_found {
        csv.push_str(&format!(
            "{},catalog,,\n",
            csv_escape(&catalog.display().to_string())
        ));
    }

    csv.trim_end().to_string()
}
