//! Inspect command implementation
//!
//! Decodes a single file and prints its contents in the requested format.

use colored::*;
use polars::prelude::{CsvWriter, SerWriter};
use serde_json::json;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

use super::shared::{CommandSummary, csv_escape};
use crate::cli::args::{InspectArgs, OutputFormat};
use crate::error::{IngestError, Result};
use crate::export::catalog_to_dataframe;
use crate::ingest::{DecodedFile, decode_file};
use crate::models::{
    CatalogLineRecord, DipoleMoments, PartitionFunctionTable, QuantumNumberSet,
    RotationalConstants,
};

/// Inspect command runner
pub async fn run_inspect(args: &InspectArgs) -> Result<CommandSummary> {
    let start_time = Instant::now();
    debug!("Inspect arguments: {:?}", args);
    args.validate()?;

    let config = args.hints.ingestion_config();
    let partition = match &args.qpart {
        Some(qpart) if config.is_some() => Some(load_partition(qpart).await?),
        _ => None,
    };
    let catalog_context = config.as_ref().zip(partition.as_ref());

    let decoded = decode_file(&args.file, catalog_context).await?;
    let labels: Vec<String> = config
        .as_ref()
        .map(|c| c.labels().to_vec())
        .unwrap_or_default();

    let output = match args.output_format {
        OutputFormat::Human => render_human(&args.file, &decoded, args.limit),
        OutputFormat::Json => render_json(&args.file, &decoded)?,
        OutputFormat::Csv => render_csv(&decoded, &labels)?,
    };
    println!("{}", output);

    info!(
        "Inspected {} ({} records)",
        args.file.display(),
        decoded.record_count()
    );

    Ok(CommandSummary {
        files_decoded: 1 + usize::from(partition.is_some()),
        records: decoded.record_count(),
        failures: 0,
        elapsed: start_time.elapsed(),
    })
}

/// Decode the partition function a catalog needs for its line strengths
pub async fn load_partition(qpart: &Path) -> Result<PartitionFunctionTable> {
    match decode_file(qpart, None).await? {
        DecodedFile::PartitionFunction(table) => Ok(table),
        other => Err(IngestError::configuration(format!(
            "{} decoded as {}, expected a partition function",
            qpart.display(),
            other.kind()
        ))),
    }
}

fn optional<T: std::fmt::Display>(value: Option<T>, unit: &str) -> String {
    match value {
        Some(v) => format!("{} {}", v, unit),
        None => "absent".dimmed().to_string(),
    }
}

fn qn_text(set: &QuantumNumberSet) -> String {
    set.values()
        .iter()
        .map(|v| format!("{:>3}", v))
        .collect::<String>()
}

fn render_dipoles(dipoles: &DipoleMoments, output: &mut String) {
    output.push_str(&format!("  μa: {}\n", optional(dipoles.mu_a, "D")));
    output.push_str(&format!("  μb: {}\n", optional(dipoles.mu_b, "D")));
    output.push_str(&format!("  μc: {}\n", optional(dipoles.mu_c, "D")));
}

fn render_constants(constants: &RotationalConstants, output: &mut String) {
    output.push_str(&format!("  A: {}\n", optional(constants.a, "MHz")));
    output.push_str(&format!("  B: {}\n", optional(constants.b, "MHz")));
    output.push_str(&format!("  C: {}\n", optional(constants.c, "MHz")));
}

fn render_partition(table: &PartitionFunctionTable, output: &mut String) {
    let reference = table.reference_key();
    for (temperature, value) in table.iter() {
        let line = format!("  {:>10} K  {}", temperature, value);
        if temperature == reference {
            output.push_str(&format!("{}  (reference)\n", line.bold()));
        } else {
            output.push_str(&format!("{}\n", line));
        }
    }
}

fn render_catalog(lines: &[CatalogLineRecord], limit: usize, output: &mut String) {
    let rovibrational = lines.iter().filter(|l| l.rovibrational).count();
    output.push_str(&format!(
        "  Lines: {} ({} rovibrational)\n\n",
        lines.len(),
        rovibrational
    ));

    if lines.is_empty() {
        return;
    }

    output.push_str(&format!(
        "  {:>14} {:>9} {:>12} {:>12} {:>12} {:>4}  {:<18} {:<18}\n",
        "Freq (MHz)", "logI", "Sij mu^2", "Aij (s-1)", "Eup (cm-1)", "gup", "Upper", "Lower"
    ));
    for line in lines.iter().take(limit) {
        output.push_str(&format!(
            "  {:>14} {:>9} {:>12.4} {:>12.4e} {:>12.4} {:>4}  {:<18} {:<18}\n",
            line.frequency.to_string(),
            line.intensity.to_string(),
            line.s_ij_mu2,
            line.a_ij,
            line.upper_state_energy.round_dp(4).to_string(),
            line.upper_state_degeneracy,
            qn_text(&line.upper_state_qn),
            qn_text(&line.lower_state_qn)
        ));
    }
    if lines.len() > limit {
        output.push_str(&format!(
            "  {}\n",
            format!("... {} more lines", lines.len() - limit).dimmed()
        ));
    }
}

/// Human-readable rendering of a decoded file
pub fn render_human(path: &Path, decoded: &DecodedFile, limit: usize) -> String {
    let mut output = format!(
        "{} {}\n",
        decoded.kind().to_string().cyan().bold(),
        path.display()
    );

    match decoded {
        DecodedFile::DipoleMoments(dipoles) => render_dipoles(dipoles, &mut output),
        DecodedFile::RotationalConstants(constants) => render_constants(constants, &mut output),
        DecodedFile::PartitionFunction(table) => render_partition(table, &mut output),
        DecodedFile::Catalog(lines) => render_catalog(lines, limit, &mut output),
    }

    output
}

/// JSON rendering with file metadata
pub fn render_json(path: &Path, decoded: &DecodedFile) -> Result<String> {
    let report = json!({
        "file": path.display().to_string(),
        "records": decoded.record_count(),
        "decoded": decoded,
        "generated_at": chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
    });

    serde_json::to_string_pretty(&report)
        .map_err(|e| IngestError::configuration(format!("Failed to serialize report: {}", e)))
}

/// CSV rendering: one row per catalog line, or key/value rows for metadata
pub fn render_csv(decoded: &DecodedFile, labels: &[String]) -> Result<String> {
    fn pair<T: std::fmt::Display>(csv: &mut String, key: &str, value: Option<T>) {
        let value = value.map(|v| v.to_string()).unwrap_or_default();
        csv.push_str(&format!("{},{}\n", key, csv_escape(&value)));
    }

    let mut csv = String::new();
    match decoded {
        DecodedFile::DipoleMoments(dipoles) => {
            csv.push_str("component,debye\n");
            pair(&mut csv, "mu_a", dipoles.mu_a);
            pair(&mut csv, "mu_b", dipoles.mu_b);
            pair(&mut csv, "mu_c", dipoles.mu_c);
        }
        DecodedFile::RotationalConstants(constants) => {
            csv.push_str("constant,mhz\n");
            pair(&mut csv, "a", constants.a);
            pair(&mut csv, "b", constants.b);
            pair(&mut csv, "c", constants.c);
        }
        DecodedFile::PartitionFunction(table) => {
            csv.push_str("temperature,value\n");
            for (temperature, value) in table.iter() {
                csv.push_str(&format!("{},{}\n", csv_escape(temperature), csv_escape(value)));
            }
        }
        DecodedFile::Catalog(lines) => {
            let mut df = catalog_to_dataframe(lines, labels)?;
            let mut buffer = Vec::new();
            CsvWriter::new(&mut buffer).include_header(true).finish(&mut df)?;
            csv.push_str(&String::from_utf8_lossy(&buffer));
        }
    }

    Ok(csv.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::tests::{create_test_cat, create_test_config, create_test_partition};
    use crate::parsers::decode_catalog;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn decoded_catalog() -> DecodedFile {
        let lines =
            decode_catalog(&create_test_cat(), &create_test_config(), &create_test_partition())
                .unwrap();
        DecodedFile::Catalog(lines)
    }

    #[test]
    fn test_human_output_limits_catalog_lines() {
        colored::control::set_override(false);
        let output = render_human(Path::new("h2co.cat"), &decoded_catalog(), 1);

        assert!(output.starts_with(".cat h2co.cat"));
        assert!(output.contains("Lines: 2 (0 rovibrational)"));
        assert!(output.contains("72837.948"));
        assert!(!output.contains("145602.949"));
        assert!(output.contains("... 1 more lines"));
    }

    #[test]
    fn test_human_output_marks_absent_dipoles() {
        colored::control::set_override(false);
        let dipoles = DipoleMoments {
            mu_a: None,
            mu_b: Some(Decimal::from_str("1.5").unwrap()),
            mu_c: None,
        };
        let output = render_human(Path::new("x.int"), &DecodedFile::DipoleMoments(dipoles), 20);

        assert!(output.contains("μa: absent"));
        assert!(output.contains("μb: 1.5 D"));
    }

    #[test]
    fn test_json_output_is_tagged() {
        let table = create_test_partition();
        let output =
            render_json(Path::new("h2co.qpart"), &DecodedFile::PartitionFunction(table)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["decoded"]["kind"], "partition_function");
        assert_eq!(value["records"], 4);
        assert_eq!(value["decoded"]["data"]["300.000"], "2883.1190");
    }

    #[test]
    fn test_csv_output_for_catalog_has_qn_columns() {
        let labels = create_test_config().labels().to_vec();
        let output = render_csv(&decoded_catalog(), &labels).unwrap();
        let mut rows = output.lines();

        let header = rows.next().unwrap();
        assert!(header.starts_with("frequency,uncertainty,intensity"));
        assert!(header.ends_with("lower_N,lower_Ka,lower_Kc"));
        assert_eq!(rows.count(), 2);
    }

    #[test]
    fn test_csv_output_for_rotational_constants() {
        let constants = RotationalConstants {
            a: Some(20.0),
            b: None,
            c: None,
        };
        let output = render_csv(&DecodedFile::RotationalConstants(constants), &[]).unwrap();
        assert_eq!(output, "constant,mhz\na,20\nb,\nc,");
    }
}
