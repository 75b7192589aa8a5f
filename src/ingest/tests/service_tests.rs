//! Tests for file-level decoding and concurrent species ingestion

use std::path::Path;
use tempfile::TempDir;

use super::*;
use crate::error::IngestError;
use crate::ingest::{
    DecodedFile, FileKind, IngestionService, SpeciesJob, decode_file, ingest_species, read_file,
};
use crate::models::IngestionConfig;
use crate::parsers::decode_partition_function;

fn h2co_job(dir: &Path) -> SpeciesJob {
    SpeciesJob {
        name: "H2CO".to_string(),
        qpart: dir.join("h2co.qpart"),
        int: Some(dir.join("h2co.int")),
        var: Some(dir.join("h2co.var")),
        cat: Some(dir.join("h2co.cat")),
        config: Some(IngestionConfig::from_label_str("N, Ka, Kc", false, None)),
    }
}

#[tokio::test]
async fn test_read_file_replaces_invalid_utf8() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("latin1.qpart");
    std::fs::write(&path, b"# T\xe9mp\n300.0 1.0\n").unwrap();

    let content = read_file(&path, FileKind::PartitionFunction).await.unwrap();
    assert!(content.contains('\u{FFFD}'));
    assert!(decode_partition_function(&content).is_ok());
}

#[tokio::test]
async fn test_read_file_checks_extension_before_io() {
    let result = read_file(Path::new("/nonexistent/file.txt"), FileKind::PartitionFunction).await;
    assert!(matches!(result, Err(IngestError::UnsupportedFileExtension { .. })));

    let result = read_file(Path::new("/nonexistent/file.qpart"), FileKind::PartitionFunction).await;
    assert!(matches!(result, Err(IngestError::Io { .. })));
}

#[tokio::test]
async fn test_decode_file_dispatches_on_extension() {
    let dir = create_species_dir();

    let decoded = decode_file(&dir.path().join("h2co.var"), None).await.unwrap();
    match decoded {
        DecodedFile::RotationalConstants(constants) => assert_eq!(constants.c, Some(34004.2444)),
        other => panic!("expected rotational constants, got {:?}", other.kind()),
    }

    let decoded = decode_file(&dir.path().join("h2co.int"), None).await.unwrap();
    assert_eq!(decoded.kind(), FileKind::DipoleMoments);
}

#[tokio::test]
async fn test_decode_catalog_file_needs_hints() {
    let dir = create_species_dir();
    let cat = dir.path().join("h2co.cat");

    assert!(matches!(
        decode_file(&cat, None).await,
        Err(IngestError::Configuration { .. })
    ));

    let partition = decode_partition_function(&create_test_qpart()).unwrap();
    let config = IngestionConfig::from_label_str("N, Ka, Kc", false, None);
    match decode_file(&cat, Some((&config, &partition))).await.unwrap() {
        DecodedFile::Catalog(lines) => assert_eq!(lines.len(), 2),
        other => panic!("expected catalog, got {:?}", other.kind()),
    }
}

#[tokio::test]
async fn test_invalid_hints_rejected_before_reading() {
    let partition = decode_partition_function(&create_test_qpart()).unwrap();
    let config = IngestionConfig::from_label_str("N, Ka, Kc", true, None);

    // the file does not exist; validation fails first
    let result = decode_file(Path::new("/nonexistent/x.cat"), Some((&config, &partition))).await;
    assert!(matches!(
        result,
        Err(IngestError::InvalidVibrationalConfiguration { .. })
    ));
}

#[tokio::test]
async fn test_ingest_species_complete_upload() {
    let dir = create_species_dir();
    let species = ingest_species(h2co_job(dir.path())).await.unwrap();

    assert_eq!(species.name, "H2CO");
    assert_eq!(species.files_decoded, 4);
    assert_eq!(species.catalog.len(), 2);
    assert!(species.metadata.dipole_moments.is_some());
    assert_eq!(species.metadata.partition_function.reference_key(), "300.000");
}

#[tokio::test]
async fn test_ingest_species_metadata_only() {
    let dir = create_species_dir();
    let job = SpeciesJob {
        int: None,
        var: None,
        cat: None,
        config: None,
        ..h2co_job(dir.path())
    };

    let species = ingest_species(job).await.unwrap();
    assert_eq!(species.files_decoded, 1);
    assert!(species.catalog.is_empty());
    assert!(species.metadata.rotational_constants.is_none());
}

#[tokio::test]
async fn test_ingest_species_is_all_or_nothing() {
    let dir = create_species_dir();
    write_file(dir.path(), "h2co.var", "bad /A\n");

    let result = ingest_species(h2co_job(dir.path())).await;
    assert!(matches!(result, Err(IngestError::MalformedNumber { line: 1, .. })));
}

#[tokio::test]
async fn test_catalog_without_labels_rejected() {
    let dir = create_species_dir();
    let job = SpeciesJob {
        config: None,
        ..h2co_job(dir.path())
    };

    assert!(matches!(
        ingest_species(job).await,
        Err(IngestError::Configuration { .. })
    ));
}

#[tokio::test]
async fn test_ingest_all_keeps_job_order() {
    let good = create_species_dir();
    let bad = TempDir::new().unwrap();
    write_file(bad.path(), "h2co.qpart", "150.0 1.0\n");

    let jobs = vec![
        h2co_job(good.path()),
        SpeciesJob {
            name: "broken".to_string(),
            int: None,
            var: None,
            cat: None,
            config: None,
            ..h2co_job(bad.path())
        },
        SpeciesJob {
            name: "H2CO again".to_string(),
            ..h2co_job(good.path())
        },
    ];

    let mut completed = Vec::new();
    let service = IngestionService::new(2);
    let (results, stats) = service
        .ingest_all(jobs, |name, _| completed.push(name.to_string()))
        .await;

    let names: Vec<_> = results.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["H2CO", "broken", "H2CO again"]);
    assert!(matches!(
        results[1].1,
        Err(IngestError::MissingReferenceTemperature)
    ));

    assert_eq!(completed.len(), 3);
    assert_eq!(stats.species_total, 3);
    assert_eq!(stats.species_succeeded, 2);
    assert_eq!(stats.catalog_lines, 4);
    assert_eq!(stats.failures[0].name, "broken");
}

#[test]
fn test_service_needs_at_least_one_worker() {
    assert_eq!(IngestionService::new(0).workers(), 1);
}

#[tokio::test]
async fn test_record_count_per_kind() {
    let dir = create_species_dir();

    let qpart = decode_file(&dir.path().join("h2co.qpart"), None).await.unwrap();
    assert_eq!(qpart.record_count(), 4);

    let var = decode_file(&dir.path().join("h2co.var"), None).await.unwrap();
    assert_eq!(var.record_count(), 1);
}
