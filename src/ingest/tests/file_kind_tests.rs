//! Tests for extension-based file classification

use std::path::Path;

use crate::error::IngestError;
use crate::ingest::FileKind;

#[test]
fn test_classifies_supported_extensions() {
    assert_eq!(FileKind::from_path(Path::new("a/h2co.int")).unwrap(), FileKind::DipoleMoments);
    assert_eq!(
        FileKind::from_path(Path::new("h2co.var")).unwrap(),
        FileKind::RotationalConstants
    );
    assert_eq!(
        FileKind::from_path(Path::new("h2co.qpart")).unwrap(),
        FileKind::PartitionFunction
    );
    assert_eq!(FileKind::from_path(Path::new("H2CO.CAT")).unwrap(), FileKind::Catalog);
}

#[test]
fn test_rejects_other_extensions() {
    for name in ["h2co.txt", "h2co", "h2co.cat.bak", ".cat"] {
        assert!(
            matches!(
                FileKind::from_path(Path::new(name)),
                Err(IngestError::UnsupportedFileExtension { .. })
            ),
            "{name} should be rejected"
        );
    }
}

#[test]
fn test_expect_requires_matching_kind() {
    assert!(FileKind::Catalog.expect(Path::new("x.cat")).is_ok());
    assert!(matches!(
        FileKind::Catalog.expect(Path::new("x.qpart")),
        Err(IngestError::UnsupportedFileExtension { .. })
    ));
}

#[test]
fn test_display_and_metadata_flag() {
    assert_eq!(FileKind::PartitionFunction.to_string(), ".qpart");
    assert!(FileKind::DipoleMoments.is_metadata());
    assert!(!FileKind::Catalog.is_metadata());
}
