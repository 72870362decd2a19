//! Catalog file loading tests

use marigold_core::{Catalog, CoreError};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_catalog(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write catalog");
    file
}

#[test]
fn test_load_catalog_from_file() {
    let file = write_catalog(
        r#"
        [[tracks]]
        title = "Acoustic Breeze"
        artist = "Benjamin Tissot"
        media_uri = "https://example.com/breeze.mp3"
        artwork_uri = "https://example.com/breeze.png"

        [[tracks]]
        title = "Sunny"
        artist = "Benjamin Tissot"
        media_uri = "https://example.com/sunny.mp3"
        "#,
    );

    let catalog = Catalog::load(file.path()).unwrap();

    assert_eq!(catalog.len(), 2);
    let titles: Vec<&str> = catalog.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Acoustic Breeze", "Sunny"]);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Catalog::load(&dir.path().join("missing.toml")).unwrap_err();

    assert!(matches!(err, CoreError::Io(_)));
}

#[test]
fn test_load_malformed_file_is_parse_error() {
    let file = write_catalog("[[tracks]]\ntitle = 42\n");

    let err = Catalog::load(file.path()).unwrap_err();

    assert!(matches!(err, CoreError::CatalogParse(_)));
}

#[test]
fn test_blank_title_reports_position() {
    let file = write_catalog(
        r#"
        [[tracks]]
        title = "Fine"
        artist = "A"
        media_uri = "fine.mp3"

        [[tracks]]
        title = ""
        artist = "B"
        media_uri = "blank.mp3"
        "#,
    );

    let err = Catalog::load(file.path()).unwrap_err();

    match err {
        CoreError::InvalidTrack { index, reason } => {
            assert_eq!(index, 1);
            assert!(reason.contains("title"));
        }
        other => panic!("expected InvalidTrack, got {other:?}"),
    }
}
