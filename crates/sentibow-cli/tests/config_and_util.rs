//! Integration tests for CLI config parsing and util helpers.

use std::io::Write;

use sentibow_cli::input::ClassifyConfig;
use sentibow_cli::util::validate_text_file;

// ---------------------------------------------------------------------------
// validate_text_file
// ---------------------------------------------------------------------------

#[test]
fn validate_tsv_file_exists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.tsv");
    std::fs::File::create(&path).unwrap();
    assert!(validate_text_file(path.to_str().unwrap()).is_ok());
}

#[test]
fn validate_wrong_extension_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.csv");
    std::fs::File::create(&path).unwrap();
    assert!(validate_text_file(path.to_str().unwrap()).is_err());
}

#[test]
fn validate_nonexistent_file_errors() {
    assert!(validate_text_file("/nonexistent/path/data.tsv").is_err());
}

// ---------------------------------------------------------------------------
// ClassifyConfig
// ---------------------------------------------------------------------------

#[test]
fn classify_config_default_values() {
    let cfg = ClassifyConfig::default();
    assert_eq!(cfg.model.delta, 1.0);
    assert!(cfg.train_fraction > 0.0 && cfg.train_fraction < 1.0);
    assert!(cfg.test_data.is_none());
    assert!(cfg.validate().is_err(), "empty train_data must not validate");
}

#[test]
fn classify_config_partial_json_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(br#"{ "seed": 7, "model": { "vectorizer": "binary" } }"#)
        .unwrap();

    let cfg = ClassifyConfig::from_json_file(&path).unwrap();
    assert_eq!(cfg.seed, 7);
    assert!(cfg.model.vectorizer.is_binary());
    assert_eq!(cfg.model.delta, 1.0);
    assert_eq!(cfg.train_fraction, 0.8);
}

#[test]
fn classify_config_invalid_json_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(ClassifyConfig::from_json_file(&path).is_err());
}
