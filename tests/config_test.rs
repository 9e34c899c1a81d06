//! Tests for loading configuration files.

use std::io::Write;

use alexnet_viz::{Error, VizConfig};
use tempfile::NamedTempFile;

fn write_config(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn test_partial_file_keeps_defaults() {
    let file = write_config(r#"{ "transition_ms": 250.0, "default_sample": "dog" }"#);
    let config = VizConfig::from_file(file.path()).unwrap();

    assert_eq!(config.transition_ms, 250.0);
    assert_eq!(config.default_sample, "dog");
    assert_eq!(config.canvas_height, 500.0);
    assert_eq!(config.frames_per_step, 90);
    assert_eq!(config.filter_seed, None);
}

#[test]
fn test_full_round_trip() {
    let config = VizConfig::default()
        .with_container_width(1200.0)
        .with_filter_seed(9);
    let file = write_config(&serde_json::to_string_pretty(&config).unwrap());

    let loaded = VizConfig::from_file(file.path()).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.canvas_width(), 1136.0);
}

#[test]
fn test_missing_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = VizConfig::from_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn test_malformed_json() {
    let file = write_config("{ transition_ms: ");
    let err = VizConfig::from_file(file.path()).unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn test_rejects_non_positive_values() {
    for json in [
        r#"{ "transition_ms": 0 }"#,
        r#"{ "canvas_height": -1 }"#,
        r#"{ "frames_per_step": 0 }"#,
    ] {
        let file = write_config(json);
        let err = VizConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)), "{json} accepted");
    }
}
