//! Configuration files driving mode assembly.

use std::fs::File;
use std::io::Write;

use chrono::{NaiveDate, NaiveDateTime};
use tempfile::TempDir;

use datesift::{Config, ConfigError, Correction, DateExtractor, DateSiftError, Locale};

fn reference() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 1, 20)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

/// Write `content` to a config file inside `dir`.
fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("datesift.toml");
    let mut file = File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
fn test_config_file_selects_locale() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
            [parser]
            locale = "ja"
            correction = "backward"
        "#,
    );

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.parser.locale, Locale::Ja);
    assert_eq!(config.parser.correction, Correction::Backward);

    let extractor = DateExtractor::from_config(&config).unwrap();
    assert!(extractor.mode().stage_names().contains(&"backward_correction"));

    let results = extractor.parse("2025年", reference()).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].text, "2025年");
}

#[test]
fn test_missing_file_is_read_error() {
    let dir = TempDir::new().unwrap();
    let err = Config::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, DateSiftError::Config(ConfigError::ReadFile(_))));
}

#[test]
fn test_malformed_file_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[parser\nlocale = ");
    let err = Config::from_file(&path).unwrap_err();
    assert!(matches!(err, DateSiftError::Config(ConfigError::Parse(_))));
}

#[test]
fn test_bad_filter_pattern_names_its_section() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
            [filter]
            unlikely_suffixes = ["[unclosed"]
        "#,
    );
    match Config::from_file(&path).unwrap_err() {
        DateSiftError::Config(ConfigError::Pattern { name, .. }) => {
            assert_eq!(name, "filter.unlikely_suffixes");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_custom_suffix_filter() {
    let text = "the engine idles at 2000 rpm";

    let default = DateExtractor::from_config(&Config::default()).unwrap();
    assert_eq!(default.parse(text, reference()).unwrap().len(), 1);

    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
            [filter]
            unlikely_suffixes = ['(?i)^\s*rpm\b']
        "#,
    );
    let config = Config::from_file(&path).unwrap();
    let filtered = DateExtractor::from_config(&config).unwrap();
    assert!(filtered.parse(text, reference()).unwrap().is_empty());
}
