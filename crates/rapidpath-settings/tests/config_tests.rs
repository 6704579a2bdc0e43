//! File round trips and partial configs

use rapidpath_settings::{Config, SettingsError, TourKind};
use tempfile::TempDir;

#[test]
fn test_toml_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::new();
    config.optimizer.tour_kind = TourKind::Open;
    config.optimizer.max_points = 500;
    config.reader.modal_rapids = true;

    config.save_to_file(&path).unwrap();
    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("tour_kind = \"open\""));
}

#[test]
fn test_json_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    let mut config = Config::new();
    config.optimizer.refine = false;
    config.reader.height_axis = 'W';

    config.save_to_file(&path).unwrap();
    assert_eq!(Config::load_from_file(&path).unwrap(), config);
}

#[test]
fn test_partial_toml_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[optimizer]\nmax_points = 64\n").unwrap();

    let config = Config::load_from_file(&path).unwrap();
    assert_eq!(config.optimizer.max_points, 64);
    assert!(config.optimizer.refine);
    assert_eq!(config.optimizer.tour_kind, TourKind::Closed);
    assert!(!config.reader.modal_rapids);
    assert_eq!(config.reader.height_axis, 'Z');
}

#[test]
fn test_invalid_values_are_rejected_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[reader]\nheight_axis = \"X\"\n").unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::InvalidSetting { .. }));
}

#[test]
fn test_malformed_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::JsonError(_)));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = Config::load_from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, SettingsError::LoadError(_)));
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let err = Config::new()
        .save_to_file(&dir.path().join("config.yaml"))
        .unwrap_err();
    assert!(matches!(err, SettingsError::UnsupportedFormat(_)));
}
