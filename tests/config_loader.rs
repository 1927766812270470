use std::path::PathBuf;

use tempfile::TempDir;
use todoflow::config::{Config, ConfigError};
use todoflow::todos::AddMode;

fn write_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, content).unwrap();
    (temp_dir, path)
}

/// Test that Config::default() produces the expected values.
#[test]
fn test_config_default_values() {
    let config = Config::default();
    assert_eq!(config.store.add_mode, AddMode::Sync);
    assert_eq!(config.logging.filter, "info");
    assert!(config.storage.path.ends_with("todoflow/storage.json"));
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_path_ends_with_expected() {
    assert!(Config::config_path().ends_with("todoflow/config.toml"));
}

#[test]
fn test_missing_file_loads_default() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::load_from(&temp_dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.store.add_mode, AddMode::Sync);
}

#[test]
fn test_full_config_parses() {
    let (_dir, path) = write_config(
        r#"
[store]
add_mode = "async"

[storage]
path = "/var/lib/todoflow/todos.json"

[logging]
filter = "todoflow=debug"
"#,
    );

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.store.add_mode, AddMode::Async);
    assert_eq!(config.storage.path, PathBuf::from("/var/lib/todoflow/todos.json"));
    assert_eq!(config.logging.filter, "todoflow=debug");
}

#[test]
fn test_partial_config_fills_defaults() {
    let (_dir, path) = write_config("[store]\nadd_mode = \"async\"\n");

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.store.add_mode, AddMode::Async);
    assert_eq!(config.logging.filter, "info");
    assert!(config.storage.path.ends_with("todoflow/storage.json"));
}

#[test]
fn test_unknown_add_mode_is_parse_error() {
    let (_dir, path) = write_config("[store]\nadd_mode = \"eventually\"\n");

    match Config::load_from(&path).unwrap_err() {
        ConfigError::ParseError { path: err_path, .. } => assert_eq!(err_path, path),
        other => panic!("Expected ParseError, got {other:?}"),
    }
}

#[test]
fn test_blank_log_filter_fails_validation() {
    let (_dir, path) = write_config("[logging]\nfilter = \"  \"\n");

    match Config::load_from(&path).unwrap_err() {
        ConfigError::ValidationError { message } => {
            assert!(message.contains("Log filter"));
        }
        other => panic!("Expected ValidationError, got {other:?}"),
    }
}

#[test]
fn test_storage_path_without_file_name_fails_validation() {
    let mut config = Config::default();
    config.storage.path = PathBuf::from("/");

    match config.validate().unwrap_err() {
        ConfigError::ValidationError { message } => {
            assert!(message.contains("does not name a file"));
        }
        other => panic!("Expected ValidationError, got {other:?}"),
    }
}
