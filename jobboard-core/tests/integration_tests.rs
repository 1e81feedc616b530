//! Integration tests for jobboard-core infrastructure

use jobboard_core::{
    config_error, init_logging, not_found_error, open_store, storage_error, FileStore,
    JobBoardConfig, JobBoardError, KeyValueStore, LogFormat, LoggingConfig, StorageBackend,
};
use tempfile::TempDir;

#[test]
fn test_error_handling() {
    let error = storage_error!("Test storage error", "test_component");

    match &error {
        JobBoardError::Storage {
            message, context, ..
        } => {
            assert_eq!(message, "Test storage error");
            assert_eq!(context.component, "test_component");
            assert!(!context.error_id.is_empty());
        }
        _ => panic!("Expected Storage error"),
    }

    // Logging without a subscriber must not panic
    error.log();

    let config_error = config_error!("Invalid config", "test");
    assert!(!config_error.is_recoverable());
}

#[test]
fn test_error_macros() {
    let not_found_err = not_found_error!("config.toml", "config_loader");
    match not_found_err {
        JobBoardError::NotFound {
            resource, context, ..
        } => {
            assert_eq!(resource, "config.toml");
            assert_eq!(context.component, "config_loader");
            assert!(!context.recovery_suggestions.is_empty());
        }
        _ => panic!("Expected NotFound error"),
    }
}

#[test]
fn test_logging_initialization() {
    let config = LoggingConfig {
        level: "debug".to_string(),
        format: LogFormat::Compact,
        include_location: false,
        include_thread: false,
        include_timestamp: true,
        log_to_file: false,
        log_file_path: None,
        enable_performance_monitoring: false,
        filter_directives: vec!["jobboard_core=debug".to_string()],
    };

    // A global subscriber can only be installed once per process, so a
    // second attempt reports an error instead of panicking.
    let _ = init_logging(&config);
    assert!(init_logging(&config).is_err());
}

#[test]
fn test_config_file_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("jobboard.toml");

    let mut config = JobBoardConfig::default();
    config.session.default_organization = "Acme".to_string();
    config.storage.backend = StorageBackend::File;
    config.storage.data_dir = temp_dir.path().join("data");
    config.save_to_file(&path).unwrap();

    let loaded = JobBoardConfig::from_file(&path).unwrap();
    assert_eq!(loaded.session.default_organization, "Acme");
    assert_eq!(loaded.storage.backend, StorageBackend::File);
    assert_eq!(loaded.storage.data_dir, temp_dir.path().join("data"));
}

#[test]
fn test_config_validation() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bad.toml");
    std::fs::write(&path, "[catalog]\ndefault_currency = \"  \"\n").unwrap();

    match JobBoardConfig::from_file(&path) {
        Err(JobBoardError::Config { message, .. }) => {
            assert!(message.contains("default_currency"));
        }
        other => panic!("Expected Config error, got {:?}", other.map(|_| ())),
    }

    let missing = JobBoardConfig::load_or_default(temp_dir.path().join("absent.toml")).unwrap();
    assert_eq!(missing.session.storage_key, "user");
}

#[test]
fn test_open_store_from_config() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = JobBoardConfig::default();
    config.storage.backend = StorageBackend::File;
    config.storage.data_dir = temp_dir.path().to_path_buf();

    let mut store = open_store(&config.storage).unwrap();
    store.set("user", "{\"id\":\"42\"}").unwrap();

    let file_store = FileStore::new(temp_dir.path()).unwrap();
    assert_eq!(
        file_store.get("user").unwrap().as_deref(),
        Some("{\"id\":\"42\"}")
    );
}
