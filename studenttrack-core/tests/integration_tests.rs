//! Integration tests for studenttrack-core infrastructure

use studenttrack_core::{
    config_error, storage_error, validation_error, ErrorContext, LogFormat, LoggingConfig, Role,
    TrackConfig, TrackError,
};
use tempfile::TempDir;

#[test]
fn test_error_handling() {
    let error = storage_error!("Test storage error", "test_component");

    match &error {
        TrackError::Storage {
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
    let context = config_error.context().expect("config errors carry context");
    assert_eq!(context.recovery_suggestions.len(), 2);

    let validation = validation_error!("Bad value", "storage.session_key", "test");
    match validation {
        TrackError::Validation { field, .. } => {
            assert_eq!(field.as_deref(), Some("storage.session_key"));
        }
        _ => panic!("Expected Validation error"),
    }
}

#[test]
fn test_error_context_builder() {
    let context = ErrorContext::new("session_store")
        .with_operation("login")
        .with_metadata("email", "student@example.com")
        .with_suggestion("Try again");

    assert_eq!(context.operation.as_deref(), Some("login"));
    assert_eq!(
        context.metadata.get("email").map(String::as_str),
        Some("student@example.com")
    );
    assert_eq!(context.recovery_suggestions, vec!["Try again".to_string()]);
}

#[test]
fn test_io_error_has_no_context() {
    let error = TrackError::from(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "missing",
    ));
    assert!(error.context().is_none());
    assert!(error.to_string().contains("missing"));
}

#[test]
fn test_configuration_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nested").join("config.toml");

    let mut config = TrackConfig::default();
    config.auth.signup_role = Role::Faculty;
    config.storage.session_key = "current_user".to_string();
    config.logging.format = LogFormat::Json;

    config.save_to_file(&config_path).unwrap();
    let loaded = TrackConfig::from_file(&config_path).unwrap();

    assert_eq!(loaded.auth.signup_role, Role::Faculty);
    assert_eq!(loaded.storage.session_key, "current_user");
    assert_eq!(loaded.logging.format, LogFormat::Json);
    assert!(loaded.validate().is_ok());
}

#[test]
fn test_partial_configuration_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "[auth]\nsignup_role = \"student\"\n").unwrap();

    let config = TrackConfig::from_file(&config_path).unwrap();

    assert_eq!(config.auth.signup_role, Role::Student);
    assert_eq!(config.storage.session_key, "user");
    assert_eq!(config.logging.level, LoggingConfig::default().level);
}

#[test]
fn test_configuration_validation() {
    let mut config = TrackConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.auth.signup_role, Role::Admin);

    config.storage.session_key = "  ".to_string();
    assert!(matches!(
        config.validate(),
        Err(TrackError::Validation { .. })
    ));

    let mut config = TrackConfig::default();
    config.storage.data_dir = String::new();
    assert!(config.validate().is_err());
}

#[test]
fn test_invalid_toml_is_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "storage = [").unwrap();

    let error = TrackConfig::from_file(&config_path).unwrap_err();
    assert!(matches!(error, TrackError::Config { .. }));

    let context = error.context().unwrap();
    assert_eq!(context.operation.as_deref(), Some("parse_toml"));
    assert_eq!(
        context.metadata.get("path").map(String::as_str),
        Some(config_path.display().to_string().as_str())
    );
}

#[test]
fn test_data_dir_expansion() {
    let mut config = TrackConfig::default();
    config.storage.data_dir = "/var/lib/studenttrack".to_string();
    assert_eq!(
        config.storage.resolved_data_dir(),
        std::path::PathBuf::from("/var/lib/studenttrack")
    );

    config.storage.data_dir = "~/.studenttrack/data".to_string();
    if let Some(home) = dirs::home_dir() {
        assert_eq!(
            config.storage.resolved_data_dir(),
            home.join(".studenttrack/data")
        );
    }
}

#[test]
fn test_logging_file_requires_path() {
    let config = LoggingConfig {
        log_to_file: true,
        log_file_path: None,
        ..LoggingConfig::default()
    };

    // Subscriber can only be installed once per process, so only the error path is checked
    assert!(studenttrack_core::init_logging(&config).is_err());
}
