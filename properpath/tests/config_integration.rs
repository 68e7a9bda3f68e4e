//! Integration tests for the configuration system.
//!
//! This test suite validates file loading, environment variable handling and
//! precedence, and the conversions from `Config` into library types.
//!
//! Tests that modify environment variables are marked with `#[serial]` to
//! ensure they run sequentially and don't interfere with each other.

mod common;

use common::create_temp_dir;
use properpath::config::environment::ALL_VARS;
use properpath::config::{Config, ConfigBuilder, DirsConfig, ValidatorConfig};
use properpath::{AppAuthor, Error, LogLevel, PlatformDirs, Validator};
use serial_test::serial;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Test Utilities
// ============================================================================

/// Helper to create a temporary config file.
fn create_temp_config(dir: &Path, filename: &str, content: &str) -> PathBuf {
    let path = dir.join(filename);
    fs::write(&path, content).unwrap();
    path
}

/// RAII guard for setting and restoring environment variables.
struct EnvGuard {
    key: String,
    old_value: Option<String>,
}

impl EnvGuard {
    fn new(key: &str, value: &str) -> Self {
        let old_value = env::var(key).ok();
        env::set_var(key, value);
        Self {
            key: key.to_string(),
            old_value,
        }
    }

    fn remove(key: &str) -> Self {
        let old_value = env::var(key).ok();
        env::remove_var(key);
        Self {
            key: key.to_string(),
            old_value,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.old_value {
            Some(val) => env::set_var(&self.key, val),
            None => env::remove_var(&self.key),
        }
    }
}

/// Clear every PROPERPATH_* variable for the duration of a test.
fn clear_properpath_env_vars() -> Vec<EnvGuard> {
    ALL_VARS.iter().map(|key| EnvGuard::remove(key)).collect()
}

const FULL_CONFIG: &str = "\
dirs:
  appname: editor
  appauthor: Acme
  version: '1.4'
  ensure_exists: false
validator:
  retain_created_file: true
log_mode: quiet
";

// ============================================================================
// File loading
// ============================================================================

#[test]
fn test_file_values_loaded() {
    let temp = create_temp_dir().unwrap();
    let file = create_temp_config(temp.path(), "properpath.yaml", FULL_CONFIG);

    let config = ConfigBuilder::new().with_file(&file).skip_env().build().unwrap();

    let options = config.app_dirs_options();
    assert_eq!(options.appname.as_deref(), Some("editor"));
    assert_eq!(options.appauthor, AppAuthor::Named("Acme".into()));
    assert_eq!(options.version.as_deref(), Some("1.4"));
    assert_eq!(config.logger().level(), LogLevel::Quiet);
}

#[test]
fn test_invalid_file_is_configuration_error() {
    let temp = create_temp_dir().unwrap();
    let file = create_temp_config(temp.path(), "broken.yaml", "dirs: [not, a, map]\n");

    let err = ConfigBuilder::new().with_file(&file).skip_env().build().unwrap_err();
    match err {
        Error::Configuration(_) => {}
        other => panic!("expected Configuration error, got {other:?}"),
    }
}

#[test]
fn test_skip_files_ignores_explicit_file() {
    let temp = create_temp_dir().unwrap();
    let file = create_temp_config(temp.path(), "properpath.yaml", FULL_CONFIG);

    let config = ConfigBuilder::new()
        .with_file(&file)
        .skip_files()
        .skip_env()
        .build()
        .unwrap();
    assert_eq!(config, Config::default());
}

// ============================================================================
// Precedence
// ============================================================================

#[test]
#[serial]
fn test_env_overrides_file() {
    let _guards = clear_properpath_env_vars();
    let _name = EnvGuard::new("PROPERPATH_APPNAME", "from-env");
    let _mode = EnvGuard::new("PROPERPATH_LOG_MODE", "verbose");

    let temp = create_temp_dir().unwrap();
    let file = create_temp_config(temp.path(), "properpath.yaml", FULL_CONFIG);

    let config = ConfigBuilder::new().with_file(&file).build().unwrap();

    let options = config.app_dirs_options();
    assert_eq!(options.appname.as_deref(), Some("from-env"));
    // Untouched file values survive
    assert_eq!(options.version.as_deref(), Some("1.4"));
    assert_eq!(config.log_mode, Some(LogLevel::Verbose));
}

#[test]
#[serial]
fn test_programmatic_overrides_env() {
    let _guards = clear_properpath_env_vars();
    let _name = EnvGuard::new("PROPERPATH_APPNAME", "from-env");
    let _roaming = EnvGuard::new("PROPERPATH_ROAMING", "1");

    let config = ConfigBuilder::new()
        .skip_files()
        .with_config(Config {
            dirs: Some(DirsConfig {
                appname: Some("from-code".into()),
                ..Default::default()
            }),
            ..Default::default()
        })
        .build()
        .unwrap();

    let options = config.app_dirs_options();
    assert_eq!(options.appname.as_deref(), Some("from-code"));
    assert!(options.roaming);
}

#[test]
#[serial]
fn test_skip_env_ignores_variables() {
    let _guards = clear_properpath_env_vars();
    let _name = EnvGuard::new("PROPERPATH_APPNAME", "from-env");

    let config = ConfigBuilder::new().skip_files().skip_env().build().unwrap();
    assert_eq!(config.app_dirs_options().appname, None);
}

#[test]
#[serial]
fn test_invalid_env_value_fails_build() {
    let _guards = clear_properpath_env_vars();
    let _mode = EnvGuard::new("PROPERPATH_LOG_MODE", "chatty");

    let err = ConfigBuilder::new().skip_files().build().unwrap_err();
    assert!(matches!(err, Error::Validation { ref field, .. } if field == "PROPERPATH_LOG_MODE"));
}

// ============================================================================
// Conversions
// ============================================================================

#[test]
fn test_config_drives_platform_dirs() {
    let temp = create_temp_dir().unwrap();
    let config = Config {
        dirs: Some(DirsConfig {
            appname: Some("editor".into()),
            ensure_exists: Some(true),
            ..Default::default()
        }),
        ..Default::default()
    };
    let layout = common::xdg_layout(temp.path(), &[]);

    let dirs = PlatformDirs::with_layout(config.app_dirs_options(), layout);
    let data = dirs.user_data_dir().unwrap();

    assert_eq!(data.as_path(), temp.path().join(".local/share/editor"));
    assert!(data.is_dir());
}

#[test]
fn test_config_drives_write_validator() {
    let temp = create_temp_dir().unwrap();
    let blocked = common::uncreatable_path(temp.path(), "nope");
    let target = temp.path().join("exports/summary.txt");
    let config = Config {
        validator: Some(ValidatorConfig {
            retain_created_file: Some(false),
            candidates: Some(vec![blocked, target.clone()]),
        }),
        ..Default::default()
    };

    let validated = config.write_validator().validate().unwrap();

    assert_eq!(validated.as_path(), target);
    assert!(!target.exists());
}
