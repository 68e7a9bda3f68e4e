//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `PROPERPATH_*` environment variables that
//! override configuration file values.

use crate::config::schema::{AuthorSetting, Config};
use crate::error::{Error, Result};
use crate::logging::{LogLevel, LOG_MODE_ENV};
use std::env;

/// Application name.
pub const APPNAME_ENV: &str = "PROPERPATH_APPNAME";
/// Application author: `true`, `false` or a name.
pub const APPAUTHOR_ENV: &str = "PROPERPATH_APPAUTHOR";
/// Version component.
pub const VERSION_ENV: &str = "PROPERPATH_VERSION";
/// Roaming profile flag.
pub const ROAMING_ENV: &str = "PROPERPATH_ROAMING";
/// Opinionated components flag.
pub const OPINION_ENV: &str = "PROPERPATH_OPINION";
/// Create-on-lookup flag.
pub const ENSURE_EXISTS_ENV: &str = "PROPERPATH_ENSURE_EXISTS";
/// XDG-on-macOS flag.
pub const FOLLOW_UNIX_ENV: &str = "PROPERPATH_FOLLOW_UNIX";
/// Keep files created by the write validator.
pub const RETAIN_CREATED_FILE_ENV: &str = "PROPERPATH_RETAIN_CREATED_FILE";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use properpath::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// Reads all `PROPERPATH_*` environment variables and applies them to the
    /// configuration with higher precedence than file-based configs.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid
    /// (e.g., an unrecognized boolean or log mode).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        Self::apply_dirs_overrides(config)?;

        if let Ok(val) = env::var(RETAIN_CREATED_FILE_ENV) {
            let validator = config.validator.get_or_insert_with(Default::default);
            validator.retain_created_file = Some(Self::parse_bool(RETAIN_CREATED_FILE_ENV, &val)?);
        }

        if let Ok(val) = env::var(LOG_MODE_ENV) {
            config.log_mode = Some(LogLevel::parse(&val).map_err(|message| Error::Validation {
                field: LOG_MODE_ENV.into(),
                message,
            })?);
        }

        Ok(())
    }

    /// Apply platform directory overrides.
    fn apply_dirs_overrides(config: &mut Config) -> Result<()> {
        let mut dirs = config.dirs.clone().unwrap_or_default();

        if let Ok(appname) = env::var(APPNAME_ENV) {
            dirs.appname = Some(appname);
        }
        if let Ok(author) = env::var(APPAUTHOR_ENV) {
            dirs.appauthor = Some(AuthorSetting::parse(&author));
        }
        if let Ok(version) = env::var(VERSION_ENV) {
            dirs.version = Some(version);
        }

        Self::override_flag(ROAMING_ENV, &mut dirs.roaming)?;
        Self::override_flag(OPINION_ENV, &mut dirs.opinion)?;
        Self::override_flag(ENSURE_EXISTS_ENV, &mut dirs.ensure_exists)?;
        Self::override_flag(FOLLOW_UNIX_ENV, &mut dirs.follow_unix)?;

        if !dirs.is_empty() {
            config.dirs = Some(dirs);
        }
        Ok(())
    }

    fn override_flag(var: &str, slot: &mut Option<bool>) -> Result<()> {
        if let Ok(val) = env::var(var) {
            *slot = Some(Self::parse_bool(var, &val)?);
        }
        Ok(())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}

/// Every variable [`EnvironmentConfig::apply_overrides`] reads.
pub const ALL_VARS: [&str; 9] = [
    APPNAME_ENV,
    APPAUTHOR_ENV,
    VERSION_ENV,
    ROAMING_ENV,
    OPINION_ENV,
    ENSURE_EXISTS_ENV,
    FOLLOW_UNIX_ENV,
    RETAIN_CREATED_FILE_ENV,
    LOG_MODE_ENV,
];
