//! Configuration schema definitions.
//!
//! This module defines the configuration structure for properpath: the
//! options for platform directories, the write validator, and logging.

use crate::logging::{LogLevel, Logger};
use crate::platform::{AppAuthor, AppDirsOptions};
use crate::validate::PathWriteValidator;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete configuration structure.
///
/// Every field is optional so that sources can be layered; unset fields fall
/// back to the library defaults when the configuration is converted.
///
/// # Examples
///
/// ```
/// use properpath::config::{Config, DirsConfig};
///
/// let config = Config {
///     dirs: Some(DirsConfig {
///         appname: Some("editor".to_string()),
///         ..Default::default()
///     }),
///     ..Default::default()
/// };
/// assert_eq!(config.app_dirs_options().appname.as_deref(), Some("editor"));
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Platform directory settings.
    pub dirs: Option<DirsConfig>,

    /// Write validator settings.
    pub validator: Option<ValidatorConfig>,

    /// Verbosity of the stderr logger.
    pub log_mode: Option<LogLevel>,
}

/// Platform directory settings, mirroring [`AppDirsOptions`].
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DirsConfig {
    /// Application name.
    pub appname: Option<String>,

    /// Application author.
    pub appauthor: Option<AuthorSetting>,

    /// Version component.
    pub version: Option<String>,

    /// Use the roaming profile on Windows.
    pub roaming: Option<bool>,

    /// Append conventional components such as `log` or `Cache`.
    pub opinion: Option<bool>,

    /// Create directories when they are looked up.
    pub ensure_exists: Option<bool>,

    /// Use the XDG layout on macOS too.
    pub follow_unix: Option<bool>,
}

/// The `appauthor` setting.
///
/// In YAML, `true` means "same as the application name", `false` disables
/// the author and a string names it.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum AuthorSetting {
    /// `true` inherits the application name, `false` disables the author.
    Enabled(bool),
    /// An explicit author name.
    Named(String),
}

impl DirsConfig {
    /// Whether no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl AuthorSetting {
    /// Parse an environment value: `true`, `false`, or a name.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "true" => Self::Enabled(true),
            "false" => Self::Enabled(false),
            name => Self::Named(name.to_string()),
        }
    }
}

impl From<AuthorSetting> for AppAuthor {
    fn from(setting: AuthorSetting) -> Self {
        match setting {
            AuthorSetting::Enabled(true) => Self::Inherit,
            AuthorSetting::Enabled(false) => Self::Disabled,
            AuthorSetting::Named(name) => Self::Named(name),
        }
    }
}

/// Write validator settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Keep files the validator had to create.
    pub retain_created_file: Option<bool>,

    /// Candidate paths, in order of preference.
    pub candidates: Option<Vec<PathBuf>>,
}

impl Config {
    /// Platform directory options, with defaults for unset fields.
    #[must_use]
    pub fn app_dirs_options(&self) -> AppDirsOptions {
        let mut options = AppDirsOptions::default();
        let Some(dirs) = &self.dirs else {
            return options;
        };

        options.appname.clone_from(&dirs.appname);
        if let Some(author) = &dirs.appauthor {
            options.appauthor = author.clone().into();
        }
        options.version.clone_from(&dirs.version);
        if let Some(roaming) = dirs.roaming {
            options.roaming = roaming;
        }
        if let Some(opinion) = dirs.opinion {
            options.opinion = opinion;
        }
        if let Some(ensure_exists) = dirs.ensure_exists {
            options.ensure_exists = ensure_exists;
        }
        if let Some(follow_unix) = dirs.follow_unix {
            options.follow_unix = follow_unix;
        }
        options
    }

    /// A write validator over the configured candidates.
    #[must_use]
    pub fn write_validator(&self) -> PathWriteValidator {
        let validator = self.validator.clone().unwrap_or_default();
        PathWriteValidator::new(validator.candidates.unwrap_or_default())
            .with_retain_created_file(validator.retain_created_file.unwrap_or(true))
    }

    /// A stderr logger at the configured level.
    #[must_use]
    pub fn logger(&self) -> Logger {
        Logger::new(self.log_mode.unwrap_or(LogLevel::Normal))
    }
}
