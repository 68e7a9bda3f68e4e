//! Layered configuration assembly.

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::schema::{Config, DirsConfig, ValidatorConfig};
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Builds a [`Config`] from files, environment, and explicit values.
///
/// Later layers override earlier ones field by field:
/// defaults, then the YAML file, then `PROPERPATH_*` variables, then the
/// config passed to [`with_config`](Self::with_config).
///
/// # Examples
///
/// ```
/// use properpath::config::{Config, ConfigBuilder};
/// use properpath::LogLevel;
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config {
///         log_mode: Some(LogLevel::Verbose),
///         ..Default::default()
///     })
///     .build()
///     .unwrap();
/// assert_eq!(config.log_mode, Some(LogLevel::Verbose));
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    file: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Option<Config>,
}

impl ConfigBuilder {
    /// A builder that reads the user config file and the environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read this file instead of the user config file.
    #[must_use]
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Don't read any configuration file.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignore `PROPERPATH_*` environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Values that take precedence over every other source.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Assemble the configuration.
    ///
    /// A file set with [`with_file`](Self::with_file) must exist; the user
    /// config file is optional.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed, or an
    /// environment variable holds an invalid value.
    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();

        if !self.skip_files {
            let loaded = match &self.file {
                Some(path) => Some(ConfigLoader::load_file(path)?),
                None => ConfigLoader::load_user_config()?.map(|source| source.config),
            };
            if let Some(loaded) = loaded {
                merge_into(&mut config, &loaded);
            }
        }

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        if let Some(overrides) = &self.overrides {
            merge_into(&mut config, overrides);
        }

        Ok(config)
    }
}

/// Merge `source` into `target`; set fields in `source` win.
fn merge_into(target: &mut Config, source: &Config) {
    if let Some(dirs) = &source.dirs {
        merge_dirs(target.dirs.get_or_insert_with(DirsConfig::default), dirs);
    }
    if let Some(validator) = &source.validator {
        merge_validator(
            target.validator.get_or_insert_with(ValidatorConfig::default),
            validator,
        );
    }
    if source.log_mode.is_some() {
        target.log_mode = source.log_mode;
    }
}

fn merge_dirs(target: &mut DirsConfig, source: &DirsConfig) {
    if source.appname.is_some() {
        target.appname.clone_from(&source.appname);
    }
    if source.appauthor.is_some() {
        target.appauthor.clone_from(&source.appauthor);
    }
    if source.version.is_some() {
        target.version.clone_from(&source.version);
    }
    if source.roaming.is_some() {
        target.roaming = source.roaming;
    }
    if source.opinion.is_some() {
        target.opinion = source.opinion;
    }
    if source.ensure_exists.is_some() {
        target.ensure_exists = source.ensure_exists;
    }
    if source.follow_unix.is_some() {
        target.follow_unix = source.follow_unix;
    }
}

fn merge_validator(target: &mut ValidatorConfig, source: &ValidatorConfig) {
    if source.retain_created_file.is_some() {
        target.retain_created_file = source.retain_created_file;
    }
    // Candidate lists replace each other rather than accumulate.
    if source.candidates.is_some() {
        target.candidates.clone_from(&source.candidates);
    }
}
