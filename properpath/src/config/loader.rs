//! Configuration file discovery and loading.
//!
//! This module handles locating and loading properpath configuration files.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the user configuration file.
pub const USER_CONFIG_FILE: &str = "properpath.yaml";

/// A loaded configuration file.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path to the configuration file.
    pub path: PathBuf,
    /// Parsed configuration.
    pub config: Config,
}

/// Loads configuration from YAML files.
///
/// # Examples
///
/// ```no_run
/// use properpath::config::ConfigLoader;
///
/// if let Some(source) = ConfigLoader::load_user_config().unwrap() {
///     println!("loaded {}", source.path.display());
/// }
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load `properpath.yaml` from the user config directory, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_user_config() -> Result<Option<ConfigSource>> {
        let Some(path) = Self::user_config_path() else {
            return Ok(None);
        };
        Self::load_optional(&path)
    }

    /// Load a file if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_optional(path: &Path) -> Result<Option<ConfigSource>> {
        if !path.exists() {
            return Ok(None);
        }
        let config = Self::load_file(path)?;
        Ok(Some(ConfigSource {
            path: path.to_path_buf(),
            config,
        }))
    }

    /// Load and parse a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path).map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("Failed to read configuration file: {e}"),
        })?;

        let config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// `properpath.yaml` in the user config directory, when one is known.
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(USER_CONFIG_FILE))
    }
}
