//! Configuration system for properpath.
//!
//! This module provides layered configuration with support for:
//! - a YAML configuration file (`properpath.yaml` in the user config dir)
//! - environment variable overrides
//! - programmatic configuration via builder pattern
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`PROPERPATH_*`)
//! 3. Configuration file
//! 4. Built-in defaults
//!
//! # Examples
//!
//! Loading the user configuration and turning it into directories:
//!
//! ```no_run
//! use properpath::config::ConfigBuilder;
//! use properpath::PlatformDirs;
//!
//! let config = ConfigBuilder::new().build().unwrap();
//! let dirs = PlatformDirs::new(config.app_dirs_options());
//! println!("{}", dirs.user_cache_dir().unwrap());
//! ```
//!
//! Reading a specific file:
//!
//! ```no_run
//! use properpath::config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new()
//!     .with_file("/etc/editor/properpath.yaml")
//!     .skip_env()
//!     .build()
//!     .unwrap();
//! let target = config.write_validator();
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod schema;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use schema::{AuthorSetting, Config, DirsConfig, ValidatorConfig};
