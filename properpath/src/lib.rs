#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # properpath
//!
//! Path handles that know whether they point at a file or a directory.
//!
//! A [`PathHandle`] infers its [`Kind`] from the filesystem, or from the file
//! extension when nothing exists yet, and uses it to create and remove
//! entries safely. On top of that the crate finds a writable location among
//! candidates and maps OS-standard application directories to handles.
//!
//! ## Core Types
//!
//! - [`PathHandle`] and [`Kind`]: normalized paths with kind inference
//! - [`GuardedMutator`]: kind-checked `create` and `remove`
//! - [`PathWriteValidator`]: first writable path among candidates
//! - [`PlatformDirs`] and [`AppDirsOptions`]: user and site directories
//! - [`Error`] and [`Result`]: Error handling types
//! - [`ErrorSink`], [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use properpath::{GuardedMutator, Kind, PathHandle};
//!
//! let root = tempfile::tempdir().unwrap();
//! let log = PathHandle::from_path(root.path().join("logs/app.log")).unwrap();
//! assert_eq!(log.kind(), Kind::File);
//!
//! log.create().unwrap();
//! assert!(log.is_file());
//!
//! let logs = log.parent().unwrap();
//! logs.remove(false).unwrap();
//! assert!(!logs.exists());
//! ```

pub mod config;
pub mod error;
pub mod kind;
pub mod logging;
pub mod path;
pub mod platform;
pub mod validate;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use error::{CandidateFailure, Error, Operation, Result};
pub use kind::Kind;
pub use logging::{init_logger, ErrorSink, LogLevel, LogSink, Logger, MemorySink};
pub use path::{GuardedMutator, PathHandle};
pub use platform::{AppAuthor, AppDirsOptions, DirName, PlatformDirs};
pub use validate::{PathWriteValidator, Validator};
