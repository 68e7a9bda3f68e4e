//! Error types for the properpath library.
//!
//! This module provides the error hierarchy for every operation in the
//! library, using `thiserror` for ergonomic error handling.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::kind::Kind;

/// Result type alias for operations that may fail with a properpath error.
///
/// # Examples
///
/// ```
/// use properpath::{Error, Result};
///
/// fn example_operation() -> Result<u64> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The mutating operation that detected a kind mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `create()`.
    Create,
    /// `remove()`.
    Remove,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Remove => write!(f, "remove"),
        }
    }
}

/// Why a single write-validation candidate was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFailure {
    /// The candidate as it was given (or resolved, when resolution succeeded).
    pub path: PathBuf,
    /// Human-readable reason.
    pub reason: String,
    /// Raw OS error number, when the failure came from the OS.
    pub errno: Option<i32>,
}

impl fmt::Display for CandidateFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.reason)
    }
}

/// The main error type for the properpath library.
#[derive(Debug, Error)]
pub enum Error {
    /// An entry of the other kind already occupies the path.
    #[error("cannot {operation} {}: expected a {expected} but found a {found}", path.display())]
    KindMismatch {
        /// The path that was operated on.
        path: PathBuf,
        /// The kind the handle expected.
        expected: Kind,
        /// The kind actually found on the filesystem.
        found: Kind,
        /// The operation that detected the mismatch.
        operation: Operation,
    },

    /// No write-validation candidate passed.
    #[error(
        "no writable path among {} candidate(s){}",
        failures.len(),
        failures.last().map(|f| format!("; last failure: {f}")).unwrap_or_default()
    )]
    ValidationExhausted {
        /// Every rejected candidate, in the order they were tried.
        failures: Vec<CandidateFailure>,
    },

    /// Permission denied accessing a path.
    #[error("permission denied: {}", path.display())]
    PermissionDenied {
        /// The path that could not be accessed.
        path: PathBuf,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },

    /// A path does not exist.
    #[error("path not found: {}", path.display())]
    PathNotFound {
        /// The path that was not found.
        path: PathBuf,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },

    /// Any other I/O error.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// The path involved in the failed operation.
        path: PathBuf,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A kind string other than `file` or `dir` was provided.
    #[error("invalid kind '{value}': expected 'file' or 'dir'")]
    InvalidKind {
        /// The rejected value.
        value: String,
    },

    /// A platform directory could not be determined.
    #[error("cannot determine {name} directory on this platform")]
    DirectoryUnavailable {
        /// Name of the requested directory, e.g. `user_cache_dir`.
        name: String,
    },

    /// A configuration value failed validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),
}

impl Error {
    /// Wrap an I/O error with the path it happened at.
    ///
    /// Not-found and permission errors get their own variants; the raw error
    /// is kept as the source either way.
    ///
    /// # Examples
    ///
    /// ```
    /// use properpath::Error;
    /// use std::io;
    /// use std::path::Path;
    ///
    /// let err = Error::from_io(Path::new("/missing"), io::Error::from(io::ErrorKind::NotFound));
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => Self::PathNotFound { path, source },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path, source },
            _ => Self::Io { path, source },
        }
    }

    /// Check if error indicates a path does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PathNotFound { .. })
    }

    /// Check if error is permission-related.
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }

    /// Check if error is a file/directory kind mismatch.
    #[must_use]
    pub fn is_kind_mismatch(&self) -> bool {
        matches!(self, Self::KindMismatch { .. })
    }

    /// The raw OS error number behind this error, if any.
    ///
    /// For [`Error::ValidationExhausted`] this is the errno of the last
    /// candidate that failed with one.
    #[must_use]
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Self::PermissionDenied { source, .. }
            | Self::PathNotFound { source, .. }
            | Self::Io { source, .. } => source.raw_os_error(),
            Self::ValidationExhausted { failures } => {
                failures.iter().rev().find_map(|f| f.errno)
            }
            _ => None,
        }
    }
}
