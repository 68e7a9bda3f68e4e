//! File/directory kinds and kind inference.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Whether a path denotes a file or a directory.
///
/// # Examples
///
/// ```
/// use properpath::Kind;
///
/// assert_eq!("FILE".parse::<Kind>().unwrap(), Kind::File);
/// assert_eq!(Kind::Dir.to_string(), "dir");
/// assert!("folder".parse::<Kind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// A regular file, or a special file such as `/dev/null`.
    File,
    /// A directory.
    Dir,
}

impl Kind {
    /// Infer the kind of `path` from the filesystem, falling back to its name.
    ///
    /// Existing directories are `Dir`; existing regular files, existing special
    /// files and missing paths with an extension are `File`; everything else is
    /// `Dir`. The extension check is a heuristic: a missing extensionless file
    /// is reported as a directory.
    ///
    /// # Examples
    ///
    /// ```
    /// use properpath::Kind;
    /// use std::path::Path;
    ///
    /// assert_eq!(Kind::infer(Path::new("/no/such/report.txt")), Kind::File);
    /// assert_eq!(Kind::infer(Path::new("/no/such/folder")), Kind::Dir);
    /// ```
    #[must_use]
    pub fn infer(path: &Path) -> Self {
        match path.metadata() {
            Ok(meta) if meta.is_dir() => Self::Dir,
            // Regular files and devices like /dev/null
            Ok(_) => Self::File,
            Err(_) if path.extension().is_some() => Self::File,
            Err(_) => Self::Dir,
        }
    }

    /// The kind of an existing entry, given its metadata.
    #[must_use]
    pub fn of(meta: &std::fs::Metadata) -> Self {
        if meta.is_dir() {
            Self::Dir
        } else {
            Self::File
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Dir => write!(f, "dir"),
        }
    }
}

impl FromStr for Kind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" => Ok(Self::File),
            "dir" => Ok(Self::Dir),
            _ => Err(Error::InvalidKind {
                value: s.to_string(),
            }),
        }
    }
}
