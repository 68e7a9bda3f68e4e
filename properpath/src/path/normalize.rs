//! Path normalization functions.
//!
//! This module turns the segments a [`PathHandle`](crate::PathHandle) is
//! built from into an absolute path by:
//! - Joining the segments (a later absolute segment replaces earlier ones)
//! - Expanding tilde (~) to the home directory
//! - Converting relative paths to absolute paths
//! - Resolving `.` and `..` components, following a symlink only when `..`
//!   comes right after it

use std::env;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Join path segments the way `PathBuf::push` does.
///
/// No segments yields `.`.
///
/// # Examples
///
/// ```
/// use properpath::path::normalize::join_segments;
/// use std::path::PathBuf;
///
/// assert_eq!(join_segments(["~", "Downloads"]), PathBuf::from("~/Downloads"));
/// assert_eq!(join_segments(["a", "/b"]), PathBuf::from("/b"));
/// assert_eq!(join_segments(Vec::<&str>::new()), PathBuf::from("."));
/// ```
pub fn join_segments<I, S>(segments: I) -> PathBuf
where
    I: IntoIterator<Item = S>,
    S: AsRef<Path>,
{
    let mut joined = PathBuf::new();
    for segment in segments {
        joined.push(segment);
    }
    if joined.as_os_str().is_empty() {
        joined.push(Component::CurDir);
    }
    joined
}

/// Expand tilde (~) to the home directory.
///
/// This function handles `~` and `~/path` but does not support `~user` syntax.
///
/// # Errors
///
/// Returns an error if:
/// - The path starts with `~` but contains invalid UTF-8
/// - The home directory cannot be determined
/// - The path uses `~user` syntax (not supported)
///
/// # Examples
///
/// ```
/// use properpath::path::normalize::expand_tilde;
/// use std::path::Path;
///
/// let expanded = expand_tilde(Path::new("~/project")).unwrap();
/// assert!(expanded.is_absolute());
/// assert!(expanded.ends_with("project"));
///
/// // Leaves other paths unchanged
/// let expanded = expand_tilde(Path::new("/absolute")).unwrap();
/// assert_eq!(expanded, Path::new("/absolute"));
/// ```
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    if !matches!(path.components().next(), Some(Component::Normal(c)) if c.to_string_lossy().starts_with('~'))
    {
        return Ok(path.to_path_buf());
    }

    let path_str = path.to_str().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "Path contains invalid UTF-8".to_string(),
    })?;

    let home = home::home_dir().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "Cannot determine home directory".to_string(),
    })?;

    if path_str == "~" {
        Ok(home)
    } else if path_str.starts_with("~/") || path_str.starts_with("~\\") {
        Ok(home.join(&path_str[2..]))
    } else {
        Err(Error::InvalidPath {
            path: path.to_path_buf(),
            reason: "~user syntax is not supported; use ~ or ~/path".to_string(),
        })
    }
}

/// Resolve `.` and `..` components in an absolute path.
///
/// Resolution is lexical except where `..` follows a symbolic link: there the
/// path so far is canonicalized first, so the result names the entry the OS
/// would reach. Links that are not followed by `..` are kept as they are.
///
/// # Errors
///
/// Returns an error if the path contains too many `..` components that would
/// escape the root directory, or if `..` follows a link that cannot be
/// resolved (for example a dangling one).
///
/// # Examples
///
/// ```
/// use properpath::path::normalize::resolve_components;
/// use std::path::{Path, PathBuf};
///
/// let resolved = resolve_components(Path::new("/a/./b/../c")).unwrap();
/// assert_eq!(resolved, PathBuf::from("/a/c"));
/// ```
pub fn resolve_components(path: &Path) -> Result<PathBuf> {
    let mut result = PathBuf::new();
    let mut has_root = false;

    for component in path.components() {
        match component {
            Component::RootDir => {
                result.push(component);
                has_root = true;
            }
            Component::Prefix(prefix) => {
                result.push(prefix.as_os_str());
                has_root = true;
            }
            Component::Normal(c) => {
                result.push(c);
            }
            Component::CurDir => {}
            Component::ParentDir => {
                // The OS applies `..` to a symlink's target, not to the link
                if result.is_symlink() {
                    result = fs::canonicalize(&result).map_err(|e| Error::from_io(&result, e))?;
                }
                if !result.pop() {
                    return Err(Error::InvalidPath {
                        path: path.to_path_buf(),
                        reason: "Path contains too many '..' components (escapes root)".to_string(),
                    });
                }
            }
        }
    }

    if has_root && result.as_os_str().is_empty() {
        result.push(Component::RootDir);
    }

    Ok(result)
}

/// Normalize a path to absolute form.
///
/// 1. Expands tilde (~) if present
/// 2. Converts relative paths to absolute (using current directory)
/// 3. Resolves `.` and `..` components
///
/// # Errors
///
/// Returns an error if tilde expansion fails, the current directory cannot
/// be determined, or the path escapes the root.
///
/// # Examples
///
/// ```
/// use properpath::path::normalize::normalize;
/// use std::path::Path;
///
/// let normalized = normalize(Path::new("./src")).unwrap();
/// assert!(normalized.is_absolute());
/// ```
pub fn normalize(path: &Path) -> Result<PathBuf> {
    let expanded = expand_tilde(path)?;

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        let cwd = env::current_dir().map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("Cannot get current directory: {e}"),
        })?;
        cwd.join(expanded)
    };

    resolve_components(&absolute)
}
