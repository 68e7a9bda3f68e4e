//! Kind-guarded create and remove.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

use crate::error::{Error, Operation, Result};
use crate::kind::Kind;
use crate::path::PathHandle;

/// Create and remove entries without spelling out whether they are files
/// or directories.
///
/// Both operations compare the handle's kind with what is on disk first and
/// refuse to touch an entry of the other kind. Every failure is reported to
/// the handle's sink at debug level, once, and then returned.
pub trait GuardedMutator {
    /// Create the entry, including missing parent directories.
    ///
    /// Does nothing if an entry of the expected kind already exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KindMismatch`] if an entry of the other kind occupies
    /// the path, or the OS error if creation fails.
    fn create(&self) -> Result<()>;

    /// Remove the entry.
    ///
    /// Does nothing if the path does not exist. For a directory,
    /// `parent_only` removes only its direct non-directory children and
    /// keeps everything else; otherwise the directory is removed recursively.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KindMismatch`] if an entry of the other kind occupies
    /// the path, or the OS error if removal fails.
    fn remove(&self, parent_only: bool) -> Result<()>;
}

impl GuardedMutator for PathHandle {
    fn create(&self) -> Result<()> {
        let path = self.as_path();
        let expected = self.kind();

        match fs::metadata(path) {
            Ok(meta) => self
                .check_kind(expected, Kind::of(&meta), Operation::Create)
                .map_err(|e| self.report("create", e)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => self
                .create_missing(expected)
                .map_err(|e| self.report("create", e)),
            Err(e) => Err(self.report("create", Error::from_io(path, e))),
        }
    }

    fn remove(&self, parent_only: bool) -> Result<()> {
        let path = self.as_path();
        let expected = self.kind();

        let meta = match fs::metadata(path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(self.report("remove", Error::from_io(path, e))),
        };

        self.check_kind(expected, Kind::of(&meta), Operation::Remove)
            .and_then(|()| match expected {
                Kind::File => self.remove_file(path),
                Kind::Dir if parent_only => self.remove_children(path),
                Kind::Dir => {
                    fs::remove_dir_all(path).map_err(|e| Error::from_io(path, e))?;
                    self.trace(|| format!("Removed directory (recursively): {}", path.display()));
                    Ok(())
                }
            })
            .map_err(|e| self.report("remove", e))
    }
}

impl PathHandle {
    fn check_kind(&self, expected: Kind, found: Kind, operation: Operation) -> Result<()> {
        if expected == found {
            return Ok(());
        }
        Err(Error::KindMismatch {
            path: self.as_path().to_path_buf(),
            expected,
            found,
            operation,
        })
    }

    fn create_missing(&self, kind: Kind) -> Result<()> {
        let path = self.as_path();
        match kind {
            Kind::File => {
                if let Some(parent) = path.parent() {
                    if !parent.exists() {
                        self.trace(|| {
                            format!(
                                "Parent directory of {} not found, creating {}",
                                self.describe(),
                                parent.display()
                            )
                        });
                    }
                    fs::create_dir_all(parent).map_err(|e| Error::from_io(parent, e))?;
                }
                OpenOptions::new()
                    .write(true)
                    .create(true)
                    .truncate(false)
                    .open(path)
                    .map_err(|e| Error::from_io(path, e))?;
                self.trace(|| format!("Created file {}", path.display()));
            }
            Kind::Dir => {
                self.trace(|| {
                    format!("Directory {} not found, creating it", self.describe())
                });
                fs::create_dir_all(path).map_err(|e| Error::from_io(path, e))?;
            }
        }
        Ok(())
    }

    fn remove_file(&self, file: &Path) -> Result<()> {
        fs::remove_file(file).map_err(|e| Error::from_io(file, e))?;
        self.trace(|| format!("Removed file: {}", file.display()));
        Ok(())
    }

    fn remove_children(&self, dir: &Path) -> Result<()> {
        let entries = fs::read_dir(dir).map_err(|e| Error::from_io(dir, e))?;
        for entry in entries {
            let child = entry.map_err(|e| Error::from_io(dir, e))?.path();
            // Follows symlinks, so links to directories are kept as well
            if child.is_dir() {
                continue;
            }
            self.remove_file(&child)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::MemorySink;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn handle(temp: &TempDir, name: &str) -> PathHandle {
        PathHandle::new([temp.path(), Path::new(name)]).unwrap()
    }

    #[test]
    fn test_create_file_with_missing_parents() {
        let temp = TempDir::new().unwrap();
        let file = handle(&temp, "a/b/c.txt");
        file.create().unwrap();
        assert!(file.is_file());
        assert!(temp.path().join("a/b").is_dir());
    }

    #[test]
    fn test_create_dir_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let dir = handle(&temp, "cache");
        dir.create().unwrap();
        dir.create().unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_create_keeps_existing_file_content() {
        let temp = TempDir::new().unwrap();
        let file = handle(&temp, "notes.txt");
        fs::write(file.as_path(), "keep me").unwrap();
        file.create().unwrap();
        assert_eq!(fs::read_to_string(file.as_path()).unwrap(), "keep me");
    }

    #[test]
    fn test_create_file_over_dir_is_mismatch() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("report.txt")).unwrap();
        let sink = Arc::new(MemorySink::new());
        let file = handle(&temp, "report.txt")
            .with_kind(Kind::File)
            .with_sink(sink.clone())
            .with_verbose(false);

        let err = file.create().unwrap_err();
        assert!(matches!(
            err,
            Error::KindMismatch {
                expected: Kind::File,
                found: Kind::Dir,
                operation: Operation::Create,
                ..
            }
        ));
        assert_eq!(sink.messages().len(), 1);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let temp = TempDir::new().unwrap();
        handle(&temp, "ghost.txt").remove(false).unwrap();
        handle(&temp, "ghost").remove(true).unwrap();
    }

    #[test]
    fn test_remove_dir_as_file_is_mismatch() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("logs")).unwrap();
        let err = handle(&temp, "logs")
            .with_kind(Kind::File)
            .remove(false)
            .unwrap_err();
        assert!(err.is_kind_mismatch());
        assert!(temp.path().join("logs").is_dir());
    }

    #[test]
    fn test_remove_parent_only_keeps_subdirs() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("root");
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join("a.txt"), "").unwrap();
        fs::write(root.join("README"), "").unwrap();
        fs::write(root.join("sub/nested.txt"), "").unwrap();

        handle(&temp, "root").remove(true).unwrap();

        assert!(root.is_dir());
        assert!(!root.join("a.txt").exists());
        assert!(!root.join("README").exists());
        assert!(root.join("sub/nested.txt").exists());
    }

    #[test]
    fn test_remove_recursive() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("root");
        fs::create_dir_all(root.join("sub/deeper")).unwrap();
        fs::write(root.join("sub/deeper/x.bin"), "x").unwrap();

        handle(&temp, "root").remove(false).unwrap();
        assert!(!root.exists());
    }

    #[test]
    fn test_verbose_traces_steps() {
        let temp = TempDir::new().unwrap();
        let sink = Arc::new(MemorySink::new());
        let file = handle(&temp, "x/y.txt").with_sink(sink.clone());
        file.create().unwrap();
        file.remove(false).unwrap();

        let messages = sink.messages();
        assert!(messages.iter().any(|m| m.starts_with("Created file")));
        assert!(messages.iter().any(|m| m.starts_with("Removed file")));
    }

    #[test]
    #[cfg(unix)]
    fn test_remove_file_symlink_keeps_target() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("target.txt");
        fs::write(&target, "data").unwrap();
        std::os::unix::fs::symlink(&target, temp.path().join("link.txt")).unwrap();

        let link = handle(&temp, "link.txt");
        assert!(link.is_symlink());
        link.remove(false).unwrap();

        assert!(!temp.path().join("link.txt").exists());
        assert!(target.exists());
    }
}
