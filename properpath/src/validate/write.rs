//! Write-permission validation over a list of candidate paths.

use std::fs::OpenOptions;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::Level;
use rand::Rng;

use crate::error::{CandidateFailure, Error, Result};
use crate::kind::Kind;
use crate::logging::{default_sink, ErrorSink};
use crate::path::{GuardedMutator, PathHandle};
use crate::validate::Validator;

/// Byte written and read back to prove a file is writable (ASCII ACK).
const MARKER_BYTE: u8 = 0x06;

const SCRATCH_NAME_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

#[derive(Debug, Clone)]
enum Candidate {
    Raw(PathBuf),
    Handle(PathHandle),
}

/// Finds the first candidate path that can be written to.
///
/// Candidates are tried strictly in order. For each one the validator:
///
/// 1. creates it if it is missing, according to its kind;
/// 2. checks that its filesystem has free space;
/// 3. writes a byte and reads it back, in a hidden temporary file for
///    directories or at the end of the file itself for files, then restores
///    the original length.
///
/// Existing file content is left untouched. Special files that swallow
/// writes, like `/dev/null`, fail the read-back and are skipped.
///
/// # Examples
///
/// ```no_run
/// use properpath::{PathWriteValidator, Validator};
///
/// let target = PathWriteValidator::new(["/mnt/usb/Downloads", "~/Downloads"])
///     .validate()
///     .unwrap();
/// println!("saving to {target}");
/// ```
#[derive(Debug, Clone)]
pub struct PathWriteValidator {
    candidates: Vec<Candidate>,
    retain_created_file: bool,
    sink: Arc<dyn ErrorSink>,
}

impl PathWriteValidator {
    /// Validate plain paths. `~` is expanded when the validator runs.
    #[must_use]
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            candidates: paths
                .into_iter()
                .map(|p| Candidate::Raw(p.as_ref().to_path_buf()))
                .collect(),
            retain_created_file: true,
            sink: default_sink(),
        }
    }

    /// Validate existing handles; each keeps its own kind and sink.
    #[must_use]
    pub fn from_handles(handles: impl IntoIterator<Item = PathHandle>) -> Self {
        Self {
            candidates: handles.into_iter().map(Candidate::Handle).collect(),
            retain_created_file: true,
            sink: default_sink(),
        }
    }

    /// Add a plain path to the end of the list.
    #[must_use]
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.candidates
            .push(Candidate::Raw(path.as_ref().to_path_buf()));
        self
    }

    /// Add a handle to the end of the list.
    #[must_use]
    pub fn with_handle(mut self, handle: PathHandle) -> Self {
        self.candidates.push(Candidate::Handle(handle));
        self
    }

    /// Whether a file the validator had to create is kept afterwards.
    ///
    /// Defaults to `true`. When `false`, a created file that is still empty
    /// after validation is removed again; created directories are kept.
    #[must_use]
    pub fn with_retain_created_file(mut self, retain: bool) -> Self {
        self.retain_created_file = retain;
        self
    }

    /// Sink for the validator's own messages and for handles it builds
    /// from plain paths.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn ErrorSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Number of candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether there are no candidates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    fn check_writable(&self, handle: &PathHandle) -> Result<()> {
        let kind = handle.kind();
        let created = if handle.exists() {
            false
        } else {
            handle.create()?;
            true
        };

        let dir = match kind {
            Kind::Dir => handle.as_path(),
            Kind::File => handle.as_path().parent().unwrap_or(handle.as_path()),
        };
        let free = fs2::available_space(dir).map_err(|e| Error::from_io(dir, e))?;
        if free == 0 {
            return Err(Error::Io {
                path: dir.to_path_buf(),
                source: io::Error::other("no space left on device"),
            });
        }

        match kind {
            Kind::Dir => {
                let scratch = handle
                    .join(scratch_file_name())?
                    .with_kind(Kind::File)
                    .with_verbose(false);
                let written = write_marker(&scratch);
                let cleaned = scratch.remove(false);
                written.and(cleaned)?;
            }
            Kind::File => {
                write_marker(handle)?;
                if created && !self.retain_created_file && handle.metadata()?.len() == 0 {
                    handle.remove(false)?;
                }
            }
        }
        Ok(())
    }
}

impl Validator for PathWriteValidator {
    fn validate(&self) -> Result<PathHandle> {
        let mut failures = Vec::new();

        for candidate in &self.candidates {
            let handle = match candidate {
                Candidate::Handle(handle) => handle.clone(),
                Candidate::Raw(path) => match PathHandle::from_path(path) {
                    Ok(handle) => handle.with_sink(Arc::clone(&self.sink)),
                    Err(e) => {
                        failures.push(CandidateFailure {
                            path: path.clone(),
                            reason: e.to_string(),
                            errno: None,
                        });
                        continue;
                    }
                },
            };

            match self.check_writable(&handle) {
                Ok(()) => {
                    self.sink
                        .log(Level::Debug, &format!("Validated writable path: {handle}"));
                    return Ok(handle);
                }
                Err(e) => failures.push(CandidateFailure {
                    path: handle.as_path().to_path_buf(),
                    reason: e.to_string(),
                    errno: e.raw_os_error(),
                }),
            }
        }

        let err = Error::ValidationExhausted { failures };
        self.sink.log(Level::Debug, &err.to_string());
        Err(err)
    }
}

/// `.tmp_` followed by 16 random lowercase alphanumerics.
fn scratch_file_name() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..16)
        .map(|_| SCRATCH_NAME_CHARSET[rng.gen_range(0..SCRATCH_NAME_CHARSET.len())] as char)
        .collect();
    format!(".tmp_{suffix}")
}

/// Append [`MARKER_BYTE`], read it back, then restore the original length.
fn write_marker(file: &PathHandle) -> Result<()> {
    let path = file.as_path();
    let io_err = |e| Error::from_io(path, e);

    let mut f = file.open(OpenOptions::new().read(true).write(true).create(true))?;
    let original_len = f.seek(SeekFrom::End(0)).map_err(io_err)?;
    f.write_all(&[MARKER_BYTE]).map_err(io_err)?;
    f.flush().map_err(io_err)?;

    f.seek(SeekFrom::Start(original_len)).map_err(io_err)?;
    let mut buf = [0u8; 1];
    let read = f.read(&mut buf).map_err(io_err)?;
    if read != 1 || buf[0] != MARKER_BYTE {
        return Err(Error::Io {
            path: path.to_path_buf(),
            source: io::Error::other("written byte could not be read back"),
        });
    }

    f.set_len(original_len).map_err(io_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scratch_file_name_shape() {
        let name = scratch_file_name();
        assert_eq!(name.len(), 5 + 16);
        assert!(name.starts_with(".tmp_"));
        assert!(name[5..]
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));
        assert_ne!(scratch_file_name(), scratch_file_name());
    }

    #[test]
    fn test_write_marker_preserves_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data.txt");
        fs::write(&path, "hello").unwrap();

        write_marker(&PathHandle::from_path(&path).unwrap()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    #[cfg(unix)]
    fn test_write_marker_rejects_dev_null() {
        let err = write_marker(&PathHandle::from_path("/dev/null").unwrap()).unwrap_err();
        assert!(err.to_string().contains("read back"));
    }

    #[test]
    fn test_directory_check_leaves_no_scratch_file() {
        let temp = TempDir::new().unwrap();
        let validated = PathWriteValidator::new([temp.path()]).validate().unwrap();
        assert_eq!(validated.as_path(), temp.path());
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_empty_candidate_list() {
        let validator = PathWriteValidator::new(Vec::<PathBuf>::new());
        assert!(validator.is_empty());
        let err = validator.validate().unwrap_err();
        assert!(matches!(err, Error::ValidationExhausted { ref failures } if failures.is_empty()));
    }

    #[test]
    fn test_unresolvable_candidate_is_skipped() {
        let temp = TempDir::new().unwrap();
        let validator = PathWriteValidator::new([Path::new("~nobody/x"), temp.path()]);
        assert_eq!(validator.len(), 2);
        assert_eq!(validator.validate().unwrap().as_path(), temp.path());
    }
}
