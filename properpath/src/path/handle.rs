//! The [`PathHandle`] value type.

use std::fmt;
use std::fs::{self, File, Metadata, OpenOptions};
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::Level;

use crate::error::{Error, Result};
use crate::kind::Kind;
use crate::logging::{default_sink, ErrorSink};
use crate::path::normalize::{join_segments, normalize};

/// An absolute filesystem path that knows whether it is a file or a directory.
///
/// A handle is built from one or more segments; `~` is expanded and the
/// result is made absolute, with `.` and `..` resolved the way the OS would
/// (see [`normalize`](crate::path::normalize::resolve_components)). The
/// original segments are kept for diagnostics.
///
/// The kind is inferred from the filesystem on every [`kind`](Self::kind)
/// call until the caller pins one with [`with_kind`](Self::with_kind) or
/// [`set_kind`](Self::set_kind). A pinned kind is what
/// [`create`](crate::GuardedMutator::create) and
/// [`remove`](crate::GuardedMutator::remove) expect to find.
///
/// `PathHandle` derefs to [`Path`], so `exists`, `is_symlink`, `extension`,
/// `metadata` and the rest of the std API work unchanged. Two handles are
/// equal when their resolved paths are.
///
/// # Examples
///
/// ```
/// use properpath::{Kind, PathHandle};
///
/// let downloads = PathHandle::new(["~", "Downloads"]).unwrap();
/// assert!(downloads.is_absolute());
/// assert_eq!(downloads.actual().len(), 2);
///
/// let notes = PathHandle::from_path("/tmp/notes").unwrap().with_kind(Kind::File);
/// assert_eq!(notes.kind(), Kind::File);
/// ```
#[derive(Clone)]
pub struct PathHandle {
    path: PathBuf,
    actual: Vec<PathBuf>,
    expected: Option<Kind>,
    sink: Arc<dyn ErrorSink>,
    verbose: bool,
}

impl PathHandle {
    /// Build a handle from path segments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if the joined path uses `~user` syntax,
    /// the home or current directory cannot be determined, or `..`
    /// components escape the root.
    pub fn new<I, S>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        let actual: Vec<PathBuf> = segments
            .into_iter()
            .map(|s| s.as_ref().to_path_buf())
            .collect();
        let path = normalize(&join_segments(&actual))?;
        Ok(Self {
            path,
            actual,
            expected: None,
            sink: default_sink(),
            verbose: true,
        })
    }

    /// Build a handle from a single path.
    ///
    /// # Errors
    ///
    /// See [`PathHandle::new`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::new([path])
    }

    /// Pin the expected kind.
    #[must_use]
    pub fn with_kind(mut self, kind: Kind) -> Self {
        self.expected = Some(kind);
        self
    }

    /// Route diagnostics to `sink` instead of the default sink.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn ErrorSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Enable or disable debug traces of successful create/remove steps.
    ///
    /// Failures are reported regardless.
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Pin the expected kind, or pass `None` to go back to inference.
    pub fn set_kind(&mut self, kind: Option<Kind>) {
        self.expected = kind;
    }

    /// Like [`set_kind`](Self::set_kind), parsing `"file"` or `"dir"`
    /// case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKind`] for any other value; the kind is left
    /// unchanged.
    pub fn set_kind_str(&mut self, kind: Option<&str>) -> Result<()> {
        self.expected = kind.map(str::parse::<Kind>).transpose()?;
        Ok(())
    }

    /// Replace the error sink.
    pub fn set_sink(&mut self, sink: Arc<dyn ErrorSink>) {
        self.sink = sink;
    }

    /// The resolved absolute path.
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// The segments this handle was built from, unexpanded.
    #[must_use]
    pub fn actual(&self) -> &[PathBuf] {
        &self.actual
    }

    /// The kind: the pinned one if any, otherwise inferred right now.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.expected.unwrap_or_else(|| Kind::infer(&self.path))
    }

    /// The kind pinned by the caller, if any.
    #[must_use]
    pub fn expected_kind(&self) -> Option<Kind> {
        self.expected
    }

    /// The sink diagnostics go to.
    #[must_use]
    pub fn sink(&self) -> &Arc<dyn ErrorSink> {
        &self.sink
    }

    /// Whether successful steps are traced.
    #[must_use]
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// A new handle for `self / segment`, sharing this handle's sink.
    ///
    /// The child's kind is inferred.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if `..` components escape the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use properpath::PathHandle;
    ///
    /// let base = PathHandle::from_path("/var/lib").unwrap();
    /// let child = base.join("app/state.json").unwrap();
    /// assert_eq!(child.as_path(), std::path::Path::new("/var/lib/app/state.json"));
    /// ```
    pub fn join(&self, segment: impl AsRef<Path>) -> Result<Self> {
        let joined = self.path.join(segment);
        Ok(self.derive(normalize(&joined)?))
    }

    /// The parent directory as a handle sharing this handle's sink.
    ///
    /// Returns `None` at the filesystem root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.path
            .parent()
            .map(|parent| self.derive(parent.to_path_buf()))
    }

    /// Query metadata, following symlinks.
    ///
    /// # Errors
    ///
    /// Returns the OS error (reported to the sink first).
    pub fn metadata(&self) -> Result<Metadata> {
        fs::metadata(&self.path).map_err(|e| self.report("stat", Error::from_io(&self.path, e)))
    }

    /// Open the path with `options`.
    ///
    /// # Errors
    ///
    /// Returns the OS error (reported to the sink first).
    pub fn open(&self, options: &OpenOptions) -> Result<File> {
        options
            .open(&self.path)
            .map_err(|e| self.report("open", Error::from_io(&self.path, e)))
    }

    fn derive(&self, path: PathBuf) -> Self {
        Self {
            actual: vec![path.clone()],
            path,
            expected: None,
            sink: Arc::clone(&self.sink),
            verbose: self.verbose,
        }
    }

    /// `PATH=<resolved>`, plus `from SOURCE=<segments>` when they differ.
    pub(crate) fn describe(&self) -> String {
        let source = join_segments(&self.actual);
        if source == self.path {
            format!("PATH={}", self.path.display())
        } else {
            format!(
                "PATH={} from SOURCE={}",
                self.path.display(),
                source.display()
            )
        }
    }

    /// Send `err` to the sink at debug level and hand it back.
    pub(crate) fn report(&self, action: &str, err: Error) -> Error {
        self.sink.log(
            Level::Debug,
            &format!("Could not {action} {}. Error: {err}", self.describe()),
        );
        err
    }

    pub(crate) fn trace(&self, message: impl FnOnce() -> String) {
        if self.verbose {
            self.sink.log(Level::Debug, &message());
        }
    }
}

impl fmt::Debug for PathHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathHandle")
            .field("path", &self.path)
            .field("actual", &self.actual)
            .field("kind", &self.kind())
            .field("exists", &self.path.exists())
            .field("sink", &self.sink)
            .finish()
    }
}

impl fmt::Display for PathHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl PartialEq for PathHandle {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for PathHandle {}

impl Hash for PathHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl Deref for PathHandle {
    type Target = Path;

    fn deref(&self) -> &Path {
        &self.path
    }
}

impl AsRef<Path> for PathHandle {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

impl From<PathHandle> for PathBuf {
    fn from(handle: PathHandle) -> Self {
        handle.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::MemorySink;
    use std::collections::HashSet;
    use tempfile::TempDir;

    #[test]
    fn test_new_keeps_actual_segments() {
        let home = home::home_dir().unwrap();
        let handle = PathHandle::new(["~", "Downloads"]).unwrap();
        assert_eq!(handle.as_path(), home.join("Downloads"));
        assert_eq!(
            handle.actual(),
            &[PathBuf::from("~"), PathBuf::from("Downloads")]
        );
    }

    #[test]
    fn test_new_rejects_tilde_user() {
        let err = PathHandle::new(["~nobody", "x"]).unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));
    }

    #[test]
    fn test_kind_inference_tracks_filesystem() {
        let temp = TempDir::new().unwrap();
        let handle = PathHandle::new([temp.path(), Path::new("data")]).unwrap();
        assert_eq!(handle.kind(), Kind::Dir);

        fs::write(handle.as_path(), "now a file").unwrap();
        assert_eq!(handle.kind(), Kind::File);
        assert_eq!(handle.expected_kind(), None);
    }

    #[test]
    fn test_pinned_kind_is_never_overwritten() {
        let temp = TempDir::new().unwrap();
        let mut handle = PathHandle::from_path(temp.path()).unwrap().with_kind(Kind::File);
        assert_eq!(handle.kind(), Kind::File);

        handle.set_kind(None);
        assert_eq!(handle.kind(), Kind::Dir);
    }

    #[test]
    fn test_set_kind_str() {
        let mut handle = PathHandle::from_path("/tmp/x").unwrap();
        handle.set_kind_str(Some("FILE")).unwrap();
        assert_eq!(handle.expected_kind(), Some(Kind::File));

        assert!(handle.set_kind_str(Some("folder")).is_err());
        assert_eq!(handle.expected_kind(), Some(Kind::File));

        handle.set_kind_str(None).unwrap();
        assert_eq!(handle.expected_kind(), None);
    }

    #[test]
    fn test_join_and_parent_share_sink() {
        let sink: Arc<dyn ErrorSink> = Arc::new(MemorySink::new());
        let base = PathHandle::from_path("/srv")
            .unwrap()
            .with_sink(Arc::clone(&sink))
            .with_kind(Kind::Dir);

        let child = base.join("www/../app.log").unwrap();
        assert_eq!(child.as_path(), Path::new("/srv/app.log"));
        assert!(Arc::ptr_eq(child.sink(), &sink));
        assert_eq!(child.expected_kind(), None);

        let parent = child.parent().unwrap();
        assert_eq!(parent, base);
        assert!(PathHandle::from_path("/").unwrap().parent().is_none());
    }

    #[test]
    fn test_equality_and_hash_use_resolved_path() {
        let a = PathHandle::new(["/srv", "app"]).unwrap();
        let b = PathHandle::from_path("/srv/./app").unwrap().with_kind(Kind::File);
        assert_eq!(a, b);

        let set: HashSet<PathHandle> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_describe_mentions_source_when_different() {
        let handle = PathHandle::new(["~", "x"]).unwrap();
        assert!(handle.describe().contains("from SOURCE=~"));

        let plain = PathHandle::from_path("/srv/app").unwrap();
        assert_eq!(plain.describe(), "PATH=/srv/app");
    }

    #[test]
    fn test_open_failure_is_reported_once() {
        let temp = TempDir::new().unwrap();
        let sink = Arc::new(MemorySink::new());
        let handle = PathHandle::new([temp.path(), Path::new("missing.txt")])
            .unwrap()
            .with_sink(sink.clone());

        let err = handle.open(OpenOptions::new().read(true)).unwrap_err();
        assert!(err.is_not_found());
        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0, Level::Debug);
        assert!(records[0].1.starts_with("Could not open"));
    }

    #[test]
    fn test_debug_is_information_rich() {
        let handle = PathHandle::from_path("/srv/report.pdf").unwrap();
        let debug = format!("{handle:?}");
        assert!(debug.contains("path"));
        assert!(debug.contains("actual"));
        assert!(debug.contains("kind: File"));
        assert!(debug.contains("exists"));
        assert!(debug.contains("LogSink"));
        assert_eq!(handle.to_string(), "/srv/report.pdf");
    }
}
