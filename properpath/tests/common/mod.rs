//! Common test utilities for integration tests.
//!
//! This module provides helper functions and fixture builders for testing
//! the properpath library.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use properpath::platform::UnixLayout;
use properpath::{MemorySink, PathHandle};

/// Creates a temporary directory for testing.
///
/// The directory will be automatically cleaned up when the returned
/// `TempDir` is dropped.
#[allow(dead_code)]
pub fn create_temp_dir() -> std::io::Result<tempfile::TempDir> {
    tempfile::tempdir()
}

/// A handle whose diagnostics land in the returned sink.
#[allow(dead_code)]
pub fn recorded_handle(path: impl AsRef<Path>) -> (PathHandle, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let handle = PathHandle::from_path(path)
        .unwrap()
        .with_sink(sink.clone());
    (handle, sink)
}

/// A path nothing can create, not even root: it sits below a regular file.
#[allow(dead_code)]
pub fn uncreatable_path(root: &Path, name: &str) -> PathBuf {
    let blocker = root.join("blocker.txt");
    if !blocker.exists() {
        fs::write(&blocker, "not a directory").unwrap();
    }
    blocker.join(name)
}

/// An XDG layout rooted at `home` with the given variables.
#[allow(dead_code)]
pub fn xdg_layout(home: &Path, vars: &[(&str, &str)]) -> UnixLayout {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    UnixLayout::new(Some(home.to_path_buf()), vars).with_uid(Some(1000))
}
