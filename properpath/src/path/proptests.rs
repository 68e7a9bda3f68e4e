//! Property-based tests for path handles.
//!
//! Note: The normalize module's unit tests cover fixed inputs; this module
//! checks invariants over generated paths.

use super::normalize::normalize;
use super::{GuardedMutator, PathHandle};
use crate::kind::Kind;
use proptest::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn path_component_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_-]{1,20}"
}

fn absolute_path_strategy() -> impl Strategy<Value = PathBuf> {
    prop::collection::vec(path_component_strategy(), 1..8).prop_map(|parts| {
        let mut path = PathBuf::from("/");
        for part in parts {
            path.push(part);
        }
        path
    })
}

fn relative_name_strategy() -> impl Strategy<Value = (Vec<String>, Option<String>)> {
    (
        prop::collection::vec(path_component_strategy(), 1..4),
        prop::option::of("[a-z]{1,4}"),
    )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    // Normalization is idempotent: normalize(normalize(p)) == normalize(p)
    #[test]
    fn path_normalization_idempotent(path in absolute_path_strategy()) {
        if let Ok(normalized_once) = normalize(&path) {
            if let Ok(normalized_twice) = normalize(&normalized_once) {
                prop_assert_eq!(normalized_once, normalized_twice);
            }
        }
    }

    // Handles built from segments equal handles built from the joined path
    #[test]
    fn segments_and_joined_path_agree(path in absolute_path_strategy()) {
        let segments: Vec<_> = path.iter().collect();
        let from_segments = PathHandle::new(segments).unwrap();
        let from_path = PathHandle::from_path(&path).unwrap();
        prop_assert_eq!(from_segments, from_path);
    }

    // Missing paths are files exactly when they carry an extension
    #[test]
    fn missing_path_kind_follows_extension((parts, ext) in relative_name_strategy()) {
        let temp = TempDir::new().unwrap();
        let mut path = temp.path().join(parts.join("/"));
        if let Some(ext) = &ext {
            path.set_extension(ext);
        }
        let handle = PathHandle::from_path(&path).unwrap();
        let expected = if ext.is_some() { Kind::File } else { Kind::Dir };
        prop_assert_eq!(handle.kind(), expected);
    }

    // After create(), inference agrees with the kind that was created
    #[test]
    fn created_entries_match_inferred_kind((parts, ext) in relative_name_strategy(), pin_dir in any::<bool>()) {
        let temp = TempDir::new().unwrap();
        let mut path = temp.path().join(parts.join("/"));
        if let Some(ext) = &ext {
            path.set_extension(ext);
        }
        let mut handle = PathHandle::from_path(&path).unwrap().with_verbose(false);
        if pin_dir {
            handle.set_kind(Some(Kind::Dir));
        }
        let wanted = handle.kind();

        handle.create().unwrap();
        handle.create().unwrap();

        handle.set_kind(None);
        prop_assert_eq!(handle.kind(), wanted);
    }
}
