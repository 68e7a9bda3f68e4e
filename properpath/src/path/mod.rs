//! Path handles with kind inference and guarded mutation.
//!
//! # Key Concepts
//!
//! ## Normalization
//!
//! A [`PathHandle`] is built from segments that are joined, tilde-expanded
//! and made absolute (see [`normalize`]). Symlinks are preserved, except
//! that a `..` after a link is applied to the link's target, the way the OS
//! resolves it.
//!
//! ## Kind
//!
//! Every handle has a [`Kind`](crate::Kind). Until the caller pins one it is
//! inferred from the filesystem, or from the file extension when the path
//! does not exist yet. A pinned kind is the *expected* kind and the
//! [`GuardedMutator`] operations refuse to act when the filesystem disagrees.
//!
//! # Examples
//!
//! ```no_run
//! use properpath::{GuardedMutator, Kind, PathHandle};
//!
//! let log = PathHandle::new(["~", ".myapp", "app.log"]).unwrap();
//! log.create().unwrap(); // creates ~/.myapp and an empty app.log
//!
//! let cache = PathHandle::new(["~", ".myapp", "cache"]).unwrap().with_kind(Kind::Dir);
//! cache.remove(true).unwrap(); // clears the files, keeps subdirectories
//! ```

mod handle;
mod mutate;
pub mod normalize;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use handle::PathHandle;
pub use mutate::GuardedMutator;
