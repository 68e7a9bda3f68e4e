//! Path validators.
//!
//! A [`Validator`] checks candidate paths against some requirement and hands
//! back the first one that meets it. [`PathWriteValidator`] is the one
//! shipped today: it finds a path that can actually be written to.

mod write;

use crate::error::Result;
use crate::path::PathHandle;

pub use write::PathWriteValidator;

/// A check that yields a usable path or an error explaining why none is.
pub trait Validator {
    /// Run the validation.
    ///
    /// # Errors
    ///
    /// Returns an error when no candidate passes.
    fn validate(&self) -> Result<PathHandle>;
}
