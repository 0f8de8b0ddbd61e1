//! Error types for [`SearchTree`](crate::SearchTree) accesses
//!
//! Nearly every operation on the tree is total: inserting always succeeds, and removing or
//! finding a key that isn't present simply reports that nothing was there. The one exception is
//! indexed access ([`at`] / [`at_mut`]), which is expected to name a key that *is* present and
//! reports a missing key as an [`Error`] rather than inventing a default value.
//!
//! [`at`]: crate::SearchTree::at
//! [`at_mut`]: crate::SearchTree::at_mut

use thiserror::Error;

/// Errors that can be returned by [`SearchTree`](crate::SearchTree) accessors
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Error {
    /// Indexed access named a key that has no entry in the tree
    ///
    /// The tree is never modified by a failed access, so the caller may freely retry after
    /// inserting the key.
    #[error("key not found in tree")]
    KeyNotFound,
}

/// A `Result` type alias using this crate's [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
