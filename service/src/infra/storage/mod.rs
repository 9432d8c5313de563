//! Comparison [`Storage`] implementations.
//!
//! A [`Storage`] persists a client's [`Selection`] as an opaque JSON blob
//! under its [`Key`], the way a browser keeps it in its local storage.
//!
//! [`Key`]: crate::domain::comparison::Key
//! [`Selection`]: crate::domain::comparison::Selection

#[cfg(feature = "files")]
mod files;
mod memory;

use std::io;

use derive_more::{Display, Error as StdError, From};

#[cfg(feature = "files")]
pub use self::files::Files;
pub use self::memory::InMemory;

/// Persistence adapter of comparison selections.
pub use common::Handler as Storage;

/// [`Storage`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// I/O operation failed.
    #[display("storage I/O failed: {_0}")]
    Io(io::Error),

    /// Stored blob is malformed.
    #[display("malformed stored selection: {_0}")]
    Json(serde_json::Error),
}

impl Error {
    /// Indicates whether this [`Error`] is caused by a malformed blob, rather
    /// than by the [`Storage`] itself.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Json(_))
    }
}
