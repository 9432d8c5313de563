//! Listing [`Catalog`] implementations.

mod memory;

use std::io;

use derive_more::{Display, Error as StdError, From};

pub use self::memory::InMemory;

/// Source of [`Listing`]s exported by the upstream data-access layer.
///
/// [`Listing`]: crate::domain::Listing
pub use common::Handler as Catalog;

/// Operation of reloading a [`Catalog`] from its source.
#[derive(Clone, Copy, Debug)]
pub struct Reload;

/// [`Catalog`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Failed to read the source of a [`Catalog`].
    #[display("failed to read catalog source: {_0}")]
    Io(io::Error),

    /// Source of a [`Catalog`] is malformed.
    #[display("malformed catalog source: {_0}")]
    Json(serde_json::Error),
}
