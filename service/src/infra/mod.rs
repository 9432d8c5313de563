//! Infrastructure layer.

pub mod catalog;
pub mod storage;

pub use self::{catalog::Catalog, storage::Storage};
