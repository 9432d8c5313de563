//! [`Command`] definition.

pub mod add_to_comparison;
pub mod clear_comparison;
pub mod remove_from_comparison;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    add_to_comparison::AddToComparison, clear_comparison::ClearComparison,
    remove_from_comparison::RemoveFromComparison,
};
