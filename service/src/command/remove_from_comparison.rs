//! [`Command`] for removing a [`Listing`] from a comparison [`Selection`].

use common::operations::{By, Delete, Insert, Select};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Listing;
use crate::{
    domain::{
        comparison::{self, Selection},
        listing,
    },
    infra::{storage, Storage},
    Service,
};

use super::Command;

/// [`Command`] for removing a [`Listing`] from a comparison [`Selection`].
#[derive(Clone, Debug)]
pub struct RemoveFromComparison {
    /// [`comparison::Key`] of the client.
    pub key: comparison::Key,

    /// ID of the [`Listing`] to remove.
    pub listing_id: listing::Id,
}

impl<Cat, St> Command<RemoveFromComparison> for Service<Cat, St>
where
    St: Storage<
            Select<By<Option<Selection>, comparison::Key>>,
            Ok = Option<Selection>,
            Err = Traced<storage::Error>,
        > + Storage<
            Insert<(comparison::Key, Selection)>,
            Ok = (),
            Err = Traced<storage::Error>,
        > + Storage<
            Delete<By<Selection, comparison::Key>>,
            Ok = (),
            Err = Traced<storage::Error>,
        >,
{
    type Ok = Selection;
    type Err = ExecutionError;

    async fn execute(
        &self,
        cmd: RemoveFromComparison,
    ) -> Result<Self::Ok, Self::Err> {
        let RemoveFromComparison { key, listing_id } = cmd;

        self.change_comparison(key, |s| s.remove(listing_id))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`RemoveFromComparison`] [`Command`] execution.
pub type ExecutionError = Traced<storage::Error>;
