//! [`Command`] for adding a [`Listing`] to a comparison [`Selection`].

use common::operations::{By, Delete, Insert, Select};
use tracerr::Traced;
use tracing as log;

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

/// [`Command`] for adding a [`Listing`] to a comparison [`Selection`].
///
/// Adding an already selected [`Listing`], or adding to a full
/// [`Selection`], leaves it unchanged.
#[derive(Clone, Debug)]
pub struct AddToComparison {
    /// [`comparison::Key`] of the client.
    pub key: comparison::Key,

    /// ID of the [`Listing`] to add.
    pub listing_id: listing::Id,
}

impl<Cat, St> Command<AddToComparison> for Service<Cat, St>
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
        cmd: AddToComparison,
    ) -> Result<Self::Ok, Self::Err> {
        let AddToComparison { key, listing_id } = cmd;

        self.change_comparison(key, |s| {
            let added = s.add(listing_id);
            if !added && s.is_full() && !s.contains(listing_id) {
                log::debug!(
                    "comparison is full, `Listing(id: {listing_id})` skipped",
                );
            }
            added
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

/// Error of [`AddToComparison`] [`Command`] execution.
pub type ExecutionError = Traced<storage::Error>;

#[cfg(test)]
mod spec {
    use crate::{
        domain::{comparison::Key, listing},
        infra::{catalog, storage},
        Command as _, Config, Service,
    };

    use super::AddToComparison;

    fn service() -> Service<catalog::InMemory, storage::InMemory> {
        Service::new(
            Config {
                comparison_max_items: 2,
                ..Config::default()
            },
            catalog::InMemory::new([]),
            storage::InMemory::new(),
        )
        .0
    }

    #[tokio::test]
    async fn adds_until_full() {
        let svc = service();
        let key = Key::for_client("buyer").unwrap();
        let ids = [listing::Id::new(), listing::Id::new(), listing::Id::new()];

        for id in ids {
            _ = svc
                .execute(AddToComparison {
                    key: key.clone(),
                    listing_id: id,
                })
                .await
                .unwrap();
        }
        let selection = svc
            .execute(AddToComparison {
                key,
                listing_id: ids[0],
            })
            .await
            .unwrap();

        assert_eq!(selection.items(), &ids[..2]);
        assert!(selection.is_full());
    }

    #[tokio::test]
    async fn keeps_clients_apart() {
        let svc = service();
        let id = listing::Id::new();

        let first = svc
            .execute(AddToComparison {
                key: Key::for_client("first").unwrap(),
                listing_id: id,
            })
            .await
            .unwrap();
        let second = svc
            .execute(AddToComparison {
                key: Key::for_client("second").unwrap(),
                listing_id: listing::Id::new(),
            })
            .await
            .unwrap();

        assert!(first.contains(id));
        assert!(!second.contains(id));
    }
}
