//! [`Command`] for clearing a comparison [`Selection`].

use common::operations::{By, Delete, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::comparison::{self, Selection},
    infra::{storage, Storage},
    Service,
};

use super::Command;

/// [`Command`] for clearing a comparison [`Selection`].
#[derive(Clone, Debug)]
pub struct ClearComparison {
    /// [`comparison::Key`] of the client.
    pub key: comparison::Key,
}

impl<Cat, St> Command<ClearComparison> for Service<Cat, St>
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
        ClearComparison { key }: ClearComparison,
    ) -> Result<Self::Ok, Self::Err> {
        self.change_comparison(key, Selection::clear)
            .await
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`ClearComparison`] [`Command`] execution.
pub type ExecutionError = Traced<storage::Error>;

#[cfg(test)]
mod spec {
    use crate::{
        command::AddToComparison,
        domain::{comparison::Key, listing},
        infra::{catalog, storage},
        Command as _, Config, Service,
    };

    use super::ClearComparison;

    #[tokio::test]
    async fn clears_and_forgets_persisted_selection() {
        let storage = storage::InMemory::new();
        let (svc, _) = Service::new(
            Config::default(),
            catalog::InMemory::new([]),
            storage.clone(),
        );
        let key = Key::for_client("buyer").unwrap();
        _ = svc
            .execute(AddToComparison {
                key: key.clone(),
                listing_id: listing::Id::new(),
            })
            .await
            .unwrap();

        let selection = svc
            .execute(ClearComparison { key: key.clone() })
            .await
            .unwrap();

        assert!(selection.is_empty());
        assert_eq!(storage.get_raw(&key).await, None);
    }
}
