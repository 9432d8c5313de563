//! [`Query`] collection related to a comparison [`Selection`].

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::comparison::{self, Selection},
    infra::{storage, Storage},
    Service,
};

use super::Query;

/// Queries the current comparison [`Selection`] of a client.
#[derive(Clone, Debug)]
pub struct Current {
    /// [`comparison::Key`] of the client.
    pub key: comparison::Key,
}

impl<Cat, St> Query<Current> for Service<Cat, St>
where
    St: Storage<
            Select<By<Option<Selection>, comparison::Key>>,
            Ok = Option<Selection>,
            Err = Traced<storage::Error>,
        >,
{
    type Ok = Selection;
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        Current { key }: Current,
    ) -> Result<Self::Ok, Self::Err> {
        self.current_comparison(&key)
            .await
            .map_err(tracerr::wrap!())
    }
}
