//! [`Comparison`]-related definitions.

use derive_more::{From, Into};
use juniper::graphql_object;
use service::{domain::comparison::Selection, query, Query as _};

use crate::{api, AsError, Context, Error};

/// Listings selected by a client for a side-by-side comparison.
#[derive(Clone, Debug, From, Into)]
pub struct Comparison(Selection);

/// Listings selected by a client for a side-by-side comparison.
#[graphql_object(context = Context)]
impl Comparison {
    /// IDs of the selected `Listing`s in their selection order.
    #[must_use]
    pub fn items(&self) -> Vec<api::listing::Id> {
        self.0.items().iter().copied().map(Into::into).collect()
    }

    /// Number of the selected `Listing`s.
    #[must_use]
    pub fn count(&self) -> i32 {
        i32::try_from(self.0.count()).unwrap_or(i32::MAX)
    }

    /// Maximum number of `Listing`s compared at once.
    #[must_use]
    pub fn max_items(&self) -> i32 {
        i32::try_from(self.0.max_items()).unwrap_or(i32::MAX)
    }

    /// Indicator whether no more `Listing`s can be selected.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.0.is_full()
    }

    /// Selected `Listing`s still present in the catalog, in their selection
    /// order.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Comparison.listings",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn listings(
        &self,
        ctx: &Context,
    ) -> Result<Vec<api::Listing>, Error> {
        ctx.service()
            .execute(query::listings::ByIds::by(self.0.items().to_vec()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|ls| ls.into_iter().map(Into::into).collect())
    }
}
