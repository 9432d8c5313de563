//! [`Query`] collection related to the multiple [`Listing`]s.

use std::sync::Arc;

use common::{
    operations::{By, Select},
    Page, Pagination,
};
use smart_default::SmartDefault;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{listing, Listing},
    infra::{catalog, Catalog},
    read::listing::{Filter, SearchParams, Sort},
    Service,
};

use super::{CatalogQuery, Query};

/// Queries [`Listing`]s by their [`listing::Id`]s, preserving the order of
/// the provided IDs and skipping unknown ones.
pub type ByIds = CatalogQuery<By<Vec<Listing>, Vec<listing::Id>>>;

/// [`Search`] configuration.
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// Number of [`Listing`]s on a page, if not requested explicitly.
    #[default(20)]
    pub default_per_page: usize,

    /// Maximum number of [`Listing`]s on a page.
    #[default(100)]
    pub max_per_page: usize,
}

/// Searches publicly visible [`Listing`]s.
#[derive(Clone, Debug, Default)]
pub struct Search {
    /// [`Filter`] the [`Listing`]s should match.
    pub filter: Filter,

    /// [`Sort`] order of the found [`Listing`]s.
    pub sort: Sort,

    /// 1-based number of the requested page.
    pub page: Option<usize>,

    /// Requested number of [`Listing`]s on a page.
    pub per_page: Option<usize>,
}

impl From<SearchParams> for Search {
    fn from(params: SearchParams) -> Self {
        let SearchParams { filter, sort, page } = params;
        Self {
            filter,
            sort,
            page,
            per_page: None,
        }
    }
}

impl<Cat, St> Query<Search> for Service<Cat, St>
where
    Cat: Catalog<
        Select<By<Arc<[Listing]>, ()>>,
        Ok = Arc<[Listing]>,
        Err = Traced<catalog::Error>,
    >,
{
    type Ok = Page<Listing>;
    type Err = Traced<catalog::Error>;

    async fn execute(&self, search: Search) -> Result<Self::Ok, Self::Err> {
        let Search {
            filter,
            sort,
            page,
            per_page,
        } = search;
        let config = self.config();

        let snapshot = self
            .catalog()
            .execute(Select(By::new(())))
            .await
            .map_err(tracerr::wrap!())?;

        let predicate = filter.predicate(&config.countries);
        let mut found = snapshot
            .iter()
            .filter(|l| l.is_public() && predicate.matches(l))
            .cloned()
            .collect::<Vec<_>>();
        sort.apply(&mut found);
        log::debug!(
            "found {} of {} listings sorted by `{sort}`",
            found.len(),
            snapshot.len(),
        );

        Ok(Pagination::new(
            page,
            per_page,
            config.search.default_per_page,
            config.search.max_per_page,
        )
        .paginate(found))
    }
}
