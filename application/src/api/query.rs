//! GraphQL [`Query`]s definitions.

use std::str::FromStr as _;

use juniper::graphql_object;
use service::{domain, query, read, Query as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Searches the publicly visible `Listing`s.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `OUT_OF_RANGE` - a numeric argument is negative or too large.
    #[tracing::instrument(
        skip_all,
        fields(
            filter = ?filter,
            gql.name = "listings",
            otel.name = Self::SPAN_NAME,
            page = ?page,
            per_page = ?per_page,
            sort = ?sort,
        ),
    )]
    pub async fn listings(
        filter: Option<api::listing::Filter>,
        sort: Option<api::listing::Sort>,
        page: Option<i32>,
        per_page: Option<i32>,
        ctx: &Context,
    ) -> Result<api::listing::list::Page, Error> {
        let params = read::listing::SearchParams {
            filter: filter
                .unwrap_or_default()
                .try_into()
                .map_err(AsError::into_error)
                .map_err(ctx.error())?,
            sort: sort.map(Into::into).unwrap_or_default(),
            page: page
                .map(usize::try_from)
                .transpose()
                .map_err(AsError::into_error)
                .map_err(ctx.error())?,
        };
        let per_page = per_page
            .map(usize::try_from)
            .transpose()
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        let found = ctx
            .service()
            .execute(query::listings::Search {
                per_page,
                ..params.clone().into()
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        Ok(api::listing::list::Page::new(found, params))
    }

    /// Returns the publicly visible `Listing` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LISTING_NOT_EXISTS` - the `Listing` with the specified ID does not
    ///                          exist or is not publicly visible.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "listing",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn listing(
        id: api::listing::Id,
        ctx: &Context,
    ) -> Result<api::Listing, Error> {
        ctx.service()
            .execute(query::listing::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .filter(domain::Listing::is_public)
            .ok_or_else(|| ListingError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Comparison` of the requesting client.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `CLIENT_ID_REQUIRED` - the `X-Client-Id` header is missing;
    /// - `INVALID_CLIENT_ID` - the `X-Client-Id` header is malformed.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "comparison",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn comparison(ctx: &Context) -> Result<api::Comparison, Error> {
        let key = ctx.client_key()?;
        ctx.service()
            .execute(query::comparison::Current { key })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Plan` with the specified slug.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PLAN_NOT_EXISTS` - the `Plan` with the specified slug does not
    ///                       exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "plan",
            otel.name = Self::SPAN_NAME,
            slug = %slug,
        ),
    )]
    pub fn plan(slug: String, ctx: &Context) -> Result<api::Plan, Error> {
        domain::Plan::from_str(slug.trim())
            .map(Into::into)
            .map_err(|_| PlanError::NotExists.into())
            .map_err(ctx.error())
    }

    /// Returns all the available `Plan`s, from the cheapest one.
    #[must_use]
    pub fn plans() -> Vec<api::Plan> {
        domain::Plan::iter().map(Into::into).collect()
    }
}

define_error! {
    enum ListingError {
        #[code = "LISTING_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Listing` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum PlanError {
        #[code = "PLAN_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Plan` with the specified slug does not exist"]
        NotExists,
    }
}
