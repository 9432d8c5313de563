//! GraphQL [`Mutation`]s definitions.

use juniper::graphql_object;
use service::{command, Command as _};

use crate::{api, AsError, Context, Error};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Adds the `Listing` with the specified ID to the `Comparison` of the
    /// requesting client.
    ///
    /// Nothing changes if the `Listing` is already selected or the
    /// `Comparison` is full.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `CLIENT_ID_REQUIRED` - the `X-Client-Id` header is missing;
    /// - `INVALID_CLIENT_ID` - the `X-Client-Id` header is malformed.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "addToComparison",
            listing_id = %listing_id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn add_to_comparison(
        listing_id: api::listing::Id,
        ctx: &Context,
    ) -> Result<api::Comparison, Error> {
        let key = ctx.client_key()?;
        ctx.service()
            .execute(command::AddToComparison {
                key,
                listing_id: listing_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Removes the `Listing` with the specified ID from the `Comparison` of
    /// the requesting client.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `CLIENT_ID_REQUIRED` - the `X-Client-Id` header is missing;
    /// - `INVALID_CLIENT_ID` - the `X-Client-Id` header is malformed.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "removeFromComparison",
            listing_id = %listing_id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn remove_from_comparison(
        listing_id: api::listing::Id,
        ctx: &Context,
    ) -> Result<api::Comparison, Error> {
        let key = ctx.client_key()?;
        ctx.service()
            .execute(command::RemoveFromComparison {
                key,
                listing_id: listing_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Removes all the `Listing`s from the `Comparison` of the requesting
    /// client.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `CLIENT_ID_REQUIRED` - the `X-Client-Id` header is missing;
    /// - `INVALID_CLIENT_ID` - the `X-Client-Id` header is malformed.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "clearComparison",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn clear_comparison(
        ctx: &Context,
    ) -> Result<api::Comparison, Error> {
        let key = ctx.client_key()?;
        ctx.service()
            .execute(command::ClearComparison { key })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}
