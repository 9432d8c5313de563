//! Application provides API for interacting with the [`Service`].

#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod api;
pub mod args;
pub mod config;
mod context;
pub mod error;
pub mod rest;

use std::sync::Arc;

use axum::{
    response::{IntoResponse, Response},
    Extension, Json,
};
use derive_more::Debug;
use juniper::{http::GraphQLBatchResponse, DefaultScalarValue, ScalarValue};
use juniper_axum::extract::JuniperRequest;
// Used in binary.
use axum_client_ip as _;
use futures as _;
use tokio as _;
use tower_http as _;
use tracing_subscriber as _;

pub use self::{
    args::Args,
    config::Config,
    context::{Context, CLIENT_ID_HEADER},
    error::{AsError, Error},
};

/// [`Service`] with filled infrastructure dependencies.
///
/// [`Service`]: service::Service
pub type Service = service::Service<
    service::infra::catalog::InMemory,
    service::infra::storage::Files,
>;

/// [`juniper`] GraphQL response.
#[derive(Debug)]
pub struct JuniperResponse<S = DefaultScalarValue>
where
    S: ScalarValue,
{
    /// Status code of the response.
    pub status_code: http::StatusCode,

    /// Underlying GraphQL response.
    #[debug(skip)]
    pub response: GraphQLBatchResponse<S>,
}

impl<S> IntoResponse for JuniperResponse<S>
where
    S: ScalarValue,
{
    fn into_response(self) -> Response {
        let Self {
            status_code,
            response,
        } = self;

        if response.is_ok() {
            Json(response).into_response()
        } else {
            (status_code, Json(response)).into_response()
        }
    }
}

/// GraphQL API handler.
pub async fn graphql(
    Extension(schema): Extension<Arc<api::Schema>>,
    context: Context,
    JuniperRequest(gql_request): JuniperRequest,
) -> JuniperResponse {
    JuniperResponse {
        status_code: context.error_status_code(),
        response: gql_request.execute(&*schema, &context).await,
    }
}

#[cfg(test)]
mod spec {
    use juniper::{graphql_value, Variables};
    use service::infra::{catalog, storage};

    use crate::{api, Context, Service};

    fn context(client_id: Option<&str>) -> Context {
        let dir = std::env::temp_dir().join(format!(
            "graphql-test-{}-{}",
            std::process::id(),
            client_id.unwrap_or("anonymous"),
        ));
        let (service, _) = Service::new(
            service::Config::default(),
            catalog::InMemory::new([]),
            storage::Files::new(dir),
        );
        let mut headers = http::HeaderMap::new();
        if let Some(id) = client_id {
            _ = headers.insert(crate::CLIENT_ID_HEADER, id.parse().unwrap());
        }
        Context::new(service, &headers)
    }

    #[tokio::test]
    async fn resolves_plans() {
        let (res, errs) = juniper::execute(
            r#"{
                plan(slug: "starter") {
                    slug
                    features { maxActiveListings apiAccess }
                    allows(feature: STATISTICS)
                }
            }"#,
            None,
            &api::schema(),
            &Variables::new(),
            &context(None),
        )
        .await
        .unwrap();

        assert!(errs.is_empty());
        assert_eq!(
            res,
            graphql_value!({
                "plan": {
                    "slug": "starter",
                    "features": {
                        "maxActiveListings": 10,
                        "apiAccess": false,
                    },
                    "allows": true,
                },
            }),
        );
    }

    #[tokio::test]
    async fn rejects_unknown_plan() {
        let (_, errs) = juniper::execute(
            r#"{ plan(slug: "platinum") { slug } }"#,
            None,
            &api::schema(),
            &Variables::new(),
            &context(None),
        )
        .await
        .unwrap();

        assert_eq!(errs.len(), 1);
        assert_eq!(
            errs[0].error().message(),
            "`Plan` with the specified slug does not exist",
        );
    }

    #[tokio::test]
    async fn requires_client_id_for_comparison() {
        let ctx = context(None);

        let (_, errs) = juniper::execute(
            "{ comparison { count } }",
            None,
            &api::schema(),
            &Variables::new(),
            &ctx,
        )
        .await
        .unwrap();

        assert_eq!(errs.len(), 1);
        assert_eq!(ctx.error_status_code(), http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn clears_comparison_of_client() {
        let (res, errs) = juniper::execute(
            "mutation { clearComparison { count maxItems isFull } }",
            None,
            &api::schema(),
            &Variables::new(),
            &context(Some("test-client")),
        )
        .await
        .unwrap();

        assert!(errs.is_empty());
        assert_eq!(
            res,
            graphql_value!({
                "clearComparison": {
                    "count": 0,
                    "maxItems": 4,
                    "isFull": false,
                },
            }),
        );
    }
}
