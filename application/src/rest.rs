//! Plain HTTP endpoints.

use axum::{extract::RawQuery, Extension, Json};
use serde::Serialize;
use service::{
    domain::Listing,
    query,
    read::listing::{query_string, SearchParams},
    Query as _,
};
use tracing as log;

use crate::{AsError, Error, Service};

/// Page of [`Listing`]s found by [`listings()`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingsPage {
    /// [`Listing`]s on this page.
    pub items: Vec<Listing>,

    /// Total number of [`Listing`]s across all the pages.
    pub total_count: usize,

    /// 1-based number of this page.
    pub page: usize,

    /// Maximum number of [`Listing`]s on a page.
    pub per_page: usize,

    /// Total number of pages.
    pub page_count: usize,

    /// Canonical URL query string of the search.
    pub query: String,
}

/// Searches the publicly visible [`Listing`]s by the URL query string, as
/// produced by [`query_string::encode()`].
///
/// Unknown keys and malformed values of the query string are ignored.
///
/// # Errors
///
/// If the catalog cannot be read.
pub async fn listings(
    Extension(service): Extension<Service>,
    RawQuery(raw): RawQuery,
) -> Result<Json<ListingsPage>, Error> {
    let params = query_string::decode(raw.as_deref().unwrap_or_default());
    log::debug!(
        "searching listings by `{}`",
        raw.as_deref().unwrap_or_default(),
    );

    let page = service
        .execute(query::listings::Search::from(params.clone()))
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(ListingsPage {
        total_count: page.total_count,
        page: page.pagination.number(),
        per_page: page.pagination.size(),
        page_count: page.page_count(),
        query: query_string::encode(&SearchParams {
            page: Some(page.pagination.number()).filter(|n| *n > 1),
            ..params
        }),
        items: page.items,
    }))
}

#[cfg(test)]
mod spec {
    use axum::{extract::RawQuery, Extension};
    use service::{
        domain::Listing,
        infra::{catalog, storage},
    };

    use crate::Service;

    use super::listings;

    fn catalog() -> Vec<Listing> {
        serde_json::from_str(
            r#"[{
                "id": "5b0f4a4e-4f0e-4a3b-9d0a-2f6d1c7e8a01",
                "title": "Zeiss Contura 7/10/6",
                "manufacturer": {
                    "id": "0c6b1b2e-3c1f-4d5e-8f7a-9b8c7d6e5f40",
                    "name": "Zeiss"
                },
                "price": 4500000,
                "buildYear": 2016,
                "condition": "very_good",
                "measuringRange": {"x": 700, "y": 1000, "z": 600},
                "location": {"country": "Deutschland"},
                "createdAt": "2024-03-01T10:00:00Z",
                "status": "active"
            }, {
                "id": "5b0f4a4e-4f0e-4a3b-9d0a-2f6d1c7e8a02",
                "title": "Hexagon Global S",
                "manufacturer": {
                    "id": "0c6b1b2e-3c1f-4d5e-8f7a-9b8c7d6e5f41",
                    "name": "Hexagon"
                },
                "price": 3200000,
                "condition": "good",
                "measuringRange": {"x": 500, "y": 700, "z": 500},
                "location": {"country": "CH", "city": "Zürich"},
                "createdAt": "2024-02-01T10:00:00Z",
                "status": "active"
            }]"#,
        )
        .unwrap()
    }

    fn service() -> Service {
        let dir = std::env::temp_dir()
            .join(format!("rest-test-{}", std::process::id()));
        Service::new(
            service::Config::default(),
            catalog::InMemory::new(catalog()),
            storage::Files::new(dir),
        )
        .0
    }

    #[tokio::test]
    async fn searches_by_query_string() {
        let page = listings(
            Extension(service()),
            RawQuery(Some("country=deutschland&sort=price_asc&junk=1".into())),
        )
        .await
        .unwrap()
        .0;

        assert_eq!(page.total_count, 1);
        assert_eq!(page.items[0].title.to_string(), "Zeiss Contura 7/10/6");
        assert_eq!(page.query, "country=deutschland&sort=price_asc");
    }

    #[tokio::test]
    async fn lists_everything_without_query_string() {
        let page = listings(Extension(service()), RawQuery(None))
            .await
            .unwrap()
            .0;

        assert_eq!(page.total_count, 2);
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, 20);
        assert_eq!(page.page_count, 1);
        assert_eq!(page.query, "");
    }
}
