//! [`Context`]-related definitions.

use std::sync::atomic::{self, AtomicU16};

use axum::{async_trait, extract::FromRequestParts};
use juniper::{
    http::{GraphQLBatchResponse, GraphQLResponse},
    IntoFieldError as _,
};
use service::domain::comparison;

use crate::{define_error, Error, JuniperResponse, Service};

/// Name of the HTTP header identifying the client.
pub const CLIENT_ID_HEADER: &str = "x-client-id";

/// Application context.
#[derive(Debug)]
pub struct Context {
    /// [`Service`] instance.
    service: Service,

    /// Error status code.
    error_status_code: AtomicU16,

    /// Raw value of the [`CLIENT_ID_HEADER`], if provided.
    client_id: Option<http::HeaderValue>,
}

impl Context {
    /// Creates a new [`Context`] for the provided request `headers`.
    #[must_use]
    pub fn new(service: Service, headers: &http::HeaderMap) -> Self {
        Self {
            service,
            error_status_code: AtomicU16::new(
                http::StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            ),
            client_id: headers.get(CLIENT_ID_HEADER).cloned(),
        }
    }

    /// Returns [`Service`] instance of this [`Context`].
    #[must_use]
    pub fn service(&self) -> &Service {
        &self.service
    }

    /// Returns the error status code of this [`Context`].
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn error_status_code(&self) -> http::StatusCode {
        http::StatusCode::from_u16(
            self.error_status_code.load(atomic::Ordering::Relaxed),
        )
        .expect("invalid status code")
    }

    /// Sets the error status code for this [`Context`].
    ///
    /// Provided [`http::StatusCode`] will be applied to the response.
    pub fn set_error_status_code(&self, status_code: http::StatusCode) {
        self.error_status_code
            .store(status_code.as_u16(), atomic::Ordering::Relaxed);
    }

    /// Helper method calling [`Context::set_error_status_code()`] inside
    /// [`Result::map_err()`] closure.
    pub fn error(&self) -> impl FnOnce(Error) -> Error + '_ {
        move |err| {
            self.set_error_status_code(err.status_code);
            err
        }
    }

    /// Returns the [`comparison::Key`] of the requesting client.
    ///
    /// # Errors
    ///
    /// Errors if the [`CLIENT_ID_HEADER`] is missing or malformed.
    pub fn client_key(&self) -> Result<comparison::Key, Error> {
        let header = self
            .client_id
            .as_ref()
            .ok_or_else(|| ClientError::Required.into())
            .map_err(self.error())?;
        header
            .to_str()
            .ok()
            .and_then(comparison::Key::for_client)
            .ok_or_else(|| ClientError::Invalid.into())
            .map_err(self.error())
    }
}

impl juniper::Context for Context {}

#[async_trait]
impl<S> FromRequestParts<S> for Context
where
    S: Send + Sync,
{
    type Rejection = JuniperResponse;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _: &S,
    ) -> Result<Self, Self::Rejection> {
        let service =
            parts.extensions.get::<Service>().cloned().ok_or_else(|| {
                JuniperResponse {
                    status_code: http::StatusCode::INTERNAL_SERVER_ERROR,
                    response: GraphQLBatchResponse::Single(
                        GraphQLResponse::error(
                            Error::internal(&"missing `Service` extension")
                                .into_field_error(),
                        ),
                    ),
                }
            })?;

        Ok(Self::new(service, &parts.headers))
    }
}

define_error! {
    enum ClientError {
        #[code = "CLIENT_ID_REQUIRED"]
        #[status = BAD_REQUEST]
        #[message = "`X-Client-Id` header is required"]
        Required,

        #[code = "INVALID_CLIENT_ID"]
        #[status = BAD_REQUEST]
        #[message = "`X-Client-Id` header must consist of at most 128 ASCII \
                     alphanumerics, `-` or `_`"]
        Invalid,
    }
}
