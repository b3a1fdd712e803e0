use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::*;

use domain::error::{DomainErrorKind, Error as DomainError, ExternalErrorKind};

pub type Result<T> = core::result::Result<T, Error>;

/// Failures a handler cannot turn into a page. The user-facing error cases of the
/// OAuth flow are rendered inline by the controllers and never reach this type.
#[derive(Debug)]
pub struct Error(DomainError);

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self.0);
        match self.0.error_kind {
            DomainErrorKind::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL SERVER ERROR").into_response()
            }
            DomainErrorKind::External(ExternalErrorKind::Network) => {
                (StatusCode::BAD_GATEWAY, "BAD GATEWAY").into_response()
            }
        }
    }
}

impl<E> From<E> for Error
where
    E: Into<DomainError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
