use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::*;
use serde::Serialize;
use utoipa::ToSchema;

use domain::error::{DomainErrorKind, Error as DomainError, InternalErrorKind};

pub type Result<T> = core::result::Result<T, Error>;

const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// A domain error on its way out as an HTTP response.
///
/// `message` is the user-facing text for failures whose details should stay in
/// the logs, such as an upstream service answering with a 503.
#[derive(Debug)]
pub struct Error {
    inner: DomainError,
    message: Option<&'static str>,
}

/// JSON body of every error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.inner)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error) = match self.inner.error_kind {
            DomainErrorKind::Internal(InternalErrorKind::Invalid(message)) => {
                (StatusCode::BAD_REQUEST, message)
            }
            // Config messages name the missing setting and are shown as is.
            DomainErrorKind::Internal(InternalErrorKind::Config(message)) => {
                error!("Request failed on missing configuration: {message}");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
            error_kind => {
                error!("Request failed: {error_kind:?}, source: {:?}", self.inner.source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    self.message.unwrap_or(INTERNAL_SERVER_ERROR).to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<DomainError> for Error {
    fn from(err: DomainError) -> Self {
        Self {
            inner: err,
            message: None,
        }
    }
}

impl From<tower_sessions::session::Error> for Error {
    fn from(err: tower_sessions::session::Error) -> Self {
        warn!("Session store error: {err:?}");
        Self::from(DomainError {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Session),
        })
    }
}

/// Attaches the message shown to users when the operation fails on the server side.
pub trait Context<T> {
    fn context(self, message: &'static str) -> Result<T>;
}

impl<T> Context<T> for core::result::Result<T, DomainError> {
    fn context(self, message: &'static str) -> Result<T> {
        self.map_err(|err| Error {
            inner: err,
            message: Some(message),
        })
    }
}
