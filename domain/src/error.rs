//! Error types for the `domain` layer.
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure
/// with `domain::error::Error` as the root type holding a tree of `error_kind`
/// enums. The `source` field holds the original error (usually a `reqwest::Error`)
/// when there is one. `web` matches on the `error_kind`s to pick HTTP status codes
/// and messages without depending on the gateways' client libraries.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    Internal(InternalErrorKind),
    External(ExternalErrorKind),
}

/// Failures originating inside this application.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    /// Caller supplied missing or malformed input. The message is safe to show to users.
    Invalid(String),
    /// A required configuration value is absent.
    Config(String),
    /// The server-side session could not be read or written.
    Session,
    Other(String),
}

/// Failures talking to a collaborator over the network.
#[derive(Debug, PartialEq)]
pub enum ExternalErrorKind {
    Network,
    /// The collaborator answered with a non-success status code.
    Upstream(u16),
    Other(String),
}

impl InternalErrorKind {
    /// True when the error was caused by caller input rather than by this server.
    pub fn is_invalid(&self) -> bool {
        matches!(self, InternalErrorKind::Invalid(_))
    }
}

impl Error {
    pub fn invalid(message: impl Into<String>) -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Invalid(message.into())),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Config(message.into())),
        }
    }

    pub fn upstream(status: u16) -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::External(ExternalErrorKind::Upstream(status)),
        }
    }

    /// Wraps a failure to decode a collaborator's response body.
    pub fn malformed_response<E>(err: E, collaborator: &str) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::External(ExternalErrorKind::Other(format!(
                "Invalid response from {collaborator}"
            ))),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Domain Error: {self:?}")
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // Errors that result from issues building the reqwest::Client instance. This
        // type of error will occur prior to any network calls being made.
        if err.is_builder() {
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                    "Failed to build reqwest client".to_string(),
                )),
            }
        } else if err.is_decode() {
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::Other(
                    "Failed to decode response body".to_string(),
                )),
            }
        } else if let Some(status) = err.status() {
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::Upstream(
                    status.as_u16(),
                )),
            }
        } else {
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
            }
        }
    }
}
