//! Error types for the `domain` layer.
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors are modeled as a tree with `domain::error::Error` at the root, holding an
/// `error_kind` that tells `web` which HTTP status to answer with, and the underlying
/// error in `source`. `web` depends on `domain` but never on `reqwest` directly, so
/// outbound client errors are translated here.
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

/// Enum representing the various kinds of internal errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    Other(String),
}

/// Enum representing the kinds of errors raised while talking to the authorization server.
#[derive(Debug, PartialEq)]
pub enum ExternalErrorKind {
    Network,
}

impl Error {
    pub fn internal(message: &str) -> Self {
        Error {
            source: Some(message.to_string().into()),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(message.to_string())),
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
        // Errors that result from issues building the reqwest::Client instance or a
        // request. These occur before any bytes reach the network.
        if err.is_builder() {
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                    "Failed to build outbound request".to_string(),
                )),
            }
        // Errors that result from issues with the network call itself.
        } else {
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
            }
        }
    }
}
