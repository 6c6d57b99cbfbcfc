//! Error types for devops-fun
//!
//! Message-only variants are what `trace::raise_with_log` produces. They are
//! built fresh from the message and never carry a `source`, so whatever
//! triggered the failure is not chained onto them.

use thiserror::Error;

/// Errors produced by the trace facility and its configuration layer
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Runtime(String),

    #[error("{0}")]
    InvalidValue(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    PermissionDenied(String),

    #[error("Invalid trace filter '{pattern}': {source}")]
    InvalidFilter {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid trace configuration: {0}")]
    Config(String),
}

/// Result type for devops-fun operations
pub type Result<T> = std::result::Result<T, Error>;

/// Kind of failure `raise_with_log` should produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorKind {
    /// Generic runtime failure (default)
    #[default]
    Runtime,
    InvalidValue,
    NotFound,
    PermissionDenied,
}

impl ErrorKind {
    /// Build an error of this kind carrying `message` and nothing else
    pub fn into_error(self, message: impl Into<String>) -> Error {
        let message = message.into();
        match self {
            ErrorKind::Runtime => Error::Runtime(message),
            ErrorKind::InvalidValue => Error::InvalidValue(message),
            ErrorKind::NotFound => Error::NotFound(message),
            ErrorKind::PermissionDenied => Error::PermissionDenied(message),
        }
    }
}

impl Error {
    /// Kind of a message-only error, `None` for structured variants
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Error::Runtime(_) => Some(ErrorKind::Runtime),
            Error::InvalidValue(_) => Some(ErrorKind::InvalidValue),
            Error::NotFound(_) => Some(ErrorKind::NotFound),
            Error::PermissionDenied(_) => Some(ErrorKind::PermissionDenied),
            Error::InvalidFilter { .. } | Error::Config(_) => None,
        }
    }

    /// Payload of a message-only error
    pub fn message(&self) -> Option<&str> {
        match self {
            Error::Runtime(m)
            | Error::InvalidValue(m)
            | Error::NotFound(m)
            | Error::PermissionDenied(m) => Some(m),
            Error::InvalidFilter { .. } | Error::Config(_) => None,
        }
    }
}
