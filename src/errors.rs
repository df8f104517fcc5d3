use reqwest::StatusCode;
use std::fmt;
use thiserror::Error;

/// Why a locally supplied value was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    /// Length outside the accepted bounds
    OutOfRange,
    /// Characters outside the accepted set
    InvalidFormat,
    /// A value the operation needs was never set
    Missing,
}

impl fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationKind::OutOfRange => f.write_str("out of range"),
            ValidationKind::InvalidFormat => f.write_str("invalid format"),
            ValidationKind::Missing => f.write_str("missing"),
        }
    }
}

#[derive(Error, Debug)]
pub enum RentryError {
    #[error("{field} is {kind}: {message}")]
    ValidationError {
        field: &'static str,
        kind: ValidationKind,
        message: String,
    },
    #[error("No paste with the specified id was found")]
    NotFound,
    #[error("unexpected response status: {0}")]
    UnexpectedStatus(StatusCode),
    #[error("Invalid edit code")]
    Unauthorized,
    #[error("There is already another paste that has the same id")]
    AlreadyExists,
    #[error("{0}")]
    ServiceError(String),
    #[error("network error: {0}")]
    NetworkError(#[from] reqwest::Error),
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("Selector error: {0}")]
    SelectorError(String),
    #[error("regex error: {0}")]
    RegexError(String),
    #[error("serde error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl RentryError {
    pub(crate) fn validation(
        field: &'static str,
        kind: ValidationKind,
        message: impl Into<String>,
    ) -> Self {
        RentryError::ValidationError {
            field,
            kind,
            message: message.into(),
        }
    }

    /// Returns the validation kind if this error was raised before any request was sent
    pub fn validation_kind(&self) -> Option<ValidationKind> {
        match self {
            RentryError::ValidationError { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
