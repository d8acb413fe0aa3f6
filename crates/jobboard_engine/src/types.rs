use std::fmt;

use jobboard_core::{FilterOptions, ListingPage};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ListingCompleted {
        generation: u64,
        result: Result<ListingPage, ListingError>,
    },
    FilterOptionsCompleted(Result<FilterOptions, ListingError>),
}

/// A listing source failure. `message` is shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ListingError {
    pub kind: FailureKind,
    pub message: String,
}

impl ListingError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Malformed body, as opposed to a transport or status failure.
    pub fn is_parse(&self) -> bool {
        matches!(self.kind, FailureKind::InvalidBody)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    InvalidBody,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::InvalidBody => write!(f, "invalid body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
