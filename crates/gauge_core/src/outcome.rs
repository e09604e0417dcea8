use std::fmt;

use thiserror::Error;

/// Result of one call to the counting service.
pub type CountOutcome = Result<u64, CountFailure>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct CountFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl CountFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// Transport failure or timeout.
    Network,
    /// Non-success status from the service.
    Service { status: u16 },
    /// Success status, but the body lacked a usable `tokens` field.
    MalformedResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Service { status } => write!(f, "service error (status {status})"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
        }
    }
}
