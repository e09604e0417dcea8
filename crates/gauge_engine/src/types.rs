use gauge_core::{CountOutcome, EditTicket, RequestEpoch};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The quiet interval for `ticket` elapsed without a restart.
    DebounceElapsed { ticket: EditTicket },
    /// The counting service call for `epoch` finished.
    CountCompleted {
        epoch: RequestEpoch,
        outcome: CountOutcome,
    },
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid service base url {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported url scheme {0:?}, expected http or https")]
    UnsupportedScheme(String),
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
