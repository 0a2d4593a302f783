use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchFailureKind {
    /// The request never produced a response (DNS, connect, TLS, reset).
    Transport,
    /// The endpoint answered with a non-success status.
    Status,
    /// The body was not a JSON array of comments.
    Decode,
    /// The configured endpoint could not be parsed.
    Endpoint,
}

impl FetchFailureKind {
    pub fn label(self) -> &'static str {
        match self {
            FetchFailureKind::Transport => "network error",
            FetchFailureKind::Status => "server error",
            FetchFailureKind::Decode => "malformed response",
            FetchFailureKind::Endpoint => "invalid endpoint",
        }
    }
}

/// Cloneable record of why the collection could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{}: {message}", .kind.label())]
pub struct FetchFailure {
    pub kind: FetchFailureKind,
    pub message: String,
}

impl FetchFailure {
    pub fn new(kind: FetchFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}
