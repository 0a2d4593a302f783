//! UI/backend events and error modeling for desktop GUI controller.

use shared::error::{FetchFailure, FetchFailureKind};
use table_core::FetchOutcome;

pub enum UiEvent {
    Info(String),
    CommentsFetched(FetchOutcome),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Status,
    Decode,
    Configuration,
    Startup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Fetch,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_failure(failure: &FetchFailure) -> Self {
        let category = match failure.kind {
            FetchFailureKind::Transport => UiErrorCategory::Transport,
            FetchFailureKind::Status => UiErrorCategory::Status,
            FetchFailureKind::Decode => UiErrorCategory::Decode,
            FetchFailureKind::Endpoint => UiErrorCategory::Configuration,
        };
        Self {
            category,
            context: UiErrorContext::Fetch,
            message: failure.to_string(),
        }
    }

    /// The backend worker never got far enough to run the fetch.
    pub fn backend_startup(message: impl Into<String>) -> Self {
        Self {
            category: UiErrorCategory::Startup,
            context: UiErrorContext::BackendStartup,
            message: message.into(),
        }
    }

    /// Short hint shown under the banner.
    pub fn guidance(&self) -> &'static str {
        match self.category {
            UiErrorCategory::Transport => "Server unreachable; check the endpoint URL and network.",
            UiErrorCategory::Status => "The endpoint answered with an error status.",
            UiErrorCategory::Decode => "The endpoint did not return a list of comments.",
            UiErrorCategory::Configuration => "Check the endpoint in comment_table.toml or --endpoint.",
            UiErrorCategory::Startup => "The background worker did not start; restart the app.",
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Snapshot stored as the table's load failure when the fetch could
    /// not run at all.
    pub fn to_fetch_failure(&self) -> FetchFailure {
        FetchFailure::new(FetchFailureKind::Transport, self.message.clone())
    }
}
