use shared::error::{FetchFailure, FetchFailureKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid endpoint url '{url}': {source}")]
    InvalidEndpoint {
        url: String,
        source: url::ParseError,
    },
    #[error("unsupported endpoint scheme '{0}', expected http or https")]
    UnsupportedScheme(String),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("response is not a JSON array of comments: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    pub fn kind(&self) -> FetchFailureKind {
        match self {
            FetchError::InvalidEndpoint { .. } | FetchError::UnsupportedScheme(_) => {
                FetchFailureKind::Endpoint
            }
            FetchError::Http(err) if err.status().is_some() => FetchFailureKind::Status,
            FetchError::Http(err) if err.is_decode() => FetchFailureKind::Decode,
            FetchError::Http(_) => FetchFailureKind::Transport,
            FetchError::Decode(_) => FetchFailureKind::Decode,
        }
    }

    pub fn to_failure(&self) -> FetchFailure {
        FetchFailure::new(self.kind(), self.to_string())
    }
}

impl From<FetchError> for FetchFailure {
    fn from(value: FetchError) -> Self {
        value.to_failure()
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse settings file '{path}': {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid page size in settings: {0}")]
    PageSize(String),
    #[error(transparent)]
    Endpoint(#[from] FetchError),
}
