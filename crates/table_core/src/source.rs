//! The single read of the comment collection.

use async_trait::async_trait;
use reqwest::Client;
use shared::{domain::Comment, error::FetchFailure};
use tracing::{info, warn};
use url::Url;

use crate::error::FetchError;

pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/comments";

#[async_trait]
pub trait CommentSource: Send + Sync {
    async fn fetch_comments(&self) -> Result<Vec<Comment>, FetchError>;

    /// Human readable origin used in logs.
    fn describe(&self) -> String;
}

/// Result of the one fetch, as handed to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Loaded(Vec<Comment>),
    Failed(FetchFailure),
}

impl FetchOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, FetchOutcome::Loaded(_))
    }
}

impl From<Result<Vec<Comment>, FetchError>> for FetchOutcome {
    fn from(value: Result<Vec<Comment>, FetchError>) -> Self {
        match value {
            Ok(comments) => FetchOutcome::Loaded(comments),
            Err(err) => FetchOutcome::Failed(err.into()),
        }
    }
}

/// Runs the fetch once and folds it into a [`FetchOutcome`].
pub async fn load_comments<S>(source: &S) -> FetchOutcome
where
    S: CommentSource + ?Sized,
{
    let origin = source.describe();
    info!(source = %origin, "fetching comments");
    match source.fetch_comments().await {
        Ok(comments) => {
            info!(source = %origin, count = comments.len(), "comments loaded");
            FetchOutcome::Loaded(comments)
        }
        Err(err) => {
            warn!(source = %origin, kind = ?err.kind(), "comment fetch failed: {err}");
            FetchOutcome::Failed(err.into())
        }
    }
}

pub fn parse_endpoint(raw: &str) -> Result<Url, FetchError> {
    let url = Url::parse(raw.trim()).map_err(|source| FetchError::InvalidEndpoint {
        url: raw.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(FetchError::UnsupportedScheme(other.to_string())),
    }
}

pub struct HttpCommentSource {
    http: Client,
    endpoint: Url,
}

impl HttpCommentSource {
    pub fn new(endpoint: &str) -> Result<Self, FetchError> {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(http: Client, endpoint: &str) -> Result<Self, FetchError> {
        Ok(Self {
            http,
            endpoint: parse_endpoint(endpoint)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl CommentSource for HttpCommentSource {
    async fn fetch_comments(&self) -> Result<Vec<Comment>, FetchError> {
        let body = self
            .http
            .get(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(serde_json::from_slice(&body)?)
    }

    fn describe(&self) -> String {
        self.endpoint.to_string()
    }
}

/// Serves a fixed collection; used for offline runs and tests.
pub struct StaticCommentSource {
    comments: Vec<Comment>,
}

impl StaticCommentSource {
    pub fn new(comments: Vec<Comment>) -> Self {
        Self { comments }
    }

    pub fn from_json(raw: &str) -> Result<Self, FetchError> {
        Ok(Self::new(serde_json::from_str(raw)?))
    }
}

#[async_trait]
impl CommentSource for StaticCommentSource {
    async fn fetch_comments(&self) -> Result<Vec<Comment>, FetchError> {
        Ok(self.comments.clone())
    }

    fn describe(&self) -> String {
        format!("static({} comments)", self.comments.len())
    }
}
