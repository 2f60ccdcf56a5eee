use std::io;
use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub const EMPTY_URL_MESSAGE: &str = "URL is empty";
pub const PARSE_FAILURE_MESSAGE: &str = "Could not parse resolver output (JSON)";

/// Every way a `/api/yt` request can fail.
///
/// All variants render as HTTP 200 with an `{"error": ...}` body; clients
/// distinguish outcomes by the presence of the `error` key only.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("URL is empty")]
    EmptyUrl,

    #[error("failed to start resolver: {0}")]
    Spawn(io::Error),

    /// Non-zero exit. Carries the resolver's stderr verbatim.
    #[error("{stderr}")]
    Failed { stderr: String },

    /// Output cap hit. Carries whatever stderr was captured before the cut,
    /// which is what the client sees when there is any.
    #[error("{}", overflow_message(.limit, .stderr))]
    OutputTooLarge { limit: usize, stderr: String },

    #[error("resolver timed out after {0:?}")]
    Timeout(Duration),

    #[error("resolver I/O error: {0}")]
    Io(io::Error),

    #[error("Could not parse resolver output (JSON)")]
    Parse(serde_json::Error),
}

impl IntoResponse for ResolveError {
    fn into_response(self) -> Response {
        match &self {
            ResolveError::EmptyUrl => tracing::debug!("Rejected request with empty URL"),
            ResolveError::Failed { stderr } => {
                tracing::warn!(stderr_len = stderr.len(), "Resolver exited with failure")
            }
            ResolveError::Parse(e) => tracing::warn!(error = %e, "Resolver output is not JSON"),
            other => tracing::warn!(error = %other, "Resolver invocation failed"),
        }

        (StatusCode::OK, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type ResolveResult<T> = Result<T, ResolveError>;

fn overflow_message(limit: &usize, stderr: &str) -> String {
    if stderr.is_empty() {
        format!("resolver output exceeded {limit} bytes")
    } else {
        stderr.to_string()
    }
}

/// Failures of `GET /api/search`.
///
/// Unlike [`ResolveError`] these carry real HTTP statuses; the body is still
/// a bare `{"error": ...}` object.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("query is empty")]
    EmptyQuery,

    #[error("search is not configured")]
    NotConfigured,

    #[error("search backend unreachable")]
    Upstream(#[source] reqwest::Error),

    #[error("search backend returned {0}")]
    UpstreamStatus(u16),
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let status = match &self {
            SearchError::EmptyQuery => StatusCode::BAD_REQUEST,
            SearchError::NotConfigured => {
                tracing::error!("No YouTube API key configured (YT_KEY_1..YT_KEY_3)");
                StatusCode::SERVICE_UNAVAILABLE
            }
            SearchError::Upstream(e) => {
                tracing::error!(error = ?e, "Failed to contact YouTube Data API");
                StatusCode::BAD_GATEWAY
            }
            SearchError::UpstreamStatus(code) => {
                tracing::error!("YouTube Data API returned error status: {}", code);
                StatusCode::BAD_GATEWAY
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type SearchResult<T> = Result<T, SearchError>;

/// Failures that stop the server itself (bind / serve).
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind { addr: String, source: io::Error },

    #[error("server error: {0}")]
    Serve(#[from] io::Error),

    #[error("server task panicked or was cancelled")]
    Join(#[from] tokio::task::JoinError),
}
