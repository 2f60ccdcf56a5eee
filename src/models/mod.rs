use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

// ============================================================================
// Request Models
// ============================================================================

/// Body of `POST /api/yt`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ResolveRequest {
    #[validate(required, length(min = 1))]
    #[serde(default)]
    pub url: Option<String>,
}

/// Query string of `GET /api/search`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct SearchParams {
    #[validate(length(min = 1))]
    #[serde(default)]
    pub q: String,
}

// ============================================================================
// Response Models
// ============================================================================

/// Successful resolution, as returned to the client.
///
/// Fields are forwarded from the resolver's JSON untouched. A field the
/// resolver did not emit is sent as `null` rather than omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedAudio {
    pub title: Value,
    pub thumbnail: Value,
    #[serde(rename = "downloadUrl")]
    pub download_url: Value,
}

impl ResolvedAudio {
    /// Pick `title`, `thumbnail` and `url` out of a resolver JSON document.
    ///
    /// No type checks: non-object documents and missing keys yield `null`.
    pub fn from_resolver_json(doc: &Value) -> Self {
        let field = |key: &str| doc.get(key).cloned().unwrap_or(Value::Null);
        ResolvedAudio {
            title: field("title"),
            thumbnail: field("thumbnail"),
            download_url: field("url"),
        }
    }
}

/// Why a search hit may or may not be downloaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadReason {
    RoyaltyFree,
    Copyright,
}

/// One video from a music search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    /// Channel title; the Data API has no artist field.
    pub artist: String,
    /// Always 0: search results carry no duration.
    pub duration: u32,
    pub thumbnail: Option<String>,
    pub can_stream: bool,
    pub can_download: bool,
    pub reason: DownloadReason,
}
