pub mod copyright;
pub mod keys;

pub use keys::ApiKeys;

use std::time::Duration;

use reqwest::Client as ReqwestClient;
use serde_json::Value;
use tracing::debug;

use crate::config::SearchConfig;
use crate::error::{SearchError, SearchResult};
use crate::models::{DownloadReason, SearchHit};

pub const SEARCH_TIMEOUT: Duration = Duration::from_secs(10);
pub const MAX_RESULTS: u8 = 15;
/// YouTube's "Music" video category.
pub const MUSIC_CATEGORY_ID: &str = "10";

/// Music search against the YouTube Data API v3 `search` endpoint.
#[derive(Debug)]
pub struct YouTubeSearch {
    http: ReqwestClient,
    api_base: String,
    keys: ApiKeys,
}

impl YouTubeSearch {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            http: ReqwestClient::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            keys: ApiKeys::new(config.api_keys.clone()),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.keys.is_empty()
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Up to [`MAX_RESULTS`] music videos matching `query`.
    pub async fn search(&self, query: &str) -> SearchResult<Vec<SearchHit>> {
        let key = self.keys.next_key().ok_or(SearchError::NotConfigured)?;
        let max_results = MAX_RESULTS.to_string();

        let resp = self
            .http
            .get(format!("{}/search", self.api_base))
            .timeout(SEARCH_TIMEOUT)
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("videoCategoryId", MUSIC_CATEGORY_ID),
                ("maxResults", max_results.as_str()),
                ("key", key),
            ])
            .send()
            .await
            .map_err(SearchError::Upstream)?;

        if !resp.status().is_success() {
            return Err(SearchError::UpstreamStatus(resp.status().as_u16()));
        }

        let body: Value = resp.json().await.map_err(SearchError::Upstream)?;
        let hits = parse_search_items(&body);
        debug!(query, hits = hits.len(), "YouTube search finished");
        Ok(hits)
    }
}

/// Map a Data API `search` response to hits. Items that are not videos
/// (no `id.videoId`) or have no title are skipped.
pub fn parse_search_items(body: &Value) -> Vec<SearchHit> {
    body["items"]
        .as_array()
        .map(|items| items.iter().filter_map(search_hit).collect())
        .unwrap_or_default()
}

fn search_hit(item: &Value) -> Option<SearchHit> {
    let snippet = &item["snippet"];
    let id = item["id"]["videoId"].as_str()?.to_string();
    let title = snippet["title"].as_str()?.to_string();
    let artist = snippet["channelTitle"].as_str().unwrap_or("").to_string();
    let description = snippet["description"].as_str().unwrap_or("");
    let thumbnail = snippet["thumbnails"]["medium"]["url"]
        .as_str()
        .map(str::to_string);

    let can_download = copyright::is_copyright_free(&title, description, &artist);
    Some(SearchHit {
        id,
        title,
        artist,
        duration: 0,
        thumbnail,
        can_stream: true,
        can_download,
        reason: if can_download {
            DownloadReason::RoyaltyFree
        } else {
            DownloadReason::Copyright
        },
    })
}
