//! YouTube Data API provider
//!
//! Two-step fetch: a search request for recent videos matching the query,
//! then a batched `videos` request for view counts. Requires an API key;
//! the engine skips this provider entirely when none is configured.

use crate::feeds::{FeedClient, FeedProvider};
use crate::models::{RawFeedItem, TrendSource};
use crate::utils::error::FeedError;
use crate::utils::truncate_chars;

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: VideoId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct VideoId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(rename = "publishedAt", default)]
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatsResponse {
    #[serde(default)]
    items: Vec<StatsItem>,
}

#[derive(Debug, Deserialize)]
struct StatsItem {
    id: String,
    statistics: Statistics,
}

#[derive(Debug, Deserialize)]
struct Statistics {
    #[serde(rename = "viewCount", default)]
    view_count: Option<String>,
}

/// YouTube feed provider
pub struct YouTubeProvider {
    client: FeedClient,
    query: String,
    api_key: String,
}

impl YouTubeProvider {
    /// Create a provider; fails fast when the API key is blank
    pub fn new(
        client: FeedClient,
        query: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, FeedError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(FeedError::MissingApiKey(TrendSource::YouTube));
        }
        Ok(Self {
            client,
            query: query.into(),
            api_key,
        })
    }

    fn search_url(&self) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(self.query.as_bytes()).collect();
        format!(
            "https://www.googleapis.com/youtube/v3/search?part=snippet&type=video&order=viewCount&maxResults=20&q={encoded}&key={}",
            self.api_key
        )
    }

    fn stats_url(&self, ids: &[String]) -> String {
        format!(
            "https://www.googleapis.com/youtube/v3/videos?part=statistics&id={}&key={}",
            ids.join(","),
            self.api_key
        )
    }

    fn map_video(item: SearchItem, views: Option<f64>) -> Option<RawFeedItem> {
        let video_id = item.id.video_id?;

        let summary = if item.snippet.description.trim().is_empty() {
            None
        } else {
            Some(truncate_chars(item.snippet.description.trim(), 280))
        };

        let mut raw = RawFeedItem::new(TrendSource::YouTube);
        raw.url = Some(format!("https://www.youtube.com/watch?v={video_id}"));
        raw.external_id = Some(video_id);
        raw.title = Some(item.snippet.title);
        raw.summary = summary;
        raw.published_at = item.snippet.published_at;
        raw.views = views;
        Some(raw)
    }
}

#[async_trait]
impl FeedProvider for YouTubeProvider {
    fn source(&self) -> TrendSource {
        TrendSource::YouTube
    }

    async fn fetch_raw_items(&self) -> Result<Vec<RawFeedItem>, FeedError> {
        let search: SearchResponse = self.client.get_json(&self.search_url()).await?;

        let ids: Vec<String> = search
            .items
            .iter()
            .filter_map(|item| item.id.video_id.clone())
            .collect();

        // View counts come from a second, batched request; a failure there
        // degrades to unknown engagement rather than dropping the batch
        let views: HashMap<String, f64> = if ids.is_empty() {
            HashMap::new()
        } else {
            match self.client.get_json::<StatsResponse>(&self.stats_url(&ids)).await {
                Ok(stats) => stats
                    .items
                    .into_iter()
                    .filter_map(|s| {
                        let count = s.statistics.view_count?.parse::<f64>().ok()?;
                        Some((s.id, count))
                    })
                    .collect(),
                Err(e) => {
                    tracing::warn!(error = %e, "YouTube statistics request failed");
                    HashMap::new()
                }
            }
        };

        let items: Vec<RawFeedItem> = search
            .items
            .into_iter()
            .filter_map(|item| {
                let view_count = item
                    .id
                    .video_id
                    .as_ref()
                    .and_then(|id| views.get(id).copied());
                Self::map_video(item, view_count)
            })
            .collect();

        debug!(items = items.len(), "Fetched YouTube search results");
        Ok(items)
    }
}
