//! Hacker News front-page provider
//!
//! Uses the Algolia search API, which exposes the current front page as JSON
//! with points and comment counts in a single request.

use crate::feeds::{FeedClient, FeedProvider};
use crate::models::{RawFeedItem, TrendSource};
use crate::utils::error::FeedError;
use crate::utils::truncate_chars;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "objectID")]
    object_id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    story_text: Option<String>,
    #[serde(default)]
    points: Option<f64>,
    #[serde(default)]
    num_comments: Option<f64>,
    #[serde(default)]
    created_at: Option<String>,
}

/// Hacker News feed provider
pub struct HackerNewsProvider {
    client: FeedClient,
}

impl HackerNewsProvider {
    pub fn new(client: FeedClient) -> Self {
        Self { client }
    }

    fn search_url() -> &'static str {
        "https://hn.algolia.com/api/v1/search?tags=front_page&hitsPerPage=30"
    }

    fn map_hit(hit: Hit) -> RawFeedItem {
        // Ask/Show HN stories carry no external URL; fall back to the item page
        let url = hit.url.filter(|u| !u.trim().is_empty()).unwrap_or_else(|| {
            format!("https://news.ycombinator.com/item?id={}", hit.object_id)
        });

        let summary = hit
            .story_text
            .filter(|t| !t.trim().is_empty())
            .map(|t| truncate_chars(t.trim(), 280));

        let mut item = RawFeedItem::new(TrendSource::HackerNews);
        item.external_id = Some(hit.object_id);
        item.title = hit.title;
        item.summary = summary;
        item.url = Some(url);
        item.published_at = hit.created_at;
        item.points = hit.points;
        item.comments = hit.num_comments;
        item
    }
}

#[async_trait]
impl FeedProvider for HackerNewsProvider {
    fn source(&self) -> TrendSource {
        TrendSource::HackerNews
    }

    async fn fetch_raw_items(&self) -> Result<Vec<RawFeedItem>, FeedError> {
        let response: SearchResponse = self.client.get_json(Self::search_url()).await?;
        debug!(hits = response.hits.len(), "Fetched Hacker News front page");
        Ok(response.hits.into_iter().map(Self::map_hit).collect())
    }
}
