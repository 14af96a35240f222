//! Reddit hot-post provider
//!
//! Polls the public `hot.json` listing for each configured subreddit. No API
//! key required; Reddit rate-limits aggressively, so the shared client's
//! limiter and backoff do the pacing.

use crate::feeds::{FeedClient, FeedProvider};
use crate::models::{RawFeedItem, TrendSource};
use crate::utils::error::FeedError;
use crate::utils::truncate_chars;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
    data: Post,
}

#[derive(Debug, Deserialize)]
struct Post {
    id: String,
    title: String,
    #[serde(default)]
    selftext: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    permalink: String,
    #[serde(default)]
    score: f64,
    #[serde(default)]
    num_comments: f64,
    #[serde(default)]
    created_utc: f64,
    #[serde(default)]
    stickied: bool,
    #[serde(default)]
    over_18: bool,
}

/// Reddit feed provider
pub struct RedditProvider {
    client: FeedClient,
    subreddits: Vec<String>,
}

impl RedditProvider {
    /// Create a provider polling the given subreddits
    pub fn new(client: FeedClient, subreddits: Vec<String>) -> Self {
        Self { client, subreddits }
    }

    fn listing_url(subreddit: &str) -> String {
        format!("https://www.reddit.com/r/{subreddit}/hot.json?limit=25")
    }

    fn map_post(post: Post) -> Option<RawFeedItem> {
        if post.stickied || post.over_18 {
            return None;
        }

        let url = if post.url.starts_with("http") {
            post.url
        } else if !post.permalink.is_empty() {
            format!("https://www.reddit.com{}", post.permalink)
        } else {
            String::new()
        };

        let summary = if post.selftext.trim().is_empty() {
            None
        } else {
            Some(truncate_chars(post.selftext.trim(), 280))
        };

        let published_at = DateTime::<Utc>::from_timestamp(post.created_utc as i64, 0)
            .map(|dt| dt.to_rfc3339());

        let mut item = RawFeedItem::new(TrendSource::Reddit);
        item.external_id = Some(post.id);
        item.title = Some(post.title);
        item.summary = summary;
        item.url = if url.is_empty() { None } else { Some(url) };
        item.published_at = published_at;
        item.upvotes = Some(post.score);
        item.comments = Some(post.num_comments);
        Some(item)
    }
}

#[async_trait]
impl FeedProvider for RedditProvider {
    fn source(&self) -> TrendSource {
        TrendSource::Reddit
    }

    async fn fetch_raw_items(&self) -> Result<Vec<RawFeedItem>, FeedError> {
        let mut items = Vec::new();

        for subreddit in &self.subreddits {
            let listing: Listing = self.client.get_json(&Self::listing_url(subreddit)).await?;
            let count = listing.data.children.len();
            items.extend(
                listing
                    .data
                    .children
                    .into_iter()
                    .filter_map(|child| Self::map_post(child.data)),
            );
            debug!(subreddit = %subreddit, posts = count, "Fetched subreddit listing");
        }

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> Post {
        Post {
            id: "abc123".to_string(),
            title: "AI agent builds website in 3 minutes".to_string(),
            selftext: "Watched an agent scaffold and deploy a full site.".to_string(),
            url: "https://www.reddit.com/r/artificial/comments/abc123/".to_string(),
            permalink: "/r/artificial/comments/abc123/".to_string(),
            score: 4200.0,
            num_comments: 310.0,
            created_utc: 1_724_000_000.0,
            stickied: false,
            over_18: false,
        }
    }

    #[test]
    fn test_map_post_fills_signals() {
        let item = RedditProvider::map_post(sample_post()).unwrap();
        assert_eq!(item.source, TrendSource::Reddit);
        assert_eq!(item.external_id.as_deref(), Some("abc123"));
        assert_eq!(item.upvotes, Some(4200.0));
        assert_eq!(item.comments, Some(310.0));
        assert!(item.url.as_deref().unwrap().starts_with("https://"));
        assert!(item.published_at.is_some());
    }

    #[test]
    fn test_stickied_and_nsfw_posts_skipped() {
        let mut post = sample_post();
        post.stickied = true;
        assert!(RedditProvider::map_post(post).is_none());

        let mut post = sample_post();
        post.over_18 = true;
        assert!(RedditProvider::map_post(post).is_none());
    }

    #[test]
    fn test_relative_url_expands_from_permalink() {
        let mut post = sample_post();
        post.url = "/r/artificial/comments/abc123/".to_string();
        let item = RedditProvider::map_post(post).unwrap();
        assert_eq!(
            item.url.as_deref(),
            Some("https://www.reddit.com/r/artificial/comments/abc123/")
        );
    }

    #[test]
    fn test_empty_selftext_leaves_summary_unset() {
        let mut post = sample_post();
        post.selftext = "   ".to_string();
        let item = RedditProvider::map_post(post).unwrap();
        assert!(item.summary.is_none());
    }
}
