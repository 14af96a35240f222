//! Feed providers and the shared HTTP client
//!
//! Each external source gets one [`FeedProvider`] implementation that fetches
//! raw items and maps the source-specific payload into [`RawFeedItem`]. The
//! aggregator treats the raw item shape as opaque; only the normalizer knows
//! which fields each source fills.
//!
//! All providers share [`FeedClient`], which handles rate limiting,
//! User-Agent rotation, and retry with exponential backoff.

pub mod google_news;
pub mod hacker_news;
pub mod reddit;
pub mod youtube;

pub use google_news::GoogleNewsProvider;
pub use hacker_news::HackerNewsProvider;
pub use reddit::RedditProvider;
pub use youtube::YouTubeProvider;

use crate::config::FeedsConfig;
use crate::models::{RawFeedItem, TrendSource};
use crate::utils::error::FeedError;
use crate::utils::retry::RetryConfig;

use async_trait::async_trait;
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use rand::seq::SliceRandom;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT},
    Client,
};
use serde::de::DeserializeOwned;
use std::num::NonZeroU32;

/// One external feed source
#[async_trait]
pub trait FeedProvider: Send + Sync {
    /// Which source this provider represents
    fn source(&self) -> TrendSource;

    /// Fetch the current batch of raw items from the source
    async fn fetch_raw_items(&self) -> Result<Vec<RawFeedItem>, FeedError>;
}

/// Pool of realistic User-Agent strings for rotation
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:128.0) Gecko/20100101 Firefox/128.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Safari/605.1.15",
];

/// Shared HTTP client for all feed providers
///
/// Handles rate limiting with governor, retry with exponential backoff, and
/// an optional base URL override so tests can point providers at a mock
/// server.
pub struct FeedClient {
    client: Client,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    retry: RetryConfig,
    base_url: Option<String>,
}

impl FeedClient {
    /// Create a client from feed configuration
    pub fn new(config: &FeedsConfig) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .gzip(true)
            .build()?;

        let rate = NonZeroU32::new(config.requests_per_second)
            .unwrap_or(NonZeroU32::new(1).expect("1 is non-zero"));
        let rate_limiter = RateLimiter::direct(Quota::per_second(rate));

        Ok(Self {
            client,
            rate_limiter,
            retry: RetryConfig::new(config.max_retries),
            base_url: None,
        })
    }

    /// Create a client whose requests are redirected to `base_url`
    ///
    /// Used by tests to mount wiremock endpoints under the real paths.
    pub fn with_base_url(config: &FeedsConfig, base_url: &str) -> Result<Self, FeedError> {
        let mut client = Self::new(config)?;
        client.base_url = Some(base_url.trim_end_matches('/').to_string());
        client
            .base_url
            .as_ref()
            .filter(|b| b.starts_with("http"))
            .ok_or_else(|| FeedError::InvalidUrl(base_url.to_string()))?;
        Ok(client)
    }

    /// Fetch a URL and decode the body as JSON
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FeedError> {
        let body = self.get_text(url).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch a URL as text with rate limiting and retry
    pub async fn get_text(&self, url: &str) -> Result<String, FeedError> {
        self.rate_limiter.until_ready().await;

        let full_url = self.resolve(url);
        let mut last_error = None;

        for attempt in 0..=self.retry.max_retries {
            let delay = self.retry.delay_for(attempt);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            match self
                .client
                .get(&full_url)
                .headers(self.build_headers())
                .send()
                .await
            {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response.text().await?);
                    } else if Self::should_retry(status.as_u16()) {
                        last_error = Some(FeedError::ServerError(status.as_u16()));
                        continue;
                    } else {
                        return Err(FeedError::ServerError(status.as_u16()));
                    }
                }
                Err(e) => {
                    if e.is_timeout() {
                        last_error = Some(FeedError::Timeout);
                    } else {
                        last_error = Some(FeedError::Http(e));
                    }
                }
            }
        }

        Err(last_error.unwrap_or(FeedError::MaxRetriesExceeded))
    }

    /// Rewrite an absolute URL onto the base URL override, keeping its path
    fn resolve(&self, url: &str) -> String {
        match &self.base_url {
            Some(base) => {
                if let Ok(parsed) = url::Url::parse(url) {
                    let mut rewritten = format!("{}{}", base, parsed.path());
                    if let Some(query) = parsed.query() {
                        rewritten.push('?');
                        rewritten.push_str(query);
                    }
                    rewritten
                } else {
                    format!("{base}{url}")
                }
            }
            None => url.to_string(),
        }
    }

    /// Retry on rate limiting and transient server errors only
    fn should_retry(status: u16) -> bool {
        matches!(status, 429 | 500 | 502 | 503 | 504)
    }

    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(self.random_user_agent()));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, application/xml, text/html;q=0.9, */*;q=0.8"),
        );
        headers
    }

    fn random_user_agent(&self) -> &'static str {
        let mut rng = rand::thread_rng();
        USER_AGENTS.choose(&mut rng).unwrap_or(&USER_AGENTS[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> FeedClient {
        FeedClient::new(&FeedsConfig::default()).unwrap()
    }

    #[test]
    fn test_should_retry() {
        assert!(FeedClient::should_retry(429));
        assert!(FeedClient::should_retry(503));
        assert!(!FeedClient::should_retry(404));
        assert!(!FeedClient::should_retry(403));
        assert!(!FeedClient::should_retry(200));
    }

    #[test]
    fn test_user_agent_rotation() {
        let client = test_client();
        let mut agents = std::collections::HashSet::new();
        for _ in 0..100 {
            agents.insert(client.random_user_agent());
        }
        assert!(agents.len() > 1, "User agents should rotate");
    }

    #[test]
    fn test_resolve_rewrites_onto_base_url() {
        let client =
            FeedClient::with_base_url(&FeedsConfig::default(), "http://localhost:9000").unwrap();
        assert_eq!(
            client.resolve("https://www.reddit.com/r/artificial/hot.json?limit=25"),
            "http://localhost:9000/r/artificial/hot.json?limit=25"
        );
        assert_eq!(
            client.resolve("/relative/path"),
            "http://localhost:9000/relative/path"
        );
    }

    #[test]
    fn test_resolve_passthrough_without_base_url() {
        let client = test_client();
        let url = "https://hn.algolia.com/api/v1/search?tags=front_page";
        assert_eq!(client.resolve(url), url);
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = FeedClient::with_base_url(&FeedsConfig::default(), "not a url");
        assert!(result.is_err());
    }
}
