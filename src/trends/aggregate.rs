//! Trend aggregation across feed sources
//!
//! [`TrendEngine`] fans out to every configured provider concurrently,
//! waits for all of them to settle inside a per-source timeout, then
//! normalizes, deduplicates, ranks, and truncates the combined batch.
//!
//! Failure semantics: a failed or timed-out source shrinks the batch and is
//! logged, never propagated. If every source fails the pass returns an
//! empty list so downstream rendering degrades gracefully. The engine holds
//! no mutable state between passes.

use crate::config::Config;
use crate::feeds::{
    FeedClient, FeedProvider, GoogleNewsProvider, HackerNewsProvider, RedditProvider,
    YouTubeProvider,
};
use crate::models::{BatchStats, Trend};
use crate::trends::normalize::Normalizer;
use crate::utils::title_key;

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Aggregates trends from all configured feed providers
pub struct TrendEngine {
    providers: Vec<Box<dyn FeedProvider>>,
    normalizer: Normalizer,
    config: Config,
}

impl std::fmt::Debug for TrendEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrendEngine")
            .field("providers", &self.providers.len())
            .field("normalizer", &self.normalizer)
            .field("config", &self.config)
            .finish()
    }
}

impl TrendEngine {
    /// Build an engine with the default provider set for this config
    ///
    /// The YouTube provider is only constructed when an API key is present;
    /// the remaining sources need no credentials.
    pub fn new(config: Config) -> crate::error::Result<Self> {
        config
            .validate()
            .map_err(|e| crate::error::Error::config(e.to_string()))?;

        let mut providers: Vec<Box<dyn FeedProvider>> = vec![
            Box::new(RedditProvider::new(
                FeedClient::new(&config.feeds)?,
                config.feeds.subreddits.clone(),
            )),
            Box::new(HackerNewsProvider::new(FeedClient::new(&config.feeds)?)),
            Box::new(GoogleNewsProvider::new(
                FeedClient::new(&config.feeds)?,
                config.feeds.google_news_query.clone(),
            )),
        ];

        match &config.feeds.youtube_api_key {
            Some(key) if !key.trim().is_empty() => {
                providers.push(Box::new(YouTubeProvider::new(
                    FeedClient::new(&config.feeds)?,
                    config.feeds.youtube_query.clone(),
                    key.clone(),
                )?));
            }
            _ => {
                debug!("No YouTube API key configured, skipping YouTube source");
            }
        }

        Ok(Self::with_providers(config, providers))
    }

    /// Build an engine over an explicit provider set
    ///
    /// Tests use this to substitute mock providers.
    pub fn with_providers(config: Config, providers: Vec<Box<dyn FeedProvider>>) -> Self {
        let normalizer = Normalizer::new(config.scoring.clone());
        Self {
            providers,
            normalizer,
            config,
        }
    }

    /// Run one aggregation pass and return the ranked trend list
    ///
    /// Never errors: source failures reduce the result set, and a pass with
    /// no surviving items returns an empty list.
    pub async fn trend_insights(&self) -> Vec<Trend> {
        self.trend_insights_at(Utc::now()).await
    }

    /// Aggregation pass scored against an explicit `now`, for reproducibility
    pub async fn trend_insights_at(&self, now: DateTime<Utc>) -> Vec<Trend> {
        let budget = self.config.feeds.source_timeout();

        // Fan out to every source; join_all settles each future
        // independently, so one failure never aborts the others
        let fetches = self
            .providers
            .iter()
            .map(|provider| async move {
                let result = timeout(budget, provider.fetch_raw_items()).await;
                (provider.source(), result)
            })
            .collect::<Vec<_>>();
        let settled = futures::future::join_all(fetches).await;

        let mut stats = BatchStats::default();
        let mut trends = Vec::new();

        for (source, outcome) in settled {
            let items = match outcome {
                Ok(Ok(items)) => {
                    stats.succeeded_sources += 1;
                    items
                }
                Ok(Err(e)) => {
                    stats.failed_sources += 1;
                    warn!(source = %source, error = %e, "Feed source failed");
                    continue;
                }
                Err(_) => {
                    stats.failed_sources += 1;
                    warn!(source = %source, timeout_secs = budget.as_secs(), "Feed source timed out");
                    continue;
                }
            };

            stats.fetched += items.len() as u32;

            for item in &items {
                match self.normalizer.normalize(item, now) {
                    Ok(trend) => {
                        stats.normalized += 1;
                        trends.push(trend);
                    }
                    Err(e) => {
                        stats.dropped += 1;
                        debug!(source = %source, error = %e, "Dropped unusable feed item");
                    }
                }
            }
        }

        let ranked = self.dedupe_and_rank(trends);

        info!(
            fetched = stats.fetched,
            normalized = stats.normalized,
            dropped = stats.dropped,
            failed_sources = stats.failed_sources,
            returned = ranked.len(),
            drop_rate = format!("{:.1}%", stats.drop_rate()),
            "Aggregation pass complete"
        );

        ranked
    }

    /// Deduplicate, sort, and truncate one batch of normalized trends
    ///
    /// Dedup policy: exact id collisions keep the higher-scored instance;
    /// near-duplicate titles across sources (case-insensitive,
    /// whitespace-collapsed) also keep the higher score, with the newer
    /// item winning score ties and the lesser id winning full ties, so the
    /// survivor never depends on map iteration order. Sort is score
    /// descending with a published-at-descending tie-break, then id.
    fn dedupe_and_rank(&self, trends: Vec<Trend>) -> Vec<Trend> {
        let mut by_id: HashMap<String, Trend> = HashMap::new();
        for trend in trends {
            match by_id.get(&trend.id) {
                Some(existing) if existing.score >= trend.score => {}
                _ => {
                    by_id.insert(trend.id.clone(), trend);
                }
            }
        }

        let mut by_title: HashMap<String, Trend> = HashMap::new();
        for trend in by_id.into_values() {
            let key = title_key(&trend.title);
            match by_title.get(&key) {
                Some(existing) if !Self::outranks(&trend, existing) => {}
                _ => {
                    by_title.insert(key, trend);
                }
            }
        }

        let mut ranked: Vec<Trend> = by_title.into_values().collect();
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.published_at.cmp(&a.published_at))
                .then_with(|| a.id.cmp(&b.id))
        });
        ranked.truncate(self.config.ranking.max_trends);
        ranked
    }

    /// Whether `candidate` replaces `existing` in the title dedup
    ///
    /// Same precedence as the final sort: score, then recency, then id.
    fn outranks(candidate: &Trend, existing: &Trend) -> bool {
        candidate.score > existing.score
            || (candidate.score == existing.score
                && (candidate.published_at > existing.published_at
                    || (candidate.published_at == existing.published_at
                        && candidate.id < existing.id)))
    }
}
