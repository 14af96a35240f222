//! Configuration management for the trendpulse engine
//!
//! Every tuning constant in the engine lives here: scoring weights, the
//! recency decay curve, the breakout vocabulary, per-source engagement
//! scales, and the ranking window. Components receive their config at
//! construction time so tests can substitute alternate values.
//!
//! Configuration is loaded from environment variables (`TRENDPULSE_*`) with
//! sensible defaults, or from a TOML file when `TRENDPULSE_CONFIG` is set.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Feed provider configuration
    pub feeds: FeedsConfig,

    /// Signal scoring configuration
    pub scoring: ScoringConfig,

    /// Ranking and aggregation configuration
    pub ranking: RankingConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Feed provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedsConfig {
    /// Subreddits polled for hot posts
    pub subreddits: Vec<String>,

    /// Google News RSS search query
    pub google_news_query: String,

    /// YouTube search query
    pub youtube_query: String,

    /// YouTube Data API key; the YouTube provider is skipped when unset
    pub youtube_api_key: Option<String>,

    /// Rate limit per provider (requests per second)
    pub requests_per_second: u32,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Per-source budget in seconds before the aggregator gives up on it
    pub source_timeout_secs: u64,

    /// Maximum retry attempts for transient failures
    pub max_retries: u32,
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            subreddits: vec!["artificial".to_string(), "automation".to_string()],
            google_news_query: "AI agents automation".to_string(),
            youtube_query: "AI agent automation".to_string(),
            youtube_api_key: None,
            requests_per_second: 2,
            request_timeout_secs: 4,
            source_timeout_secs: 6,
            max_retries: 2,
        }
    }
}

impl FeedsConfig {
    /// Per-request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Per-source budget as a Duration
    pub fn source_timeout(&self) -> Duration {
        Duration::from_secs(self.source_timeout_secs)
    }
}

/// Per-source reference magnitudes for engagement normalization
///
/// A raw signal equal to the reference value maps to 100 on the common
/// scale; smaller values are log-compressed below it. Raw magnitudes are
/// not comparable across sources, so each source carries its own scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementScale {
    pub reddit_upvotes: f64,
    pub reddit_comments: f64,
    pub hn_points: f64,
    pub hn_comments: f64,
    pub youtube_views: f64,
}

impl Default for EngagementScale {
    fn default() -> Self {
        Self {
            reddit_upvotes: 5_000.0,
            reddit_comments: 800.0,
            hn_points: 600.0,
            hn_comments: 400.0,
            youtube_views: 1_000_000.0,
        }
    }
}

/// Signal scoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Weight of the recency component
    pub recency_weight: f64,

    /// Weight of the engagement component
    pub engagement_weight: f64,

    /// Weight of the keyword relevance component
    pub keyword_weight: f64,

    /// Hours of full recency credit before decay begins
    pub full_credit_hours: f64,

    /// Half-life in hours of the exponential recency decay
    pub half_life_hours: f64,

    /// Floor for component and final scores; keeps very old items rankable
    pub score_floor: f64,

    /// Upper bound of the score range
    pub score_ceiling: f64,

    /// Engagement value assumed for sources without engagement signals
    pub neutral_engagement: f64,

    /// Terms that boost relevance when present in title or summary
    pub breakout_vocabulary: Vec<String>,

    /// Per-source engagement normalization scales
    pub engagement_scale: EngagementScale,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            recency_weight: 0.4,
            engagement_weight: 0.4,
            keyword_weight: 0.2,
            full_credit_hours: 24.0,
            half_life_hours: 36.0,
            score_floor: 5.0,
            score_ceiling: 100.0,
            neutral_engagement: 40.0,
            breakout_vocabulary: [
                "ai",
                "agent",
                "agents",
                "agentic",
                "automation",
                "autonomous",
                "llm",
                "gpt",
                "chatbot",
                "copilot",
                "no-code",
                "workflow",
                "openai",
                "anthropic",
                "gemini",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            engagement_scale: EngagementScale::default(),
        }
    }
}

/// Ranking and aggregation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Maximum number of trends returned per aggregation pass
    pub max_trends: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self { max_trends: 8 }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

impl Config {
    /// Load configuration, preferring `TRENDPULSE_CONFIG` file over env vars
    pub fn load() -> Result<Self> {
        let config = match std::env::var("TRENDPULSE_CONFIG") {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::from_env()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Reading config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Parsing config file {}", path.display()))?;
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(subs) = std::env::var("TRENDPULSE_SUBREDDITS") {
            config.feeds.subreddits = subs
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Ok(query) = std::env::var("TRENDPULSE_NEWS_QUERY") {
            config.feeds.google_news_query = query;
        }

        if let Ok(query) = std::env::var("TRENDPULSE_YOUTUBE_QUERY") {
            config.feeds.youtube_query = query;
        }

        config.feeds.youtube_api_key = std::env::var("YOUTUBE_API_KEY").ok();

        if let Some(timeout) = env_parse::<u64>("TRENDPULSE_REQUEST_TIMEOUT") {
            config.feeds.request_timeout_secs = timeout;
        }

        if let Some(timeout) = env_parse::<u64>("TRENDPULSE_SOURCE_TIMEOUT") {
            config.feeds.source_timeout_secs = timeout;
        }

        if let Some(max) = env_parse::<usize>("TRENDPULSE_MAX_TRENDS") {
            config.ranking.max_trends = max;
        }

        if let Ok(vocab) = std::env::var("TRENDPULSE_BREAKOUT_VOCAB") {
            config.scoring.breakout_vocabulary = vocab
                .split(',')
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Ok(level) = std::env::var("TRENDPULSE_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(format) = std::env::var("TRENDPULSE_LOG_FORMAT") {
            config.logging.format = format;
        }

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let s = &self.scoring;

        if s.recency_weight < 0.0 || s.engagement_weight < 0.0 || s.keyword_weight < 0.0 {
            anyhow::bail!("Scoring weights must be non-negative");
        }

        let weight_sum = s.recency_weight + s.engagement_weight + s.keyword_weight;
        if weight_sum <= 0.0 {
            anyhow::bail!("At least one scoring weight must be positive");
        }

        if s.half_life_hours <= 0.0 {
            anyhow::bail!("Recency half-life must be positive");
        }

        if s.score_floor < 0.0 || s.score_floor >= s.score_ceiling {
            anyhow::bail!(
                "Score floor {} must be non-negative and below ceiling {}",
                s.score_floor,
                s.score_ceiling
            );
        }

        if self.ranking.max_trends == 0 {
            anyhow::bail!("max_trends must be at least 1");
        }

        if self.feeds.requests_per_second == 0 {
            anyhow::bail!("requests_per_second must be at least 1");
        }

        if self.feeds.subreddits.is_empty() {
            anyhow::bail!("At least one subreddit must be configured");
        }

        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse::<T>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let mut config = Config::default();
        config.scoring.recency_weight = -1.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.scoring.recency_weight = 0.0;
        config.scoring.engagement_weight = 0.0;
        config.scoring.keyword_weight = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_floor_must_stay_below_ceiling() {
        let mut config = Config::default();
        config.scoring.score_floor = 100.0;
        config.scoring.score_ceiling = 100.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_max_trends_rejected() {
        let mut config = Config::default();
        config.ranking.max_trends = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed: Config = toml::from_str(
            r#"
            [ranking]
            max_trends = 3

            [scoring]
            half_life_hours = 12.0
            "#,
        )
        .unwrap();

        assert_eq!(parsed.ranking.max_trends, 3);
        assert!((parsed.scoring.half_life_hours - 12.0).abs() < f64::EPSILON);
        // Untouched sections keep defaults
        assert_eq!(parsed.feeds.subreddits.len(), 2);
        assert!(!parsed.scoring.breakout_vocabulary.is_empty());
    }
}
