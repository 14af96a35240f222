// Core data structures for the trendpulse engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Feed origins the engine knows how to normalize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrendSource {
    Reddit,
    HackerNews,
    GoogleNews,
    YouTube,
}

impl TrendSource {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reddit => "reddit",
            Self::HackerNews => "hackernews",
            Self::GoogleNews => "googlenews",
            Self::YouTube => "youtube",
        }
    }

    /// Display label for rendered output
    pub fn label(&self) -> &'static str {
        match self {
            Self::Reddit => "Reddit",
            Self::HackerNews => "Hacker News",
            Self::GoogleNews => "Google News",
            Self::YouTube => "YouTube",
        }
    }

    /// Create from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "reddit" => Some(Self::Reddit),
            "hackernews" | "hn" | "hacker news" => Some(Self::HackerNews),
            "googlenews" | "google news" => Some(Self::GoogleNews),
            "youtube" | "yt" => Some(Self::YouTube),
            _ => None,
        }
    }

    /// Get all sources in fetch order
    pub fn all() -> Vec<Self> {
        vec![
            Self::Reddit,
            Self::HackerNews,
            Self::GoogleNews,
            Self::YouTube,
        ]
    }
}

impl std::fmt::Display for TrendSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One raw feed item as returned by a provider, before normalization
///
/// Field presence varies by source; only the normalizer knows which
/// combination each source is expected to fill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFeedItem {
    pub source: TrendSource,

    /// Feed-provided identifier, when the source exposes one
    pub external_id: Option<String>,

    pub title: Option<String>,
    pub summary: Option<String>,
    pub url: Option<String>,

    /// Publish timestamp as the feed reported it (RFC 3339 or RFC 2822)
    pub published_at: Option<String>,

    /// Source-specific engagement signals, raw magnitudes
    pub upvotes: Option<f64>,
    pub points: Option<f64>,
    pub comments: Option<f64>,
    pub views: Option<f64>,
}

impl RawFeedItem {
    /// Create an empty item for a source
    pub fn new(source: TrendSource) -> Self {
        Self {
            source,
            external_id: None,
            title: None,
            summary: None,
            url: None,
            published_at: None,
            upvotes: None,
            points: None,
            comments: None,
            views: None,
        }
    }
}

/// A normalized, scored trend signal
///
/// Immutable once constructed; created fresh per aggregation pass and
/// discarded with the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    /// Stable id, unique within one aggregation batch
    pub id: String,

    pub title: String,
    pub summary: String,
    pub source: TrendSource,

    /// Absolute URL back to the original signal
    pub url: String,

    pub published_at: DateTime<Utc>,

    /// Insertion order is relevance order; may be empty
    pub keywords: Vec<String>,

    /// Signal score, finite, bounded by the scoring config
    pub score: f64,
}

impl Trend {
    /// Derive a stable id from source + url + title
    ///
    /// A feed-provided id takes precedence so re-fetches of the same item
    /// collide in the aggregator.
    pub fn derive_id(
        source: TrendSource,
        external_id: Option<&str>,
        url: &str,
        title: &str,
    ) -> String {
        if let Some(ext) = external_id {
            if !ext.trim().is_empty() {
                return format!("{}:{}", source.as_str(), ext.trim());
            }
        }
        let mut hasher = Sha256::new();
        hasher.update(format!("{}|{}|{}", source.as_str(), url, title).as_bytes());
        let digest = format!("{:x}", hasher.finalize());
        format!("{}:{}", source.as_str(), &digest[..16])
    }
}

/// Statistics for one aggregation pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchStats {
    /// Raw items received across all sources
    pub fetched: u32,

    /// Items that survived normalization
    pub normalized: u32,

    /// Items dropped for missing required fields
    pub dropped: u32,

    /// Sources that failed or timed out
    pub failed_sources: u32,

    /// Sources that returned at least an empty batch
    pub succeeded_sources: u32,
}

impl BatchStats {
    /// Share of raw items dropped during normalization, as a percentage
    pub fn drop_rate(&self) -> f64 {
        if self.fetched == 0 {
            0.0
        } else {
            (self.dropped as f64 / self.fetched as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_roundtrip() {
        for source in TrendSource::all() {
            assert_eq!(TrendSource::parse(source.as_str()), Some(source));
        }
        assert_eq!(TrendSource::parse("hn"), Some(TrendSource::HackerNews));
        assert_eq!(TrendSource::parse("invalid"), None);
    }

    #[test]
    fn test_derive_id_prefers_external_id() {
        let id = Trend::derive_id(
            TrendSource::Reddit,
            Some("abc123"),
            "https://reddit.com/r/x/1",
            "Some title",
        );
        assert_eq!(id, "reddit:abc123");
    }

    #[test]
    fn test_derive_id_hashes_without_external_id() {
        let a = Trend::derive_id(
            TrendSource::HackerNews,
            None,
            "https://example.com/a",
            "Title A",
        );
        let b = Trend::derive_id(
            TrendSource::HackerNews,
            None,
            "https://example.com/a",
            "Title A",
        );
        let c = Trend::derive_id(
            TrendSource::HackerNews,
            None,
            "https://example.com/b",
            "Title A",
        );
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.starts_with("hackernews:"));
        // prefix + 16 hex chars
        assert_eq!(a.len(), "hackernews:".len() + 16);
    }

    #[test]
    fn test_blank_external_id_falls_back_to_hash() {
        let id = Trend::derive_id(TrendSource::Reddit, Some("  "), "https://r.com", "T");
        assert!(id.starts_with("reddit:"));
        assert_ne!(id, "reddit:  ");
    }

    #[test]
    fn test_drop_rate() {
        let stats = BatchStats {
            fetched: 40,
            normalized: 30,
            dropped: 10,
            ..Default::default()
        };
        assert!((stats.drop_rate() - 25.0).abs() < f64::EPSILON);
        assert_eq!(BatchStats::default().drop_rate(), 0.0);
    }
}
