//! Raw item normalization and signal scoring
//!
//! Converts heterogeneous [`RawFeedItem`]s into uniform [`Trend`]s and
//! assigns the scalar signal score. The score is a weighted sum of three
//! components, each on a 0–100 scale:
//!
//! - **recency** — full credit inside a configured window, exponential
//!   half-life decay beyond it, floored at a small positive value so old
//!   items stay rankable but rank last
//! - **engagement** — source-specific raw signals (upvotes, points,
//!   comments, views) log-compressed onto the common scale against a
//!   per-source reference magnitude
//! - **keyword relevance** — distinct breakout-vocabulary hits in the
//!   title and summary
//!
//! Normalization is a pure function of the item and the injected `now`
//! timestamp, so scoring is reproducible in tests.

use crate::config::ScoringConfig;
use crate::models::{RawFeedItem, Trend, TrendSource};
use crate::utils::error::NormalizeError;
use crate::utils::{collapse_whitespace, truncate_chars};

use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Maximum keywords carried on a trend
const MAX_KEYWORDS: usize = 6;

/// Distinct breakout hits at which the keyword component saturates
const KEYWORD_SATURATION: u32 = 4;

/// Filler words excluded from keyword extraction
const STOPWORDS: &[&str] = &[
    "the", "and", "for", "with", "that", "this", "from", "into", "your", "has", "have", "are",
    "was", "you", "its", "his", "her", "can", "will", "just", "how", "why", "what", "when", "new",
    "now", "out", "all", "not", "but", "about", "after", "over", "more",
];

/// Converts raw feed items into scored trends
#[derive(Debug, Clone)]
pub struct Normalizer {
    scoring: ScoringConfig,
}

impl Normalizer {
    pub fn new(scoring: ScoringConfig) -> Self {
        Self { scoring }
    }

    /// Normalize one raw item, scoring it against the injected `now`
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError`] when the item is missing a usable title or
    /// URL. The caller drops the item and continues; a single bad item never
    /// fails a batch.
    pub fn normalize(&self, raw: &RawFeedItem, now: DateTime<Utc>) -> Result<Trend, NormalizeError> {
        let title = raw
            .title
            .as_deref()
            .map(collapse_whitespace)
            .filter(|t| !t.is_empty())
            .ok_or(NormalizeError::MissingTitle(raw.source))?;

        let url = raw
            .url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or(NormalizeError::MissingUrl(raw.source))?;

        let parsed_url = url::Url::parse(url).map_err(|_| NormalizeError::InvalidUrl {
            origin: raw.source,
            url: url.to_string(),
        })?;
        if !matches!(parsed_url.scheme(), "http" | "https") {
            return Err(NormalizeError::InvalidUrl {
                origin: raw.source,
                url: url.to_string(),
            });
        }

        // A malformed timestamp degrades to "now" (maximum recency credit)
        // rather than dropping otherwise-good content
        let published_at = raw
            .published_at
            .as_deref()
            .and_then(parse_timestamp)
            .map(|ts| ts.min(now))
            .unwrap_or(now);

        let summary = raw
            .summary
            .as_deref()
            .map(collapse_whitespace)
            .filter(|s| !s.is_empty())
            .map(|s| truncate_chars(&s, 280))
            .unwrap_or_else(|| {
                format!("Breakout conversation on {} around this topic.", raw.source.label())
            });

        let keywords = self.extract_keywords(&title, &summary);

        let recency = self.recency_component(published_at, now);
        let engagement = self.engagement_component(raw);
        let relevance = self.keyword_component(&title, &summary);

        let s = &self.scoring;
        let weight_sum = s.recency_weight + s.engagement_weight + s.keyword_weight;
        let blended = (s.recency_weight * recency
            + s.engagement_weight * engagement
            + s.keyword_weight * relevance)
            / weight_sum;
        let score = blended.clamp(s.score_floor, s.score_ceiling);

        Ok(Trend {
            id: Trend::derive_id(raw.source, raw.external_id.as_deref(), url, &title),
            title,
            summary,
            source: raw.source,
            url: url.to_string(),
            published_at,
            keywords,
            score,
        })
    }

    /// Recency component on the 0–100 scale
    ///
    /// Full credit inside `full_credit_hours`, then exponential decay with
    /// the configured half-life, floored at `score_floor`.
    pub fn recency_component(&self, published_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
        let s = &self.scoring;
        let age_hours = (now - published_at).num_minutes().max(0) as f64 / 60.0;

        if age_hours <= s.full_credit_hours {
            return s.score_ceiling;
        }

        let decayed_hours = age_hours - s.full_credit_hours;
        let decayed = s.score_ceiling * 0.5_f64.powf(decayed_hours / s.half_life_hours);
        decayed.max(s.score_floor)
    }

    /// Engagement component on the 0–100 scale
    ///
    /// Non-finite or negative raw signals coerce to zero contribution; a
    /// source with no engagement signals at all gets the configured neutral
    /// value so it can still compete on recency and relevance.
    pub fn engagement_component(&self, raw: &RawFeedItem) -> f64 {
        let scale = &self.scoring.engagement_scale;

        let (primary, secondary) = match raw.source {
            TrendSource::Reddit => (
                raw.upvotes.map(|v| log_norm(v, scale.reddit_upvotes)),
                raw.comments.map(|v| log_norm(v, scale.reddit_comments)),
            ),
            TrendSource::HackerNews => (
                raw.points.map(|v| log_norm(v, scale.hn_points)),
                raw.comments.map(|v| log_norm(v, scale.hn_comments)),
            ),
            TrendSource::YouTube => (raw.views.map(|v| log_norm(v, scale.youtube_views)), None),
            TrendSource::GoogleNews => (None, None),
        };

        match (primary, secondary) {
            (Some(p), Some(s)) => 0.8 * p + 0.2 * s,
            (Some(p), None) => p,
            (None, Some(s)) => s,
            (None, None) => self.scoring.neutral_engagement,
        }
    }

    /// Keyword relevance component on the 0–100 scale
    pub fn keyword_component(&self, title: &str, summary: &str) -> f64 {
        let haystack = format!("{} {}", title, summary).to_lowercase();
        let tokens: HashSet<&str> = haystack
            .split(|c: char| !c.is_alphanumeric() && c != '-')
            .filter(|t| !t.is_empty())
            .collect();

        let hits = self
            .scoring
            .breakout_vocabulary
            .iter()
            .filter(|term| tokens.contains(term.as_str()))
            .count() as u32;

        let capped = hits.min(KEYWORD_SATURATION);
        f64::from(capped) / f64::from(KEYWORD_SATURATION) * 100.0
    }

    /// Extract keywords from title and summary, breakout terms first
    ///
    /// Insertion order is relevance order; the result may be empty.
    fn extract_keywords(&self, title: &str, summary: &str) -> Vec<String> {
        let text = format!("{} {}", title, summary).to_lowercase();
        let mut seen = HashSet::new();
        let mut keywords = Vec::new();

        let tokens: Vec<&str> = text
            .split(|c: char| !c.is_alphanumeric() && c != '-')
            .filter(|t| t.len() >= 3 && !STOPWORDS.contains(t))
            .collect();

        // Breakout-vocabulary hits first, in order of appearance
        for token in &tokens {
            if keywords.len() >= MAX_KEYWORDS {
                break;
            }
            if self.scoring.breakout_vocabulary.iter().any(|v| v == token)
                && seen.insert(token.to_string())
            {
                keywords.push(token.to_string());
            }
        }

        // Then remaining tokens by appearance
        for token in &tokens {
            if keywords.len() >= MAX_KEYWORDS {
                break;
            }
            if token.chars().any(|c| c.is_alphabetic()) && seen.insert(token.to_string()) {
                keywords.push(token.to_string());
            }
        }

        keywords
    }
}

/// Log-compress a raw magnitude onto the 0–100 scale
///
/// The reference magnitude maps to 100; larger values clamp there. Invalid
/// numeric input (NaN, infinite, negative) contributes nothing instead of
/// propagating.
fn log_norm(value: f64, reference: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 || reference <= 0.0 {
        return 0.0;
    }
    let normalized = (1.0 + value).ln() / (1.0 + reference).ln() * 100.0;
    normalized.min(100.0)
}

/// Parse a feed timestamp: RFC 3339 first, RFC 2822 (RSS pubDate) second
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .or_else(|_| DateTime::parse_from_rfc2822(s))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}
