//! Error types for feed fetching, normalization, and synthesis
//!
//! This module defines the domain-specific error types used throughout the
//! engine. Feed and normalization failures are recoverable by design: a
//! failed source or a malformed item shrinks the batch, it never aborts it.

use crate::models::TrendSource;
use thiserror::Error;

/// Errors that can occur while fetching from a feed source
#[derive(Error, Debug)]
pub enum FeedError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server error with status code
    #[error("Server error: {0}")]
    ServerError(u16),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Maximum retry attempts exceeded
    #[error("Maximum retry attempts exceeded")]
    MaxRetriesExceeded,

    /// Response body did not match the expected feed shape
    ///
    /// The feed origin is plain payload here; `source` would collide with
    /// the `std::error::Error::source` accessor thiserror derives.
    #[error("Malformed {origin} response: {detail}")]
    Malformed { origin: TrendSource, detail: String },

    /// JSON decoding error
    #[error("JSON decoding failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Source requires an API key that is not configured
    #[error("Missing API key for {0}")]
    MissingApiKey(TrendSource),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl FeedError {
    /// Feed errors that are worth retrying on the next batch
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Http(_) | Self::ServerError(_) | Self::Timeout | Self::MaxRetriesExceeded => true,
            Self::Malformed { .. } | Self::Json(_) | Self::MissingApiKey(_) | Self::InvalidUrl(_) => {
                false
            }
        }
    }
}

/// Errors that drop a single raw item during normalization
///
/// Always recoverable: the caller logs the drop and continues with the
/// remaining items in the batch.
#[derive(Error, Debug)]
pub enum NormalizeError {
    /// Item has no usable title
    #[error("Item from {0} has no title")]
    MissingTitle(TrendSource),

    /// Item has no URL
    #[error("Item from {0} has no URL")]
    MissingUrl(TrendSource),

    /// URL is present but not absolute http(s)
    #[error("Item from {origin} has invalid URL: {url}")]
    InvalidUrl { origin: TrendSource, url: String },
}

/// Contract violations when synthesizing a blueprint
///
/// These never occur for trends produced by the engine's own aggregator;
/// they indicate a caller handed in a structurally invalid trend.
#[derive(Error, Debug)]
pub enum SynthesisError {
    /// Trend id is empty
    #[error("Trend has an empty id")]
    MissingId,

    /// Trend title is empty
    #[error("Trend has an empty title")]
    MissingTitle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_struct_variants_carry_origin_as_payload() {
        let malformed = FeedError::Malformed {
            origin: TrendSource::GoogleNews,
            detail: "not an RSS document".to_string(),
        };
        assert_eq!(
            malformed.to_string(),
            "Malformed googlenews response: not an RSS document"
        );
        // The feed origin is data, not a wrapped error
        assert!(std::error::Error::source(&malformed).is_none());

        let invalid = NormalizeError::InvalidUrl {
            origin: TrendSource::Reddit,
            url: "/relative".to_string(),
        };
        assert_eq!(invalid.to_string(), "Item from reddit has invalid URL: /relative");
        assert!(std::error::Error::source(&invalid).is_none());
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(FeedError::Timeout.is_recoverable());
        assert!(FeedError::ServerError(503).is_recoverable());
        assert!(!FeedError::MissingApiKey(TrendSource::YouTube).is_recoverable());
        assert!(!FeedError::Malformed {
            origin: TrendSource::GoogleNews,
            detail: "x".to_string(),
        }
        .is_recoverable());
    }
}
