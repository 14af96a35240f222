//! Unified error handling for the trendpulse crate
//!
//! Consolidates the domain-specific errors into a single [`Error`] enum while
//! keeping the domain errors usable on their own at module boundaries.
//!
//! Propagation policy: feed and normalization failures are swallowed where
//! they occur and surface only as a smaller result set plus a log entry.
//! Synthesis errors are caller contract violations and do propagate.

use std::io;
use thiserror::Error;

// Re-export domain-specific errors for convenience
pub use crate::utils::error::{FeedError, NormalizeError, SynthesisError};

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (HTTP, timeout, rate limit)
    Network,
    /// Raw item normalization errors
    Normalization,
    /// Blueprint synthesis contract violations
    Synthesis,
    /// Configuration and validation errors
    Config,
    /// Other/unknown errors
    Other,
}

/// Unified error type for the trendpulse crate
#[derive(Error, Debug)]
pub enum Error {
    /// Feed fetching errors
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    /// Normalization errors
    #[error("Normalization error: {0}")]
    Normalize(#[from] NormalizeError),

    /// Blueprint synthesis errors
    #[error("Synthesis error: {0}")]
    Synthesis(#[from] SynthesisError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}")]
    Other {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Check if this error is recoverable (worth retrying on the next batch)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Feed(e) => e.is_recoverable(),
            Self::Normalize(_) => true,
            Self::Synthesis(_) => false,
            Self::Io(_) => true,
            Self::Json(_) => false,
            Self::Http(_) => true,
            Self::Config(_) => false,
            Self::Other { .. } => false,
        }
    }

    /// Get the error category for handling strategies
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Feed(_) | Self::Http(_) => ErrorCategory::Network,
            Self::Normalize(_) => ErrorCategory::Normalization,
            Self::Synthesis(_) => ErrorCategory::Synthesis,
            Self::Config(_) => ErrorCategory::Config,
            Self::Json(_) => ErrorCategory::Normalization,
            Self::Io(_) | Self::Other { .. } => ErrorCategory::Other,
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

// Conversion from anyhow::Error for binary call sites
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other {
            context: err.to_string(),
            source: None,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TrendSource;

    #[test]
    fn test_error_category() {
        let feed_err = Error::Feed(FeedError::Timeout);
        assert_eq!(feed_err.category(), ErrorCategory::Network);

        let norm_err = Error::Normalize(NormalizeError::MissingTitle(TrendSource::Reddit));
        assert_eq!(norm_err.category(), ErrorCategory::Normalization);

        let synth_err = Error::Synthesis(SynthesisError::MissingId);
        assert_eq!(synth_err.category(), ErrorCategory::Synthesis);
    }

    #[test]
    fn test_is_recoverable() {
        assert!(Error::Feed(FeedError::Timeout).is_recoverable());
        assert!(Error::Normalize(NormalizeError::MissingUrl(TrendSource::HackerNews))
            .is_recoverable());
        assert!(!Error::Synthesis(SynthesisError::MissingId).is_recoverable());
        assert!(!Error::config("bad weights").is_recoverable());
    }

    #[test]
    fn test_error_conversion() {
        let feed_err = FeedError::ServerError(503);
        let unified: Error = feed_err.into();
        assert!(matches!(unified, Error::Feed(_)));
    }

    #[test]
    fn test_config_error() {
        let err = Error::config("invalid half-life");
        assert_eq!(err.category(), ErrorCategory::Config);
        assert!(!err.is_recoverable());
    }
}
