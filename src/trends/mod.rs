//! Trend normalization and aggregation

pub mod aggregate;
pub mod normalize;

pub use aggregate::TrendEngine;
pub use normalize::Normalizer;
